#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate to plan and follow Paths on a wrap-around Plane full of circular Obstacles.
//!
//! ## Introduction
//! Agents in a toroidal world (leaving the board on one side brings you back on the opposite
//! side) constantly need a way to get from where they are to where they want to be, without
//! crashing into one of the many round Obstacles in between. Since the world keeps moving, any
//! Path found is only good for a couple of ticks, so planning has to be cheap enough to simply
//! be repeated from scratch.
//!
//! This crate does that in three steps:
//! 1. A random **visibility Graph** is built: the start, the goal, a set of always-included
//!    bonus waypoints and a few hundred random samples in free space are connected whenever they
//!    are close to each other and the straight line between them keeps a safety margin to every
//!    Obstacle. See [`build_graph`](graph::build_graph).
//! 2. That Graph is searched with a capped **A\*** using the toroidal distance to the closest
//!    goal as the Heuristic. See [`a_star_search`](search::a_star_search).
//! 3. A [`PathFollower`] walks the resulting waypoints one tick at a time and emits a
//!    [`MotionCommand`] for each tick, which [`Steering`] can turn into an acceleration.
//!
//! Nothing is ever updated incrementally: a new Graph is built for every planning request and
//! thrown away (or kept for debug rendering) afterwards. The [`Navigator`] wraps all of that into
//! a per-agent object that replans on a fixed cadence.
//!
//! ## Examples
//! Planning a Path around an Obstacle:
//! ```
//! use toroidal_planner::prelude::*;
//!
//! let world = ToroidalWorld::new(1000.0, 1000.0)
//!     .unwrap()
//!     .with_obstacle(Point::new(500.0, 500.0), 50.0);
//!
//! let planner = Planner::new(PlannerConfig::default()).unwrap();
//!
//! let start = Point::new(300.0, 500.0);
//! let goal = Point::new(700.0, 500.0);
//!
//! // the same seed always produces the same Graph
//! let graph = planner.build_graph(&world, start, goal, &ObstacleIdSet::default(), 7);
//! assert!(graph.len() >= 2);
//!
//! // search returns None if no Path could be found
//! if let Some(path) = planner.search(&graph, &world) {
//!     assert_eq!(path[0], start);
//!     assert_eq!(path[path.len() - 1], goal);
//!     assert!(path.cost() > 400.0);
//! }
//! ```
//!
//! ### Following a Path
//! ```
//! # use toroidal_planner::prelude::*;
//! #
//! # let world = ToroidalWorld::new(1000.0, 1000.0).unwrap();
//! # let planner = Planner::new(PlannerConfig::default()).unwrap();
//! let start = Point::new(100.0, 100.0);
//! let goal = Point::new(150.0, 100.0);
//!
//! let plan = planner.plan(&world, start, goal, &ObstacleIdSet::default(), 1);
//! let path = plan.path.unwrap(); // start and goal are in direct sight
//!
//! let mut follower = PathFollower::new(planner.config());
//! follower.follow_new_path(&path);
//!
//! // the goal is the last waypoint, so it is approached slowly
//! assert_eq!(follower.tick(&world, start), MotionCommand::FineApproach(goal));
//! ```
//!
//! ### Configuration
//! Every tuning constant lives in [`PlannerConfig`], which also provides a denser and a faster
//! preset:
//! ```
//! use toroidal_planner::PlannerConfig;
//!
//! let config = PlannerConfig {
//!     safety_margin: 15.0,
//!     ..PlannerConfig::FAST
//! };
//!
//! assert!(config.validate().is_ok());
//! ```

/// A Point (or a Vector) on the Plane
pub type Point = glam::DVec2;

/// The Type used for distances and Path costs
pub type Cost = f64;

mod config;
pub use self::config::PlannerConfig;

mod error;
pub use self::error::ConfigError;

pub mod world;

pub mod graph;

pub mod search;

mod follower;
pub use self::follower::{MotionCommand, PathFollower};

mod steering;
pub use self::steering::{Gains, Steering};

mod planner;
pub use self::planner::{Navigator, Plan, Planner, ReplanPolicy};

/// The prelude for this crate.
pub mod prelude {
    pub use crate::{
        graph::{Graph, VertexRole},
        search::Path,
        world::{Obstacle, ObstacleId, ObstacleIdSet, ToroidalWorld, WorldQuery},
        MotionCommand, Navigator, PathFollower, Planner, PlannerConfig, Point, Steering,
    };
}
