//! The view of the world the planner works against.
//!
//! Everything the planner needs to know about the simulation is behind the [`WorldQuery`]
//! trait: the size of the (wrap-around) board, the Obstacles and a few always-included
//! waypoints. [`ToroidalWorld`] is a plain owned snapshot implementing it.

use crate::{ConfigError, Cost, Point};
use std::fmt::Debug;

mod obstacle_id;
pub use self::obstacle_id::{ObstacleId, ObstacleIdHasher, ObstacleIdSet};

/// A circular Obstacle
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    /// identifies the Obstacle, so that it can be excluded from planning
    pub id: ObstacleId,
    /// the center of the Obstacle
    pub position: Point,
    /// the radius of the Obstacle
    pub radius: f64,
}

/// Defines the geometry of the world a Path is planned through.
///
/// The board is a torus: an object leaving it on the right re-enters on the left, and the same
/// goes for top and bottom. All distances are therefore "shortest distances", taking the
/// wrap-around into account.
///
/// Only the first four methods have to be implemented. The remaining ones have default
/// implementations based on [`toroidal_vector`].
pub trait WorldQuery: Debug {
    /// The width of the board
    fn width(&self) -> f64;
    /// The height of the board
    fn height(&self) -> f64;
    /// All Obstacles currently on the board
    fn obstacles(&self) -> &[Obstacle];
    /// Points that are added to every Graph, regardless of random sampling.
    fn bonus_waypoints(&self) -> &[Point];

    /// The shortest Vector pointing from `from` to `to`
    fn shortest_vector(&self, from: Point, to: Point) -> Point {
        toroidal_vector(from, to, self.width(), self.height())
    }

    /// The length of the shortest Vector between the two Points
    fn shortest_distance(&self, from: Point, to: Point) -> Cost {
        self.shortest_vector(from, to).length()
    }

    /// Checks that `point` keeps at least `margin` to the surface of every Obstacle.
    fn is_in_free_space(&self, point: Point, margin: f64) -> bool {
        self.obstacles()
            .iter()
            .all(|obstacle| self.shortest_distance(point, obstacle.position) >= obstacle.radius + margin)
    }

    /// Checks that the straight line from `from` to `to` keeps at least `margin` to the surface
    /// of all of the given `obstacles`.
    ///
    /// The offset of every Obstacle is projected onto the line. Only Obstacles whose projection
    /// falls between the two endpoints can block the line; the endpoints themselves are
    /// expected to be in free space already.
    fn is_path_clear(&self, from: Point, to: Point, obstacles: &[Obstacle], margin: f64) -> bool {
        let line = self.shortest_vector(from, to);
        let length_squared = line.length_squared();

        for obstacle in obstacles {
            let clearance = obstacle.radius + margin;
            let offset = self.shortest_vector(from, obstacle.position);

            if length_squared == 0.0 {
                if offset.length() < clearance {
                    return false;
                }
                continue;
            }

            let t = offset.dot(line) / length_squared;
            if (0.0..=1.0).contains(&t) {
                let closest = from + line * t;
                if self.shortest_distance(closest, obstacle.position) < clearance {
                    return false;
                }
            }
        }
        true
    }
}

/// The shortest Vector from `from` to `to` on a `width` x `height` torus.
///
/// Both Points may lie outside of the board; they are wrapped implicitly.
///
/// ## Examples
/// ```
/// # use toroidal_planner::{world::toroidal_vector, Point};
/// let from = Point::new(990.0, 10.0);
/// let to = Point::new(10.0, 990.0);
///
/// // going over the edge is shorter than crossing the board
/// assert_eq!(toroidal_vector(from, to, 1000.0, 1000.0), Point::new(20.0, -20.0));
/// ```
pub fn toroidal_vector(from: Point, to: Point, width: f64, height: f64) -> Point {
    Point::new(wrap_delta(to.x - from.x, width), wrap_delta(to.y - from.y, height))
}

fn wrap_delta(delta: f64, size: f64) -> f64 {
    let delta = delta.rem_euclid(size);
    if delta > size / 2.0 {
        delta - size
    } else {
        delta
    }
}

/// An owned snapshot of a toroidal world.
///
/// ## Examples
/// ```
/// # use toroidal_planner::{world::{ToroidalWorld, WorldQuery}, Point};
/// let world = ToroidalWorld::new(800.0, 600.0)
///     .unwrap()
///     .with_obstacle(Point::new(400.0, 300.0), 30.0)
///     .with_bonus_waypoint(Point::new(100.0, 100.0));
///
/// assert_eq!(world.obstacles().len(), 1);
/// assert!(!world.is_in_free_space(Point::new(420.0, 300.0), 0.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToroidalWorld {
    width: f64,
    height: f64,
    obstacles: Vec<Obstacle>,
    bonus_waypoints: Vec<Point>,
}

impl ToroidalWorld {
    /// Creates an empty world with the given board size.
    pub fn new(width: f64, height: f64) -> Result<ToroidalWorld, ConfigError> {
        let valid = |size: f64| size.is_finite() && size > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ConfigError::InvalidBoard { width, height });
        }
        Ok(ToroidalWorld {
            width,
            height,
            obstacles: Vec::new(),
            bonus_waypoints: Vec::new(),
        })
    }

    /// Adds an Obstacle and returns its freshly assigned id.
    ///
    /// Panics if `radius` is negative or not finite.
    #[track_caller]
    pub fn add_obstacle(&mut self, position: Point, radius: f64) -> ObstacleId {
        assert!(
            radius.is_finite() && radius >= 0.0,
            "Invalid Obstacle radius: {}",
            radius
        );
        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(Obstacle {
            id,
            position: self.wrap(position),
            radius,
        });
        id
    }

    /// Adds an Obstacle, builder style. See [`add_obstacle`](ToroidalWorld::add_obstacle).
    #[track_caller]
    pub fn with_obstacle(mut self, position: Point, radius: f64) -> ToroidalWorld {
        self.add_obstacle(position, radius);
        self
    }

    /// Adds a Point that will be part of every Graph built in this world.
    pub fn add_bonus_waypoint(&mut self, position: Point) {
        let position = self.wrap(position);
        self.bonus_waypoints.push(position);
    }

    /// Adds a bonus waypoint, builder style.
    pub fn with_bonus_waypoint(mut self, position: Point) -> ToroidalWorld {
        self.add_bonus_waypoint(position);
        self
    }

    /// Looks up an Obstacle by its id
    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|obstacle| obstacle.id == id)
    }

    /// Moves a Point back onto the board.
    pub fn wrap(&self, point: Point) -> Point {
        Point::new(point.x.rem_euclid(self.width), point.y.rem_euclid(self.height))
    }
}

impl WorldQuery for ToroidalWorld {
    fn width(&self) -> f64 {
        self.width
    }
    fn height(&self) -> f64 {
        self.height
    }
    fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
    fn bonus_waypoints(&self) -> &[Point] {
        &self.bonus_waypoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> ToroidalWorld {
        ToroidalWorld::new(1000.0, 1000.0).unwrap()
    }

    #[test]
    fn rejects_empty_board() {
        assert!(ToroidalWorld::new(0.0, 10.0).is_err());
        assert!(ToroidalWorld::new(10.0, f64::INFINITY).is_err());
        assert_eq!(
            ToroidalWorld::new(-1.0, 10.0),
            Err(ConfigError::InvalidBoard {
                width: -1.0,
                height: 10.0
            })
        );
    }

    #[test]
    fn vector_wraps_both_axes() {
        let world = world();
        assert_eq!(
            world.shortest_vector(Point::new(10.0, 20.0), Point::new(30.0, 50.0)),
            Point::new(20.0, 30.0)
        );
        assert_eq!(
            world.shortest_vector(Point::new(10.0, 980.0), Point::new(990.0, 5.0)),
            Point::new(-20.0, 25.0)
        );
        assert_eq!(
            world.shortest_distance(Point::new(0.0, 0.0), Point::new(700.0, 0.0)),
            300.0
        );
    }

    #[test]
    fn distance_is_symmetric() {
        let world = world();
        let a = Point::new(123.0, 877.0);
        let b = Point::new(940.0, 60.0);
        assert!((world.shortest_distance(a, b) - world.shortest_distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn free_space_respects_margin() {
        let world = world().with_obstacle(Point::new(500.0, 500.0), 50.0);

        assert!(!world.is_in_free_space(Point::new(555.0, 500.0), 10.0));
        assert!(world.is_in_free_space(Point::new(560.0, 500.0), 10.0));
        assert!(world.is_in_free_space(Point::new(555.0, 500.0), 0.0));
    }

    #[test]
    fn free_space_across_the_edge() {
        let world = world().with_obstacle(Point::new(5.0, 500.0), 20.0);

        assert!(!world.is_in_free_space(Point::new(990.0, 500.0), 0.0));
    }

    #[test]
    fn line_blocked_by_obstacle_in_between() {
        let world = world().with_obstacle(Point::new(500.0, 500.0), 50.0);
        let obstacles = world.obstacles();

        assert!(!world.is_path_clear(
            Point::new(400.0, 500.0),
            Point::new(600.0, 500.0),
            obstacles,
            10.0
        ));
        // passes 70 units above the center
        assert!(world.is_path_clear(
            Point::new(400.0, 570.0),
            Point::new(600.0, 570.0),
            obstacles,
            10.0
        ));
        // but not with a larger margin
        assert!(!world.is_path_clear(
            Point::new(400.0, 570.0),
            Point::new(600.0, 570.0),
            obstacles,
            25.0
        ));
    }

    #[test]
    fn line_ignores_obstacles_beyond_endpoints() {
        let world = world().with_obstacle(Point::new(500.0, 500.0), 50.0);

        assert!(world.is_path_clear(
            Point::new(300.0, 500.0),
            Point::new(400.0, 500.0),
            world.obstacles(),
            10.0
        ));
    }

    #[test]
    fn line_blocked_across_the_edge() {
        let world = world().with_obstacle(Point::new(0.0, 500.0), 30.0);

        assert!(!world.is_path_clear(
            Point::new(950.0, 500.0),
            Point::new(50.0, 500.0),
            world.obstacles(),
            0.0
        ));
        assert!(world.is_path_clear(
            Point::new(950.0, 500.0),
            Point::new(50.0, 500.0),
            &[],
            0.0
        ));
    }

    #[test]
    fn ids_and_wrapping() {
        let mut world = world();
        let a = world.add_obstacle(Point::new(1010.0, -20.0), 5.0);
        let b = world.add_obstacle(Point::new(100.0, 100.0), 5.0);

        assert_eq!(a, ObstacleId(0));
        assert_eq!(b, ObstacleId(1));
        assert_eq!(world.obstacle(a).unwrap().position, Point::new(10.0, 980.0));
        assert!(world.obstacle(ObstacleId(2)).is_none());
    }
}
