use crate::{
    graph::{build_graph, Graph},
    search::{a_star_search, Path},
    world::{ObstacleIdSet, WorldQuery},
    ConfigError, MotionCommand, PathFollower, PlannerConfig, Point,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The result of a single planning request
#[derive(Clone, Debug)]
pub struct Plan {
    /// the Graph that was searched, e.g. for debug rendering
    pub graph: Graph,
    /// the Path found, if any
    pub path: Option<Path>,
}

/// Builds visibility Graphs and searches them, using a validated [`PlannerConfig`].
///
/// A Planner holds no state besides its configuration, so it can be shared between any number
/// of agents.
#[derive(Clone, Copy, Debug)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a new Planner.
    ///
    /// Returns an Error if `config` fails [validation](PlannerConfig::validate).
    pub fn new(config: PlannerConfig) -> Result<Planner, ConfigError> {
        config.validate()?;
        Ok(Planner { config })
    }

    /// the configuration of this Planner
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds a visibility Graph from `start` to `goal`, sampled with a random source seeded
    /// from `seed`.
    ///
    /// See [`build_graph`] for the details.
    pub fn build_graph<W: WorldQuery + Sync>(
        &self,
        world: &W,
        start: Point,
        goal: Point,
        excluded: &ObstacleIdSet,
        seed: u64,
    ) -> Graph {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.build_graph_with(world, start, goal, excluded, &mut rng)
    }

    /// Same as [`build_graph`](Planner::build_graph), but samples with the given random source.
    pub fn build_graph_with<W, R>(
        &self,
        world: &W,
        start: Point,
        goal: Point,
        excluded: &ObstacleIdSet,
        rng: &mut R,
    ) -> Graph
    where
        W: WorldQuery + Sync,
        R: Rng + ?Sized,
    {
        let timer = std::time::Instant::now();
        let graph = build_graph(world, start, goal, excluded, &self.config, rng);
        log::trace!(
            "building the Graph took {:.3}ms",
            timer.elapsed().as_secs_f64() * 1000.0
        );
        graph
    }

    /// Searches `graph` for the cheapest Path from its start to any of its goals.
    ///
    /// Gives up after [`max_expansions`](PlannerConfig::max_expansions).
    pub fn search<W: WorldQuery>(&self, graph: &Graph, world: &W) -> Option<Path> {
        let timer = std::time::Instant::now();
        let path = a_star_search(graph, world, self.config.max_expansions);
        log::trace!(
            "searching the Graph took {:.3}ms",
            timer.elapsed().as_secs_f64() * 1000.0
        );
        path
    }

    /// Builds a Graph and searches it.
    pub fn plan<W: WorldQuery + Sync>(
        &self,
        world: &W,
        start: Point,
        goal: Point,
        excluded: &ObstacleIdSet,
        seed: u64,
    ) -> Plan {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.plan_with(world, start, goal, excluded, &mut rng)
    }

    /// Same as [`plan`](Planner::plan), but samples with the given random source.
    pub fn plan_with<W, R>(
        &self,
        world: &W,
        start: Point,
        goal: Point,
        excluded: &ObstacleIdSet,
        rng: &mut R,
    ) -> Plan
    where
        W: WorldQuery + Sync,
        R: Rng + ?Sized,
    {
        let graph = self.build_graph_with(world, start, goal, excluded, rng);
        let path = self.search(&graph, world);
        Plan { graph, path }
    }
}

/// Decides on which ticks a fresh Path is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplanPolicy {
    interval: u64,
}

impl ReplanPolicy {
    /// Creates a policy that replans every `interval` ticks.
    ///
    /// Returns an Error if `interval` is 0.
    pub fn every(interval: u64) -> Result<ReplanPolicy, ConfigError> {
        if interval == 0 {
            return Err(ConfigError::ZeroCount {
                field: "replan_interval",
            });
        }
        Ok(ReplanPolicy { interval })
    }

    /// Creates a policy with the [`replan_interval`](PlannerConfig::replan_interval) of
    /// `config`.
    pub fn from_config(config: &PlannerConfig) -> Result<ReplanPolicy, ConfigError> {
        ReplanPolicy::every(config.replan_interval)
    }

    /// the number of ticks between two scheduled replans
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// `true` if `tick` is one of the scheduled ticks
    pub fn is_due(&self, tick: u64) -> bool {
        tick % self.interval == 0
    }

    /// `true` if the tick is scheduled, or `follower` has no Path left to follow
    pub fn should_replan(&self, tick: u64, follower: &PathFollower) -> bool {
        self.is_due(tick) || !follower.has_path() || follower.is_finished()
    }
}

impl Default for ReplanPolicy {
    fn default() -> ReplanPolicy {
        ReplanPolicy { interval: 25 }
    }
}

/// Everything a single agent needs to get to its goal: a [`Planner`], a [`PathFollower`] and a
/// [`ReplanPolicy`].
///
/// Call [`tick`](Navigator::tick) once per simulation tick. A new Path is planned whenever
/// - the goal changed (or nothing was planned yet),
/// - the tick is scheduled by the [`ReplanPolicy`], or
/// - the follower ran out of waypoints before reaching the goal.
///
/// After a failed plan, the agent idles until the next scheduled tick.
///
/// ## Examples
/// ```
/// # use toroidal_planner::prelude::*;
/// let world = ToroidalWorld::new(1000.0, 1000.0).unwrap();
/// let mut navigator = Navigator::new(PlannerConfig::default(), 3).unwrap();
///
/// let position = Point::new(100.0, 100.0);
/// let goal = Point::new(160.0, 100.0);
///
/// let command = navigator.tick(&world, 1, position, goal, &ObstacleIdSet::default());
/// assert_eq!(command, MotionCommand::FineApproach(goal));
/// assert!(navigator.graph().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Navigator {
    planner: Planner,
    policy: ReplanPolicy,
    follower: PathFollower,
    rng: ChaCha8Rng,
    goal: Option<Point>,
    graph: Option<Graph>,
    path: Option<Path>,
    failed: bool,
    plan_count: usize,
}

impl Navigator {
    /// Creates a Navigator whose Graphs are sampled from a random source seeded with `seed`.
    ///
    /// Returns an Error if `config` fails [validation](PlannerConfig::validate).
    pub fn new(config: PlannerConfig, seed: u64) -> Result<Navigator, ConfigError> {
        let planner = Planner::new(config)?;
        let policy = ReplanPolicy::from_config(&config)?;
        Ok(Navigator {
            planner,
            policy,
            follower: PathFollower::new(&config),
            rng: ChaCha8Rng::seed_from_u64(seed),
            goal: None,
            graph: None,
            path: None,
            failed: false,
            plan_count: 0,
        })
    }

    /// Produces the command for this tick, replanning first if necessary.
    pub fn tick<W: WorldQuery + Sync>(
        &mut self,
        world: &W,
        tick: u64,
        position: Point,
        goal: Point,
        excluded: &ObstacleIdSet,
    ) -> MotionCommand {
        if self.needs_plan(world, tick, position, goal) {
            self.replan(world, position, goal, excluded);
        }
        self.follower.tick(world, position)
    }

    fn needs_plan<W: WorldQuery>(&self, world: &W, tick: u64, position: Point, goal: Point) -> bool {
        if self.goal != Some(goal) || self.policy.is_due(tick) {
            return true;
        }
        let arrived =
            world.shortest_distance(position, goal) <= self.planner.config().arrival_tolerance;
        !self.failed && !arrived && self.policy.should_replan(tick, &self.follower)
    }

    fn replan<W: WorldQuery + Sync>(
        &mut self,
        world: &W,
        position: Point,
        goal: Point,
        excluded: &ObstacleIdSet,
    ) {
        let plan = self
            .planner
            .plan_with(world, position, goal, excluded, &mut self.rng);
        self.plan_count += 1;

        match &plan.path {
            Some(path) => {
                log::debug!("new {}", path);
                self.follower.follow_new_path(path);
            }
            None => {
                log::debug!("no Path from {} to {}", position, goal);
                self.follower.clear();
            }
        }
        self.failed = plan.path.is_none();
        self.goal = Some(goal);
        self.path = plan.path;
        self.graph = Some(plan.graph);
    }

    /// the Graph of the most recent plan
    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    /// the Path of the most recent plan, if one was found
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// the follower walking the current Path
    pub fn follower(&self) -> &PathFollower {
        &self.follower
    }

    /// the Planner used for every plan
    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// how often this Navigator has planned so far
    pub fn plan_count(&self) -> usize {
        self.plan_count
    }
}
