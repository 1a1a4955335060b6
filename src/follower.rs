use crate::{search::Path, world::WorldQuery, Point, PlannerConfig};

/// The primitive command a [`PathFollower`] emits for a single tick
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum MotionCommand {
    /// do nothing
    #[default]
    Idle,
    /// head for the target at regular speed
    Approach(Point),
    /// head for the target slowly, so that it is not overshot
    FineApproach(Point),
}

impl MotionCommand {
    /// the Point this command steers toward, if any
    pub fn target(&self) -> Option<Point> {
        match *self {
            MotionCommand::Idle => None,
            MotionCommand::Approach(target) | MotionCommand::FineApproach(target) => Some(target),
        }
    }

    /// `true` for [`Idle`](MotionCommand::Idle)
    pub fn is_idle(&self) -> bool {
        *self == MotionCommand::Idle
    }

    /// Checks if an agent at `position` has finished this command.
    ///
    /// Idling is always finished, the other commands once the agent is within `tolerance` of the
    /// target.
    pub fn is_complete<W: WorldQuery>(&self, world: &W, position: Point, tolerance: f64) -> bool {
        match self.target() {
            None => true,
            Some(target) => world.shortest_distance(position, target) <= tolerance,
        }
    }
}

/// Walks an agent along the waypoints of a [`Path`], one tick at a time.
///
/// Every call to [`tick`](PathFollower::tick) returns the command for that tick. As long as the
/// previous command is not completed, it is simply repeated. Once it is, the follower moves on
/// to the next waypoint. The final waypoint, and any waypoint that is already close, is
/// approached with [`FineApproach`](MotionCommand::FineApproach).
///
/// The follower never plans on its own. Without a Path, or after the last waypoint, it idles
/// until it is handed a new Path.
///
/// ## Examples
/// ```
/// # use toroidal_planner::prelude::*;
/// let world = ToroidalWorld::new(1000.0, 1000.0).unwrap();
/// let mut follower = PathFollower::new(&PlannerConfig::default());
///
/// assert_eq!(follower.tick(&world, Point::ZERO), MotionCommand::Idle);
///
/// follower.follow_waypoints(vec![
///     Point::new(0.0, 0.0),
///     Point::new(300.0, 0.0),
///     Point::new(350.0, 0.0),
/// ]);
///
/// // the first waypoint is where the agent already is
/// let command = follower.tick(&world, Point::new(0.0, 0.0));
/// assert_eq!(command, MotionCommand::Approach(Point::new(300.0, 0.0)));
///
/// // not there yet
/// let command = follower.tick(&world, Point::new(150.0, 0.0));
/// assert_eq!(command, MotionCommand::Approach(Point::new(300.0, 0.0)));
///
/// let command = follower.tick(&world, Point::new(299.0, 0.0));
/// assert_eq!(command, MotionCommand::FineApproach(Point::new(350.0, 0.0)));
///
/// let command = follower.tick(&world, Point::new(350.0, 0.0));
/// assert_eq!(command, MotionCommand::Idle);
/// assert!(follower.is_finished());
/// ```
#[derive(Clone, Debug)]
pub struct PathFollower {
    waypoints: Vec<Point>,
    cursor: Option<usize>,
    active: Option<MotionCommand>,
    fine_approach_distance: f64,
    arrival_tolerance: f64,
}

impl PathFollower {
    /// Creates a follower without a Path.
    pub fn new(config: &PlannerConfig) -> PathFollower {
        PathFollower {
            waypoints: Vec::new(),
            cursor: None,
            active: None,
            fine_approach_distance: config.fine_approach_distance,
            arrival_tolerance: config.arrival_tolerance,
        }
    }

    /// Creates a follower that starts out following `path`.
    pub fn with_path(path: &Path, config: &PlannerConfig) -> PathFollower {
        let mut follower = PathFollower::new(config);
        follower.follow_new_path(path);
        follower
    }

    /// Replaces the current Path. The old one is dropped, not resumed.
    pub fn follow_new_path(&mut self, path: &Path) {
        self.follow_waypoints(path.waypoints().to_vec());
    }

    /// Replaces the current Path with a plain list of waypoints.
    ///
    /// The first waypoint is treated as the current position of the agent and skipped.
    pub fn follow_waypoints(&mut self, waypoints: Vec<Point>) {
        log::trace!("following {} new waypoints", waypoints.len());
        self.cursor = if waypoints.is_empty() { None } else { Some(0) };
        self.waypoints = waypoints;
        self.active = None;
    }

    /// Drops the current Path. The follower idles until it gets a new one.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.cursor = None;
        self.active = None;
    }

    /// Produces the command for this tick.
    pub fn tick<W: WorldQuery>(&mut self, world: &W, position: Point) -> MotionCommand {
        let Some(cursor) = self.cursor else {
            return MotionCommand::Idle;
        };

        if let Some(active) = self.active {
            if !active.is_complete(world, position, self.arrival_tolerance) {
                return active;
            }
        }

        let cursor = (cursor + 1).min(self.waypoints.len());
        self.cursor = Some(cursor);

        let command = match self.waypoints.get(cursor) {
            None => MotionCommand::Idle,
            Some(&target) => {
                let is_last = cursor + 1 == self.waypoints.len();
                if is_last || world.shortest_distance(position, target) < self.fine_approach_distance {
                    MotionCommand::FineApproach(target)
                } else {
                    MotionCommand::Approach(target)
                }
            }
        };
        if command.is_idle() && !self.active.map_or(false, |active| active.is_idle()) {
            log::debug!("reached the end of the Path");
        }
        self.active = Some(command);
        command
    }

    /// `true` if the follower has a Path
    pub fn has_path(&self) -> bool {
        self.cursor.is_some()
    }

    /// `true` if the follower had a Path and has moved past its last waypoint
    pub fn is_finished(&self) -> bool {
        self.cursor.map_or(false, |cursor| cursor >= self.waypoints.len())
    }

    /// the index of the waypoint currently targeted, or `None` without a Path
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// the waypoint currently targeted
    pub fn current_target(&self) -> Option<Point> {
        self.active.and_then(|command| command.target())
    }

    /// the waypoints of the current Path
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }
}
