use crate::ConfigError;

/// Options for configuring the [`Planner`](crate::Planner) and everything it drives
///
/// Default options:
/// ```
/// # use toroidal_planner::PlannerConfig;
/// assert_eq!(
///     PlannerConfig {
///         safety_margin: 10.0,
///         sample_count: 200,
///         max_connection_distance: 200.0,
///         max_expansions: 100,
///         fine_approach_distance: 100.0,
///         arrival_tolerance: 10.0,
///         replan_interval: 25,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Clearance added to every Obstacle radius, both when placing samples and when testing
    /// the line of sight between two vertices (defaults to `10`).
    pub safety_margin: f64,
    /// How many random points are drawn per Graph (defaults to `200`).
    ///
    /// Only the points in free space end up in the Graph.
    pub sample_count: usize,
    /// Two vertices further apart than this are never connected (defaults to `200`).
    pub max_connection_distance: f64,
    /// The maximum number of vertices A* expands before giving up (defaults to `100`).
    ///
    /// This is the only bound on how long a single search may take.
    pub max_expansions: usize,
    /// Waypoints closer than this to the agent are approached slowly (defaults to `100`).
    pub fine_approach_distance: f64,
    /// A motion command counts as completed once the agent is this close to its target
    /// (defaults to `10`).
    pub arrival_tolerance: f64,
    /// The [`Navigator`](crate::Navigator) replans every this many ticks (defaults to `25`).
    pub replan_interval: u64,
}

impl PlannerConfig {
    /// a PlannerConfig with more samples and a larger search budget, for crowded boards
    ///
    /// Values:
    /// ```
    /// # use toroidal_planner::PlannerConfig;
    /// assert_eq!(
    ///     PlannerConfig {
    ///         safety_margin: 10.0,
    ///         sample_count: 400,
    ///         max_connection_distance: 150.0,
    ///         max_expansions: 400,
    ///         fine_approach_distance: 100.0,
    ///         arrival_tolerance: 10.0,
    ///         replan_interval: 25,
    ///     },
    ///     PlannerConfig::DENSE
    /// );
    /// ```
    pub const DENSE: PlannerConfig = PlannerConfig {
        safety_margin: 10.0,
        sample_count: 400,
        max_connection_distance: 150.0,
        max_expansions: 400,
        fine_approach_distance: 100.0,
        arrival_tolerance: 10.0,
        replan_interval: 25,
    };
    /// a PlannerConfig with fewer, longer edges, for open boards and tight tick budgets
    ///
    /// Values:
    /// ```
    /// # use toroidal_planner::PlannerConfig;
    /// assert_eq!(
    ///     PlannerConfig {
    ///         safety_margin: 10.0,
    ///         sample_count: 100,
    ///         max_connection_distance: 250.0,
    ///         max_expansions: 60,
    ///         fine_approach_distance: 100.0,
    ///         arrival_tolerance: 10.0,
    ///         replan_interval: 25,
    ///     },
    ///     PlannerConfig::FAST
    /// );
    /// ```
    pub const FAST: PlannerConfig = PlannerConfig {
        safety_margin: 10.0,
        sample_count: 100,
        max_connection_distance: 250.0,
        max_expansions: 60,
        fine_approach_distance: 100.0,
        arrival_tolerance: 10.0,
        replan_interval: 25,
    };

    /// Checks that every distance is finite and in range.
    ///
    /// A `sample_count` or `max_expansions` of zero is allowed: it simply produces Graphs that
    /// rarely contain a Path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("safety_margin", self.safety_margin)?;
        positive("max_connection_distance", self.max_connection_distance)?;
        non_negative("fine_approach_distance", self.fine_approach_distance)?;
        positive("arrival_tolerance", self.arrival_tolerance)?;
        if self.replan_interval == 0 {
            return Err(ConfigError::ZeroCount {
                field: "replan_interval",
            });
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> PlannerConfig {
        PlannerConfig {
            safety_margin: 10.0,
            sample_count: 200,
            max_connection_distance: 200.0,
            max_expansions: 100,
            fine_approach_distance: 100.0,
            arrival_tolerance: 10.0,
            replan_interval: 25,
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        Err(ConfigError::NotFinite { field })
    } else if value < 0.0 {
        Err(ConfigError::Negative { field, value })
    } else {
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    non_negative(field, value)?;
    if value == 0.0 {
        Err(ConfigError::NonPositive { field, value })
    } else {
        Ok(())
    }
}
