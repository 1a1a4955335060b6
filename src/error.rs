use thiserror::Error;

/// Errors from validating a [`PlannerConfig`](crate::PlannerConfig) or a
/// [`ToroidalWorld`](crate::world::ToroidalWorld).
///
/// Planning itself never fails with an error: a missing Path is reported as `None` and an
/// exhausted [`PathFollower`](crate::PathFollower) simply idles.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A distance that may be zero but not negative was negative
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// the name of the offending field
        field: &'static str,
        /// the rejected value
        value: f64,
    },
    /// A distance that has to be strictly positive was zero
    #[error("`{field}` must be greater than zero, got {value}")]
    NonPositive {
        /// the name of the offending field
        field: &'static str,
        /// the rejected value
        value: f64,
    },
    /// A distance was NaN or infinite
    #[error("`{field}` must be a finite number")]
    NotFinite {
        /// the name of the offending field
        field: &'static str,
    },
    /// A count that is used as a divisor was zero
    #[error("`{field}` must be at least 1")]
    ZeroCount {
        /// the name of the offending field
        field: &'static str,
    },
    /// The board of a world had no area
    #[error("the board must have a positive, finite size, got {width} x {height}")]
    InvalidBoard {
        /// the requested width
        width: f64,
        /// the requested height
        height: f64,
    },
}
