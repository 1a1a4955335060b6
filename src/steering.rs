use crate::{world::WorldQuery, MotionCommand, Point};

/// The gains of a proportional-derivative controller
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gains {
    /// how strongly the offset to the target pulls
    pub kp: f64,
    /// how strongly the current velocity is damped
    pub kv: f64,
    /// the length the resulting acceleration is clamped to
    pub max_acceleration: f64,
}

impl Gains {
    /// Creates critically damped Gains, with `kv = 2 * sqrt(kp)`.
    pub fn critically_damped(kp: f64, max_acceleration: f64) -> Gains {
        Gains {
            kp,
            kv: 2.0 * kp.sqrt(),
            max_acceleration,
        }
    }

    fn accelerate(&self, offset: Point, velocity: Point) -> Point {
        (offset * self.kp - velocity * self.kv).clamp_length_max(self.max_acceleration)
    }
}

/// Turns [`MotionCommand`]s into accelerations.
///
/// `Approach` uses the `approach` Gains, `FineApproach` the gentler `fine` Gains and `Idle`
/// only brakes.
///
/// ## Examples
/// ```
/// # use toroidal_planner::prelude::*;
/// let world = ToroidalWorld::new(1000.0, 1000.0).unwrap();
/// let steering = Steering::default();
///
/// // the target is closer across the edge of the board
/// let command = MotionCommand::Approach(Point::new(990.0, 500.0));
/// let acceleration = steering.steer(&world, command, Point::new(10.0, 500.0), Point::ZERO);
///
/// assert!(acceleration.x < 0.0);
/// assert!(acceleration.length() <= steering.approach.max_acceleration);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Steering {
    /// used for [`Approach`](MotionCommand::Approach)
    pub approach: Gains,
    /// used for [`FineApproach`](MotionCommand::FineApproach) and for braking
    pub fine: Gains,
}

impl Default for Steering {
    fn default() -> Steering {
        Steering {
            approach: Gains::critically_damped(0.6, 30.0),
            fine: Gains::critically_damped(0.3, 10.0),
        }
    }
}

impl Steering {
    /// Computes the acceleration that carries an agent at `position`, moving with `velocity`,
    /// toward the target of `command`.
    pub fn steer<W: WorldQuery>(
        &self,
        world: &W,
        command: MotionCommand,
        position: Point,
        velocity: Point,
    ) -> Point {
        match command {
            MotionCommand::Idle => self.fine.accelerate(Point::ZERO, velocity),
            MotionCommand::Approach(target) => self
                .approach
                .accelerate(world.shortest_vector(position, target), velocity),
            MotionCommand::FineApproach(target) => self
                .fine
                .accelerate(world.shortest_vector(position, target), velocity),
        }
    }
}
