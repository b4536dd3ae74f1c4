//! Control policies: strategies producing a wheel command each step.
//!
//! A policy only ever sees a read-only pose and the elapsed simulated time;
//! it owns whatever private state it needs (a target, a random source) but
//! never a handle into the simulator.

#![warn(missing_docs)]

use trundle_kinematics::{Pose, WheelCommand};

mod constant;
mod random_waypoint;

pub use constant::ConstantCommand;
pub use random_waypoint::{RandomWaypoint, RandomWaypointConfig};

/// Strategy producing wheel speed commands from the current state.
///
/// `decide` is called exactly once per step, before integration. A policy may
/// mutate only its own state; the pose it receives is a snapshot.
pub trait ControlPolicy: Send {
    /// Produces the wheel command to apply over the next time step.
    ///
    /// # Arguments
    ///
    /// * `pose` - The robot's current pose (read-only snapshot).
    /// * `elapsed` - Simulated time in seconds since the run started.
    fn decide(&mut self, pose: &Pose, elapsed: f64) -> WheelCommand;

    /// Whether the policy considers its work done.
    ///
    /// Checked after every step; a `true` return completes the run. The
    /// default is an unbounded policy that relies on the simulator's
    /// max-steps/max-duration stop condition.
    fn finished(&self) -> bool {
        false
    }
}
