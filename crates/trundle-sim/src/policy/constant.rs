//! Fixed wheel-command policy.

#![warn(missing_docs)]

use super::ControlPolicy;
use trundle_kinematics::{Pose, WheelCommand};

/// Policy that returns the same wheel command every step.
///
/// Never finishes on its own; the simulator's step/duration limit is what
/// ends a run under this policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCommand {
    command: WheelCommand,
}

impl ConstantCommand {
    /// Creates a policy that always commands the given wheel speeds.
    pub const fn new(command: WheelCommand) -> Self {
        ConstantCommand { command }
    }

    /// The fixed command.
    pub fn command(&self) -> WheelCommand {
        self.command
    }
}

impl ControlPolicy for ConstantCommand {
    fn decide(&mut self, _pose: &Pose, _elapsed: f64) -> WheelCommand {
        self.command
    }
}
