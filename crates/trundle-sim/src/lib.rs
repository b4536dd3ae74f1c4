//! Stepped simulation of a differential-drive (diff-steer) mobile robot.
//!
//! The simulator owns the current pose and the trajectory history, asks a
//! pluggable [`ControlPolicy`] for a wheel command each step, and integrates
//! the motion with the pure kinematic model from `trundle-kinematics`.
//! Everything here is single-threaded and deterministic given a policy seed;
//! rendering and map loading live with the frontend, which only consumes the
//! pose stream and the [`shape`] / [`map`] collaborator types.

pub mod error;
pub mod map;
pub mod policy;
pub mod shape;
pub mod simulator;
pub mod trajectory;

pub use error::{ShapeError, SimError};
pub use map::{OccupancyGrid, Workspace};
pub use policy::{ConstantCommand, ControlPolicy, RandomWaypoint, RandomWaypointConfig};
pub use shape::{ShapeSpec, VehicleShape};
pub use simulator::{RunState, Simulator, StopCondition};
pub use trajectory::TrajectoryLog;

// Re-export the kinematics value types so frontends need only one import.
pub use trundle_kinematics::{ChassisSpeeds, DiffSteer, KinematicsError, Pose, WheelCommand};
