//! This module defines the error types used by the `trundle-sim` crate.

#![warn(missing_docs)]

use trundle_kinematics::KinematicsError;

/// Error type for simulation operations.
///
/// This enum encapsulates all possible errors that can occur while
/// constructing or stepping a simulation, such as invalid parameters or
/// stepping a terminated run.
#[derive(Debug, PartialEq)]
pub enum SimError {
    /// Error for invalid construction parameters.
    /// This variant is returned when a parameter such as a workspace bound,
    /// grid dimension, or policy gain is outside its valid range.
    InvalidParameter(&'static str),
    /// Error for stepping a terminated simulator.
    /// This variant is returned when `step()` is called while the simulator
    /// is in the `Completed` state.
    AlreadyCompleted,
    /// Error for an unbounded `run()`.
    /// This variant is returned when `run()` is called with neither a maximum
    /// step count nor a maximum duration configured.
    NoStopCondition,
    /// A kinematics precondition violation surfaced during a step.
    Kinematics(KinematicsError),
}

impl core::fmt::Display for SimError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SimError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            SimError::AlreadyCompleted => {
                write!(f, "Simulator already completed; reset before stepping again")
            }
            SimError::NoStopCondition => {
                write!(f, "run() requires a max-steps or max-duration stop condition")
            }
            SimError::Kinematics(e) => write!(f, "Kinematics error: {}", e),
        }
    }
}

impl From<KinematicsError> for SimError {
    fn from(e: KinematicsError) -> Self {
        SimError::Kinematics(e)
    }
}

impl core::error::Error for SimError {}

/// Error type for vehicle shape construction.
#[derive(Debug, PartialEq)]
pub enum ShapeError {
    /// Error for an unrecognized preset shape name.
    UnknownShape(String),
    /// Error for a malformed explicit outline.
    /// This variant is returned when the point data is not an Nx2 sequence of
    /// at least three finite vertices, or the scale is not positive.
    InvalidShapeArgument(&'static str),
}

impl core::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShapeError::UnknownShape(name) => write!(f, "Unknown vehicle shape name: {}", name),
            ShapeError::InvalidShapeArgument(msg) => write!(f, "Invalid shape argument: {}", msg),
        }
    }
}

impl core::error::Error for ShapeError {}
