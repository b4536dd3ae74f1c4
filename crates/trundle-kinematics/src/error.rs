#![warn(missing_docs)]

//! Error types for the kinematics library.

use core::fmt;

/// Errors that can occur in kinematic calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Error for invalid wheel separation.
    /// This variant is returned when a wheel separation is provided that is not positive.
    InvalidWheelSeparation(&'static str),
    /// Error for invalid time step.
    /// This variant is returned when a non-positive time step is used for pose updates.
    InvalidTimeStep(&'static str),
}

impl core::fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidWheelSeparation(msg) => {
                write!(f, "Invalid wheel separation: {}", msg)
            }
            KinematicsError::InvalidTimeStep(msg) => write!(f, "Invalid time step: {}", msg),
        }
    }
}

impl core::error::Error for KinematicsError {}
