#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for 2D differential-drive (diff-steer) robot kinematics."]
#![doc = ""]
#![doc = "This crate provides the pose and wheel-command value types and the discrete-time"]
#![doc = "integration step that turns left/right wheel speeds into a new pose."]

use core::f64::consts::PI;
use core::fmt;
use libm::{cos, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::KinematicsError;

/// A 2‑D pose `(x, y, θ)` in meters and radians (θ measured counter‑clockwise
/// from the x‑axis in the world frame).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World‑frame x position (m).
    pub x: f64,
    /// World‑frame y position (m).
    pub y: f64,
    /// Heading (rad), normalized to `(-PI, PI]`.
    pub theta: f64,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: World-frame x position in meters.
    /// * `y`: World-frame y position in meters.
    /// * `theta`: Heading in radians.
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose { x, y, theta }
    }

    /// Normalize an angle to be within `(-PI, PI]`.
    ///
    /// Angles at `-PI` will be normalized to `PI`.
    ///
    /// # Arguments
    ///
    /// * `angle`: The angle in radians to normalize.
    ///
    /// # Returns
    ///
    /// The normalized angle in radians.
    pub fn normalize_angle(angle: f64) -> f64 {
        let a = angle % (2.0 * PI);
        if a > PI {
            a - 2.0 * PI
        } else if a <= -PI {
            a + 2.0 * PI
        } else {
            a
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.2}, y: {:.2}, θ: {:.2} rad)", self.x, self.y, self.theta)
    }
}

/// Left and right wheel linear speeds.
///
/// These are ground-contact speeds in m/s, not wheel angular rates; use
/// [`WheelCommand::from_wheel_angular`] to convert measured shaft speeds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelCommand {
    /// Left wheel linear speed (m/s).
    pub left: f64,
    /// Right wheel linear speed (m/s).
    pub right: f64,
}

impl WheelCommand {
    /// Construct a wheel command.
    ///
    /// # Arguments
    ///
    /// * `left`: Left wheel linear speed (m/s).
    /// * `right`: Right wheel linear speed (m/s).
    pub const fn new(left: f64, right: f64) -> Self {
        WheelCommand { left, right }
    }

    /// Construct a wheel command from wheel angular rates and a wheel radius.
    ///
    /// # Arguments
    ///
    /// * `omega_l`: Left wheel angular velocity (rad/s).
    /// * `omega_r`: Right wheel angular velocity (rad/s).
    /// * `wheel_radius`: Wheel radius (m).
    pub fn from_wheel_angular(omega_l: f64, omega_r: f64, wheel_radius: f64) -> Self {
        WheelCommand {
            left: omega_l * wheel_radius,
            right: omega_r * wheel_radius,
        }
    }
}

impl fmt::Display for WheelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(vL: {:.2} m/s, vR: {:.2} m/s)", self.left, self.right)
    }
}

/// Linear and angular chassis velocities.
/// These represent the overall motion of the robot's chassis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisSpeeds {
    /// Linear speed of the chassis center (m/s).
    pub v: f64,
    /// Angular speed of the chassis (rad/s).
    pub omega: f64,
}

impl ChassisSpeeds {
    /// Construct chassis speeds.
    ///
    /// # Arguments
    ///
    /// * `v`: Linear speed of the chassis center (m/s).
    /// * `omega`: Angular speed of the chassis (rad/s).
    pub const fn new(v: f64, omega: f64) -> Self {
        ChassisSpeeds { v, omega }
    }
}

impl fmt::Display for ChassisSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(v: {:.2} m/s, ω: {:.2} rad/s)", self.v, self.omega)
    }
}

/// Differential‑drive (diff-steer) kinematic model.
///
/// This struct encapsulates the single geometric parameter of a diff-steer
/// vehicle (the separation between its two drive wheels) and provides the
/// pure integration step plus forward/inverse velocity conversions. It holds
/// no simulation state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffSteer {
    /// Wheel separation (m).
    wheel_separation: f64,
}

impl DiffSteer {
    /// Construct a new diff-steer kinematic model.
    ///
    /// # Arguments
    ///
    /// * `wheel_separation`: The distance between the two drive wheels in meters.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidWheelSeparation)` if `wheel_separation`
    /// is not positive.
    pub const fn new(wheel_separation: f64) -> Result<Self, KinematicsError> {
        if wheel_separation <= 0.0 {
            return Err(KinematicsError::InvalidWheelSeparation("must be positive"));
        }
        Ok(DiffSteer { wheel_separation })
    }

    /// Returns the wheel separation.
    pub fn wheel_separation(&self) -> f64 {
        self.wheel_separation
    }

    /// Calculates the robot's chassis speeds (linear and angular velocity)
    /// from a wheel command. This is the forward kinematics problem.
    ///
    /// # Arguments
    ///
    /// * `command`: The commanded left and right wheel linear speeds.
    ///
    /// # Returns
    ///
    /// The resulting linear and angular velocities of the robot chassis.
    pub fn forward_kinematics(&self, command: WheelCommand) -> ChassisSpeeds {
        let v = (command.right + command.left) / 2.0;
        let omega = (command.right - command.left) / self.wheel_separation;

        ChassisSpeeds::new(v, omega)
    }

    /// Calculates the wheel command required to achieve the given chassis speeds.
    /// This is the inverse kinematics problem.
    ///
    /// # Arguments
    ///
    /// * `chassis_speeds`: The desired linear and angular velocities of the robot chassis.
    ///
    /// # Returns
    ///
    /// The required left and right wheel linear speeds.
    pub fn inverse_kinematics(&self, chassis_speeds: ChassisSpeeds) -> WheelCommand {
        let right = chassis_speeds.v + chassis_speeds.omega * (self.wheel_separation / 2.0);
        let left = chassis_speeds.v - chassis_speeds.omega * (self.wheel_separation / 2.0);

        WheelCommand::new(left, right)
    }

    /// Integrates one time-step of motion, producing the new pose.
    ///
    /// Integration scheme: midpoint Euler. The translation over `dt` is
    /// evaluated at the midpoint heading `θ + ω·dt/2` rather than the
    /// starting heading, which gives a second-order-accurate arc
    /// approximation for the same `dt`. The final heading is normalized to
    /// `(-PI, PI]`.
    ///
    /// Deterministic: identical inputs always yield identical outputs.
    ///
    /// # Arguments
    ///
    /// * `current_pose`: The robot's current pose `(x, y, theta)`.
    /// * `command`: The left and right wheel linear speeds applied over the step.
    /// * `dt`: The time step in seconds over which the speeds are applied.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidTimeStep)` if `dt` is not positive.
    ///
    /// # Returns
    ///
    /// The robot's new pose.
    pub fn step(
        &self,
        current_pose: Pose,
        command: WheelCommand,
        dt: f64,
    ) -> Result<Pose, KinematicsError> {
        if dt <= 0.0 {
            return Err(KinematicsError::InvalidTimeStep("must be positive"));
        }

        let ChassisSpeeds { v, omega } = self.forward_kinematics(command);

        let theta_mid = current_pose.theta + omega * dt / 2.0;
        let delta_x = v * cos(theta_mid) * dt;
        let delta_y = v * sin(theta_mid) * dt;

        Ok(Pose {
            x: current_pose.x + delta_x,
            y: current_pose.y + delta_y,
            theta: Pose::normalize_angle(current_pose.theta + omega * dt),
        })
    }
}

impl fmt::Display for DiffSteer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiffSteer (W: {:.2} m)", self.wheel_separation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_pose_normalization() {
        assert!((Pose::normalize_angle(0.0) - 0.0).abs() < EPSILON);
        assert!((Pose::normalize_angle(PI) - PI).abs() < EPSILON); // PI stays PI for (-PI, PI]
        assert!((Pose::normalize_angle(-PI) - PI).abs() < EPSILON); // -PI maps to PI
        assert!((Pose::normalize_angle(PI - EPSILON) - (PI - EPSILON)).abs() < EPSILON);
        assert!((Pose::normalize_angle(3.0 * PI) - PI).abs() < EPSILON);
        assert!((Pose::normalize_angle(2.5 * PI) - 0.5 * PI).abs() < EPSILON);
        assert!((Pose::normalize_angle(-2.5 * PI) - -0.5 * PI).abs() < EPSILON);
        assert!((Pose::normalize_angle(-3.0 * PI) - PI).abs() < EPSILON);
        assert!((Pose::normalize_angle(-2.0) - -2.0).abs() < EPSILON); // already in range
    }

    #[test]
    fn test_model_constructor() {
        let model = DiffSteer::new(0.5).unwrap();
        assert_eq!(model.wheel_separation, 0.5);
        assert_eq!(model.wheel_separation(), 0.5); // Test getter
    }

    #[test]
    fn test_constructor_invalid_separation() {
        let result = DiffSteer::new(0.0);
        assert!(matches!(
            result,
            Err(KinematicsError::InvalidWheelSeparation("must be positive"))
        ));
        let result_negative = DiffSteer::new(-0.5);
        assert!(matches!(
            result_negative,
            Err(KinematicsError::InvalidWheelSeparation("must be positive"))
        ));
    }

    #[test]
    fn test_forward_kinematics_straight() {
        let model = DiffSteer::new(0.5).unwrap(); // W=0.5m
        let command = WheelCommand::new(1.0, 1.0); // Both wheels 1 m/s
        // v = (1 + 1) / 2 = 1 m/s
        // omega = (1 - 1) / 0.5 = 0 rad/s
        let chassis_speeds = model.forward_kinematics(command);
        assert!((chassis_speeds.v - 1.0).abs() < EPSILON);
        assert!((chassis_speeds.omega - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_forward_kinematics_pivot_turn() {
        let model = DiffSteer::new(0.5).unwrap(); // W=0.5m
        let command = WheelCommand::new(-0.5, 0.5); // Left -0.5 m/s, Right 0.5 m/s
        // v = (0.5 + (-0.5)) / 2 = 0 m/s
        // omega = (0.5 - (-0.5)) / 0.5 = 1 / 0.5 = 2 rad/s
        let chassis_speeds = model.forward_kinematics(command);
        assert!((chassis_speeds.v - 0.0).abs() < EPSILON);
        assert!((chassis_speeds.omega - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_forward_kinematics_gentle_turn() {
        let model = DiffSteer::new(0.5).unwrap(); // W=0.5m
        let command = WheelCommand::new(0.5, 1.0); // Left 0.5 m/s, Right 1.0 m/s
        // v = (1.0 + 0.5) / 2 = 0.75 m/s
        // omega = (1.0 - 0.5) / 0.5 = 0.5 / 0.5 = 1 rad/s
        let chassis_speeds = model.forward_kinematics(command);
        assert!((chassis_speeds.v - 0.75).abs() < EPSILON);
        assert!((chassis_speeds.omega - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_inverse_kinematics_round_trip() {
        let model = DiffSteer::new(0.5).unwrap(); // W=0.5m
        let chassis_speeds = ChassisSpeeds::new(0.75, 1.0); // 0.75 m/s, 1.0 rad/s
        // right = 0.75 + (1.0 * 0.5) / 2.0 = 0.75 + 0.25 = 1.0
        // left  = 0.75 - (1.0 * 0.5) / 2.0 = 0.75 - 0.25 = 0.5
        let command = model.inverse_kinematics(chassis_speeds);
        assert!((command.left - 0.5).abs() < EPSILON);
        assert!((command.right - 1.0).abs() < EPSILON);

        let recovered = model.forward_kinematics(command);
        assert!((recovered.v - chassis_speeds.v).abs() < EPSILON);
        assert!((recovered.omega - chassis_speeds.omega).abs() < EPSILON);
    }

    #[test]
    fn test_wheel_command_from_angular() {
        // robot with 0.042 m wheels spinning at 2 rad/s moves each wheel at 0.084 m/s
        let command = WheelCommand::from_wheel_angular(2.0, -4.0, 0.042);
        assert!((command.left - 0.084).abs() < EPSILON);
        assert!((command.right - -0.168).abs() < EPSILON);
    }

    #[test]
    fn test_step_stationary() {
        let model = DiffSteer::new(1.0).unwrap();
        let pose = Pose::new(3.0, -2.0, 0.7);
        let new_pose = model.step(pose, WheelCommand::new(0.0, 0.0), 0.1).unwrap();
        assert!((new_pose.x - 3.0).abs() < EPSILON);
        assert!((new_pose.y - -2.0).abs() < EPSILON);
        assert!((new_pose.theta - 0.7).abs() < EPSILON);
    }

    #[test]
    fn test_step_straight_along_y() {
        let model = DiffSteer::new(1.0).unwrap();
        let pose = Pose::new(0.0, 0.0, PI / 2.0); // Facing along +Y
        // v = (2 + 2) / 2 = 2 m/s, omega = 0
        // Expected: x = 0, y = 0 + 2*1 = 2, theta = PI/2
        let new_pose = model.step(pose, WheelCommand::new(2.0, 2.0), 1.0).unwrap();
        assert!((new_pose.x - 0.0).abs() < EPSILON);
        assert!((new_pose.y - 2.0).abs() < EPSILON);
        assert!((new_pose.theta - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_step_straight_advances_along_heading() {
        let model = DiffSteer::new(0.5).unwrap();
        let pose = Pose::new(1.0, 1.0, PI / 4.0);
        let v = 0.8;
        let dt = 0.25;
        let new_pose = model.step(pose, WheelCommand::new(v, v), dt).unwrap();
        // Equal wheel speeds: heading unchanged, position advances by v*dt along it
        assert!((new_pose.theta - PI / 4.0).abs() < EPSILON);
        assert!((new_pose.x - (1.0 + v * dt * (PI / 4.0).cos())).abs() < EPSILON);
        assert!((new_pose.y - (1.0 + v * dt * (PI / 4.0).sin())).abs() < EPSILON);
    }

    #[test]
    fn test_step_pivot_turn_in_place() {
        let model = DiffSteer::new(1.0).unwrap();
        let pose = Pose::new(0.0, 0.0, 0.0);
        // v = (2 + (-2)) / 2... here (1, -1): v = 0, omega = (-1 - 1) / 1 = -2 rad/s
        let new_pose = model.step(pose, WheelCommand::new(1.0, -1.0), 1.0).unwrap();
        assert!((new_pose.x - 0.0).abs() < EPSILON);
        assert!((new_pose.y - 0.0).abs() < EPSILON);
        assert!((new_pose.theta - -2.0).abs() < EPSILON);
    }

    #[test]
    fn test_step_heading_stays_normalized() {
        let model = DiffSteer::new(1.0).unwrap();
        let mut pose = Pose::new(0.0, 0.0, 0.0);
        let command = WheelCommand::new(-0.5, 0.5); // omega = 1 rad/s
        for _ in 0..100 {
            pose = model.step(pose, command, 0.5).unwrap();
            assert!(pose.theta > -PI && pose.theta <= PI);
        }
    }

    #[test]
    fn test_step_invalid_dt() {
        let model = DiffSteer::new(1.0).unwrap();
        let pose = Pose::new(0.0, 0.0, 0.0);
        let result = model.step(pose, WheelCommand::new(1.0, 1.0), 0.0);
        assert!(matches!(
            result,
            Err(KinematicsError::InvalidTimeStep("must be positive"))
        ));
        let result_negative = model.step(pose, WheelCommand::new(1.0, 1.0), -0.1);
        assert!(matches!(
            result_negative,
            Err(KinematicsError::InvalidTimeStep("must be positive"))
        ));
    }

    /// Integrate a constant command over `total` seconds in `n` equal substeps.
    fn integrate(model: &DiffSteer, start: Pose, command: WheelCommand, total: f64, n: u32) -> Pose {
        let dt = total / f64::from(n);
        let mut pose = start;
        for _ in 0..n {
            pose = model.step(pose, command, dt).unwrap();
        }
        pose
    }

    #[test]
    fn test_substep_consistency() {
        // Constant (v, omega) traces an exact circular arc:
        //   x(t) = x0 + v/omega * (sin(theta0 + omega*t) - sin(theta0))
        //   y(t) = y0 - v/omega * (cos(theta0 + omega*t) - cos(theta0))
        // The midpoint scheme must converge to it as the substep count grows.
        let model = DiffSteer::new(1.0).unwrap();
        let start = Pose::new(0.0, 0.0, 0.0);
        let command = WheelCommand::new(0.5, 1.5); // v = 1, omega = 1
        let total: f64 = 1.0;

        let exact_x = 1.0 * (total.sin() - 0.0);
        let exact_y = -1.0 * (total.cos() - 1.0);

        let error = |pose: Pose| ((pose.x - exact_x).powi(2) + (pose.y - exact_y).powi(2)).sqrt();

        let coarse = error(integrate(&model, start, command, total, 1));
        let medium = error(integrate(&model, start, command, total, 10));
        let fine = error(integrate(&model, start, command, total, 100));

        assert!(medium < coarse);
        assert!(fine < medium);
        assert!(fine < 1e-4);
    }

    #[test]
    fn test_step_matches_forward_kinematics() {
        let model = DiffSteer::new(0.12).unwrap(); // narrow robot, robot_wheel scale
        let pose = Pose::new(0.0, 0.0, PI / 2.0);
        let command = WheelCommand::from_wheel_angular(2.0, -4.0, 0.042);
        let speeds = model.forward_kinematics(command);
        let dt = 0.5;

        let stepped = model.step(pose, command, dt).unwrap();
        let theta_mid = pose.theta + speeds.omega * dt / 2.0;
        assert!((stepped.x - (pose.x + speeds.v * theta_mid.cos() * dt)).abs() < EPSILON);
        assert!((stepped.y - (pose.y + speeds.v * theta_mid.sin() * dt)).abs() < EPSILON);
        assert!(
            (stepped.theta - Pose::normalize_angle(pose.theta + speeds.omega * dt)).abs() < EPSILON
        );
    }
}
