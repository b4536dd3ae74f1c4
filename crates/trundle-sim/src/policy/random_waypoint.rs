//! Random waypoint-seeking policy.

#![warn(missing_docs)]

use std::f64::consts::FRAC_PI_2;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::ControlPolicy;
use crate::error::SimError;
use crate::map::Workspace;
use trundle_kinematics::{ChassisSpeeds, DiffSteer, Pose, WheelCommand};

/// Target redraws give up on the too-close rejection test after this many
/// attempts, so a tiny workspace cannot stall target generation.
const MAX_REDRAW_ATTEMPTS: u32 = 16;

/// Construction parameters for [`RandomWaypoint`].
///
/// `speed` is the single intensity knob: it sets the cruise speed directly
/// and the remaining defaults are expressed in terms of it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomWaypointConfig {
    /// Rectangle targets are drawn from.
    pub workspace: Workspace,
    /// Seed for the policy's private random source. Runs with the same seed
    /// and workspace reproduce the same command sequence.
    pub seed: u64,
    /// Forward cruise speed (m/s).
    pub speed: f64,
    /// Distance below which the current target counts as reached (m).
    pub reached_tolerance: f64,
    /// Redrawn targets closer than this to the current pose are rejected (m).
    pub min_target_distance: f64,
    /// Proportional gain turning heading error into angular velocity.
    pub steering_gain: f64,
    /// Per-wheel speed limit applied to the final command (m/s).
    pub max_wheel_speed: f64,
}

impl RandomWaypointConfig {
    /// Creates a config with defaults scaled off a unit cruise speed.
    pub fn new(workspace: Workspace, seed: u64) -> Self {
        RandomWaypointConfig {
            workspace,
            seed,
            speed: 1.0,
            reached_tolerance: 0.5,
            min_target_distance: 1.0,
            steering_gain: 2.0,
            max_wheel_speed: 2.0,
        }
    }
}

/// Policy that wanders between uniformly drawn waypoints.
///
/// On construction an initial target is drawn inside the workspace from a
/// seeded random source. Each `decide` steers toward the target with a
/// proportional law (fixed forward speed, differential term proportional to
/// heading error, clamped per wheel); once the target is within
/// `reached_tolerance` a fresh one is drawn, rejecting candidates closer
/// than `min_target_distance` to the robot. Unbounded: it never reports
/// `finished`, so a run under this policy ends at the simulator's
/// step/duration limit.
pub struct RandomWaypoint {
    model: DiffSteer,
    config: RandomWaypointConfig,
    rng: StdRng,
    target: (f64, f64),
}

impl RandomWaypoint {
    /// Creates the policy and draws its initial target.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::InvalidParameter)` if `speed`,
    /// `reached_tolerance`, `steering_gain`, or `max_wheel_speed` is not
    /// positive, or `min_target_distance` is negative.
    pub fn new(model: DiffSteer, config: RandomWaypointConfig) -> Result<Self, SimError> {
        if config.speed <= 0.0 {
            return Err(SimError::InvalidParameter("speed must be positive"));
        }
        if config.reached_tolerance <= 0.0 {
            return Err(SimError::InvalidParameter(
                "reached tolerance must be positive",
            ));
        }
        if config.min_target_distance < 0.0 {
            return Err(SimError::InvalidParameter(
                "min target distance must be non-negative",
            ));
        }
        if config.steering_gain <= 0.0 {
            return Err(SimError::InvalidParameter("steering gain must be positive"));
        }
        if config.max_wheel_speed <= 0.0 {
            return Err(SimError::InvalidParameter(
                "max wheel speed must be positive",
            ));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let target = Self::draw_target(&mut rng, &config.workspace);
        debug!(x = target.0, y = target.1, "initial waypoint drawn");

        Ok(RandomWaypoint {
            model,
            config,
            rng,
            target,
        })
    }

    /// The waypoint currently being pursued.
    pub fn target(&self) -> (f64, f64) {
        self.target
    }

    fn draw_target(rng: &mut StdRng, workspace: &Workspace) -> (f64, f64) {
        (
            rng.random_range(workspace.x_min..workspace.x_max),
            rng.random_range(workspace.y_min..workspace.y_max),
        )
    }

    fn retarget(&mut self, pose: &Pose) {
        for _ in 0..MAX_REDRAW_ATTEMPTS {
            let candidate = Self::draw_target(&mut self.rng, &self.config.workspace);
            let dx = candidate.0 - pose.x;
            let dy = candidate.1 - pose.y;
            if (dx * dx + dy * dy).sqrt() >= self.config.min_target_distance {
                self.target = candidate;
                debug!(x = candidate.0, y = candidate.1, "new waypoint drawn");
                return;
            }
        }
        // Workspace too small for the rejection distance; take the last draw.
        self.target = Self::draw_target(&mut self.rng, &self.config.workspace);
        debug!(
            x = self.target.0,
            y = self.target.1,
            "new waypoint drawn without distance rejection"
        );
    }
}

impl ControlPolicy for RandomWaypoint {
    fn decide(&mut self, pose: &Pose, _elapsed: f64) -> WheelCommand {
        let (mut dx, mut dy) = (self.target.0 - pose.x, self.target.1 - pose.y);
        if (dx * dx + dy * dy).sqrt() < self.config.reached_tolerance {
            self.retarget(pose);
            dx = self.target.0 - pose.x;
            dy = self.target.1 - pose.y;
        }

        let heading_error = Pose::normalize_angle(dy.atan2(dx) - pose.theta);

        // Turn in place when pointed more than 90 degrees away from the goal.
        let v = if heading_error.abs() > FRAC_PI_2 {
            0.0
        } else {
            self.config.speed
        };
        let omega = self.config.steering_gain * heading_error;

        let raw = self.model.inverse_kinematics(ChassisSpeeds::new(v, omega));
        let limit = self.config.max_wheel_speed;
        WheelCommand::new(raw.left.clamp(-limit, limit), raw.right.clamp(-limit, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_workspace() -> Workspace {
        Workspace::new(0.0, 10.0, 0.0, 10.0).unwrap()
    }

    fn test_policy(seed: u64) -> RandomWaypoint {
        let model = DiffSteer::new(1.0).unwrap();
        RandomWaypoint::new(model, RandomWaypointConfig::new(test_workspace(), seed)).unwrap()
    }

    #[test]
    fn test_initial_target_within_workspace() {
        for seed in 0..32 {
            let policy = test_policy(seed);
            let (x, y) = policy.target();
            assert!(test_workspace().contains(x, y));
        }
    }

    #[test]
    fn test_same_seed_same_commands() {
        let model = DiffSteer::new(1.0).unwrap();
        let mut a = test_policy(42);
        let mut b = test_policy(42);

        let dt = 0.1;
        let mut pose_a = Pose::new(5.0, 5.0, 0.0);
        let mut pose_b = pose_a;
        for step in 0..500 {
            let elapsed = f64::from(step) * dt;
            let cmd_a = a.decide(&pose_a, elapsed);
            let cmd_b = b.decide(&pose_b, elapsed);
            assert_eq!(cmd_a, cmd_b, "diverged at step {}", step);
            pose_a = model.step(pose_a, cmd_a, dt).unwrap();
            pose_b = model.step(pose_b, cmd_b, dt).unwrap();
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = test_policy(1).target();
        let b = test_policy(2).target();
        assert_ne!(a, b);
    }

    #[test]
    fn test_retargets_when_reached() {
        let mut policy = test_policy(7);
        let (tx, ty) = policy.target();
        // Stand exactly on the target: decide must draw a fresh one first.
        policy.decide(&Pose::new(tx, ty, 0.0), 0.0);
        let (nx, ny) = policy.target();
        assert_ne!((nx, ny), (tx, ty));
        let dist = ((nx - tx).powi(2) + (ny - ty).powi(2)).sqrt();
        assert!(dist >= 1.0, "redrawn target too close: {}", dist);
        assert!(test_workspace().contains(nx, ny));
    }

    #[test]
    fn test_turns_in_place_when_facing_away() {
        let mut policy = test_policy(3);
        let (tx, ty) = policy.target();
        // Stand 3 m to one side of the target (outside the reached
        // tolerance) and face exactly away from it.
        let px = if tx >= 5.0 { tx - 3.0 } else { tx + 3.0 };
        let away = 0.0f64.atan2(tx - px) + std::f64::consts::PI;
        let cmd = policy.decide(&Pose::new(px, ty, Pose::normalize_angle(away)), 0.0);
        // v = 0 means the wheels are equal and opposite.
        assert!((cmd.left + cmd.right).abs() < 1e-9);
    }

    #[test]
    fn test_command_respects_wheel_limit() {
        let mut policy = test_policy(11);
        for i in 0..200 {
            let pose = Pose::new(
                f64::from(i % 10),
                f64::from(i / 10 % 10),
                f64::from(i) * 0.1,
            );
            let cmd = policy.decide(&pose, f64::from(i));
            assert!(cmd.left.abs() <= 2.0 + 1e-12);
            assert!(cmd.right.abs() <= 2.0 + 1e-12);
        }
    }

    #[test]
    fn test_config_validation() {
        let model = DiffSteer::new(1.0).unwrap();
        let mut config = RandomWaypointConfig::new(test_workspace(), 0);
        config.speed = 0.0;
        assert!(matches!(
            RandomWaypoint::new(model, config),
            Err(SimError::InvalidParameter(_))
        ));

        let mut config = RandomWaypointConfig::new(test_workspace(), 0);
        config.max_wheel_speed = -1.0;
        assert!(matches!(
            RandomWaypoint::new(model, config),
            Err(SimError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_never_finishes() {
        let mut policy = test_policy(5);
        for i in 0..100 {
            policy.decide(&Pose::new(5.0, 5.0, 0.0), f64::from(i));
            assert!(!policy.finished());
        }
    }
}
