//! Stepped diff-steer simulation driver.

#![warn(missing_docs)]

use tracing::{debug, info};

use crate::error::SimError;
use crate::policy::ControlPolicy;
use crate::trajectory::TrajectoryLog;
use trundle_kinematics::{DiffSteer, Pose};

/// Lifecycle state of a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Constructed or reset; no steps taken yet.
    Idle,
    /// At least one step executed and the stop condition not yet met.
    Running,
    /// Terminal: the stop condition was met or the policy finished.
    Completed,
}

/// When a run stops on its own.
///
/// Both bounds optional; with neither set the simulator is unbounded and
/// only `step()`/`run_while()` may drive it (`run()` refuses, so no loop in
/// this crate can spin forever without an exit reachable by the caller).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopCondition {
    /// Complete after this many steps.
    pub max_steps: Option<u64>,
    /// Complete once elapsed simulated time reaches this many seconds.
    pub max_duration: Option<f64>,
}

impl StopCondition {
    /// No automatic stop.
    pub const fn none() -> Self {
        StopCondition {
            max_steps: None,
            max_duration: None,
        }
    }

    /// Stop after `n` steps.
    pub const fn steps(n: u64) -> Self {
        StopCondition {
            max_steps: Some(n),
            max_duration: None,
        }
    }

    /// Stop once `seconds` of simulated time have elapsed.
    pub const fn duration(seconds: f64) -> Self {
        StopCondition {
            max_steps: None,
            max_duration: Some(seconds),
        }
    }

    fn is_unbounded(&self) -> bool {
        self.max_steps.is_none() && self.max_duration.is_none()
    }

    fn met(&self, steps: u64, elapsed: f64) -> bool {
        self.max_steps.is_some_and(|n| steps >= n)
            || self.max_duration.is_some_and(|d| elapsed >= d)
    }
}

/// Owns the robot state and drives the step loop.
///
/// Strictly sequential: a step asks the policy for a command, integrates one
/// `dt` of motion, commits the new pose to the trajectory log, and only then
/// checks the stop condition. Wheel separation and `dt` are fixed at
/// construction. Rendering is someone else's job; a frontend reads
/// [`Simulator::pose`]/[`Simulator::history`] or forwards the pose returned
/// by each `step` call.
pub struct Simulator {
    model: DiffSteer,
    dt: f64,
    pose: Pose,
    initial_pose: Pose,
    history: TrajectoryLog,
    policy: Box<dyn ControlPolicy>,
    stop: StopCondition,
    state: RunState,
    steps: u64,
    elapsed: f64,
}

impl Simulator {
    /// Creates an idle simulator.
    ///
    /// # Arguments
    ///
    /// * `model` - The diff-steer kinematic model (fixes the wheel separation).
    /// * `dt` - Time step in seconds, fixed for the simulator's lifetime.
    /// * `initial_pose` - Starting pose; also the first trajectory entry.
    /// * `policy` - The active control policy.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::InvalidParameter)` if `dt` is not positive.
    pub fn new(
        model: DiffSteer,
        dt: f64,
        initial_pose: Pose,
        policy: Box<dyn ControlPolicy>,
    ) -> Result<Self, SimError> {
        if dt <= 0.0 {
            return Err(SimError::InvalidParameter("time step must be positive"));
        }
        Ok(Simulator {
            model,
            dt,
            pose: initial_pose,
            initial_pose,
            history: TrajectoryLog::new(initial_pose),
            policy,
            stop: StopCondition::none(),
            state: RunState::Idle,
            steps: 0,
            elapsed: 0.0,
        })
    }

    /// Sets when the run stops on its own. May be changed while idle only.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::InvalidParameter)` once stepping has begun.
    pub fn set_stop_condition(&mut self, stop: StopCondition) -> Result<(), SimError> {
        if self.state != RunState::Idle {
            return Err(SimError::InvalidParameter(
                "stop condition can only change while idle",
            ));
        }
        self.stop = stop;
        Ok(())
    }

    /// Swaps the active policy. Valid only before a run begins.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::InvalidParameter)` once stepping has begun.
    pub fn set_policy(&mut self, policy: Box<dyn ControlPolicy>) -> Result<(), SimError> {
        if self.state != RunState::Idle {
            return Err(SimError::InvalidParameter(
                "policy can only be swapped while idle",
            ));
        }
        self.policy = policy;
        Ok(())
    }

    /// Executes one simulation step and returns the new pose.
    ///
    /// Transitions `Idle -> Running` on the first call and
    /// `Running -> Completed` when the stop condition is met or the policy
    /// reports it finished.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::AlreadyCompleted)` in the `Completed` state;
    /// kinematics errors propagate unchanged.
    pub fn step(&mut self) -> Result<Pose, SimError> {
        if self.state == RunState::Completed {
            return Err(SimError::AlreadyCompleted);
        }
        self.state = RunState::Running;

        let command = self.policy.decide(&self.pose, self.elapsed);
        self.pose = self.model.step(self.pose, command, self.dt)?;
        self.history.record(self.pose);
        self.steps += 1;
        self.elapsed = self.steps as f64 * self.dt;

        if self.stop.met(self.steps, self.elapsed) || self.policy.finished() {
            self.state = RunState::Completed;
            info!(
                steps = self.steps,
                elapsed = self.elapsed,
                "simulation completed"
            );
        } else {
            debug!(steps = self.steps, pose = %self.pose, "step committed");
        }

        Ok(self.pose)
    }

    /// Steps until the run completes.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::NoStopCondition)` when neither a step nor a
    /// duration bound is configured (an unbounded run must be driven
    /// externally, through `step()` or [`Simulator::run_while`]).
    pub fn run(&mut self) -> Result<(), SimError> {
        if self.stop.is_unbounded() {
            return Err(SimError::NoStopCondition);
        }
        while self.state != RunState::Completed {
            self.step()?;
        }
        Ok(())
    }

    /// Steps until the run completes or `keep_going` returns false.
    ///
    /// The cancellation hook is polled between steps with the latest pose and
    /// step count; a step itself is never interrupted.
    pub fn run_while(
        &mut self,
        mut keep_going: impl FnMut(&Pose, u64) -> bool,
    ) -> Result<(), SimError> {
        while self.state != RunState::Completed && keep_going(&self.pose, self.steps) {
            self.step()?;
        }
        Ok(())
    }

    /// Returns to `Idle`, clearing the trajectory back to a single entry.
    ///
    /// With `new_pose` the simulator restarts from it; otherwise from the
    /// pose given at construction.
    pub fn reset(&mut self, new_pose: Option<Pose>) {
        let start = new_pose.unwrap_or(self.initial_pose);
        self.pose = start;
        self.initial_pose = start;
        self.history.reset(start);
        self.state = RunState::Idle;
        self.steps = 0;
        self.elapsed = 0.0;
        info!(pose = %start, "simulator reset");
    }

    /// Read-only view of the trajectory so far.
    pub fn history(&self) -> &TrajectoryLog {
        &self.history
    }

    /// The current pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Steps executed since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated seconds elapsed since construction or the last reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// The fixed time step (s).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The kinematic model in use.
    pub fn model(&self) -> DiffSteer {
        self.model
    }
}
