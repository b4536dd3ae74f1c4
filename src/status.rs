use parking_lot::RwLock;
use std::{sync::Arc, time::Instant};

use trundle_kinematics::Pose;
use trundle_sim::RunState;

/// Snapshot of the simulation thread's progress, shared with the draw loop.
#[derive(Clone)]
pub struct SimStatus {
    pub pose: Pose,
    pub steps: u64,
    pub elapsed: f64,
    pub state: RunState,
    pub last_step_ts: Instant,
    pub faults: Vec<String>,
}

impl Default for SimStatus {
    fn default() -> Self {
        SimStatus {
            pose: Pose::default(),
            steps: 0,
            elapsed: 0.0,
            state: RunState::Idle,
            last_step_ts: Instant::now(),
            faults: Vec::new(),
        }
    }
}

pub type StatusBoard = Arc<RwLock<SimStatus>>;

pub fn snapshot(board: &StatusBoard) -> SimStatus {
    (*board.read()).clone()
}

pub fn touch_step(board: &StatusBoard, pose: Pose, steps: u64, elapsed: f64, state: RunState) {
    let mut g = board.write();
    g.pose = pose;
    g.steps = steps;
    g.elapsed = elapsed;
    g.state = state;
    g.last_step_ts = Instant::now();
}

pub fn raise_fault(board: &StatusBoard, msg: &str) {
    let mut g = board.write();
    if !g.faults.iter().any(|s| s == msg) {
        g.faults.push(msg.to_string());
    }
}
