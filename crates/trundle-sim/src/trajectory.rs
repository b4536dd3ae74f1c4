//! Append-only pose history for a simulation run.

#![warn(missing_docs)]

use trundle_kinematics::Pose;

/// Ordered history of poses visited during a simulation run.
///
/// Entry order is time order: index 0 is the pose at construction (or the
/// last reset), and each completed step appends exactly one pose, so the
/// length is always `steps + 1`. The log is owned by the simulator and
/// exposed read-only to everything else.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryLog {
    poses: Vec<Pose>,
}

impl TrajectoryLog {
    /// Creates a log seeded with the initial pose.
    pub fn new(initial: Pose) -> Self {
        TrajectoryLog {
            poses: vec![initial],
        }
    }

    /// Appends the pose produced by a completed step.
    pub(crate) fn record(&mut self, pose: Pose) {
        self.poses.push(pose);
    }

    /// Clears the history back to a single entry.
    pub(crate) fn reset(&mut self, initial: Pose) {
        self.poses.clear();
        self.poses.push(initial);
    }

    /// The pose the run started from.
    pub fn initial(&self) -> Pose {
        self.poses[0]
    }

    /// The most recently recorded pose.
    pub fn latest(&self) -> Pose {
        // The log is never empty: it is seeded at construction and only
        // cleared through reset, which re-seeds it.
        *self.poses.last().expect("trajectory log is never empty")
    }

    /// Number of entries (steps executed + 1).
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Always false; present for clippy's `len_without_is_empty` convention.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Read-only view of the recorded poses in time order.
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Iterates over the recorded poses in time order.
    pub fn iter(&self) -> impl Iterator<Item = &Pose> {
        self.poses.iter()
    }
}
