//! Drives a repeating open-loop command sequence and prints the trajectory:
//! straight, hard turn, straight, five times over.

use trundle_sim::{ControlPolicy, DiffSteer, Pose, Simulator, StopCondition, WheelCommand};

/// Cycles through a fixed command list, one command per step.
struct CommandSequence {
    commands: Vec<WheelCommand>,
    next: usize,
}

impl ControlPolicy for CommandSequence {
    fn decide(&mut self, _pose: &Pose, _elapsed: f64) -> WheelCommand {
        let command = self.commands[self.next % self.commands.len()];
        self.next += 1;
        command
    }
}

fn main() {
    let model = DiffSteer::new(1.0).unwrap();
    let policy = CommandSequence {
        commands: vec![
            WheelCommand::new(2.0, 2.0),
            WheelCommand::new(4.0, -4.0),
            WheelCommand::new(2.0, 2.0),
        ],
        next: 0,
    };
    let times = 5;

    let mut sim = Simulator::new(
        model,
        0.1,
        Pose::new(0.0, 0.0, std::f64::consts::FRAC_PI_2),
        Box::new(policy),
    )
    .unwrap();
    sim.set_stop_condition(StopCondition::steps(3 * times)).unwrap();
    sim.run().unwrap();

    for (i, pose) in sim.history().iter().enumerate() {
        println!("{:>3}: {}", i, pose);
    }
    println!("Final pose: {}", sim.pose());
}
