//! Wanders between seeded random waypoints and prints the visited path.
//!
//! Run twice with the same seed to see an identical trajectory.

use trundle_sim::{
    DiffSteer, Pose, RandomWaypoint, RandomWaypointConfig, Simulator, StopCondition, Workspace,
};

fn main() {
    let model = DiffSteer::new(1.0).unwrap();
    let workspace = Workspace::new(-10.0, 10.0, -10.0, 10.0).unwrap();
    let policy = RandomWaypoint::new(model, RandomWaypointConfig::new(workspace, 42)).unwrap();

    let mut sim = Simulator::new(
        model,
        0.1,
        Pose::new(0.0, 0.0, std::f64::consts::FRAC_PI_2),
        Box::new(policy),
    )
    .unwrap();
    sim.set_stop_condition(StopCondition::duration(60.0)).unwrap();
    sim.run().unwrap();

    // Print every tenth pose so the path stays readable.
    for (i, pose) in sim.history().iter().enumerate().step_by(10) {
        println!("t={:>5.1}s {}", i as f64 * sim.dt(), pose);
    }
    println!(
        "Visited {} poses over {:.1} s of simulated time.",
        sim.history().len(),
        sim.elapsed()
    );
}
