use trundle_kinematics::*;

fn main() {
    let wheel_separation = 0.5;
    let model_result = DiffSteer::new(wheel_separation);

    let mut current_pose = Pose::new(0.0, 0.0, 0.0);
    let command = WheelCommand::new(1.0, 1.0); // both wheels 1.0 m/s: straight ahead
    let dt = 0.1; // Time step in seconds
    let num_steps = 10;

    match model_result {
        Ok(model) => {
            println!("Initializing simulation...");
            println!("  Diff-Steer Parameters:");
            println!("    Wheel Separation: {} m", model.wheel_separation());
            println!("  Initial State:");
            println!("    Pose:    {:?}", current_pose);
            println!("    Command: {:?}", command);
            println!("  Simulation Settings:");
            println!("    Time Step: {} s", dt);
            println!("    Num Steps: {}", num_steps);
            println!("\nSimulating...");

            for i in 0..num_steps {
                match model.step(current_pose, command, dt) {
                    Ok(new_pose) => {
                        current_pose = new_pose;
                        println!("Step {:>2}: Pose: {}", i + 1, current_pose);
                    }
                    Err(e) => {
                        eprintln!("Error during simulation step {}: {:?}", i + 1, e);
                        break; // Stop loop on error
                    }
                }
            }

            println!("\nSimulation complete.");
            println!("Final Pose: {:?}", current_pose);
        }
        Err(e) => {
            eprintln!("Failed to initialize kinematics: {:?}", e);
            eprintln!(
                "Please ensure wheel_separation ({}) is positive.",
                wheel_separation
            );
        }
    }
}
