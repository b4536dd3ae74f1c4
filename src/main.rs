mod bus; // brings `bus.rs` in as `crate::bus`
mod graphics; // brings `graphics.rs` in as `crate::graphics`
mod settings; // brings `settings.rs` in as `crate::settings`
mod status; // brings `status.rs` in as `crate::status`

use std::sync::Arc;
use std::time::Duration;

use spin_sleep::SpinSleeper;
use tracing::{error, info, warn};
use tracing_subscriber::{self, EnvFilter};

use bus::Topic;
use graphics::window_conf; // Import window_conf directly
use settings::{MapSettings, Settings};
use status::{raise_fault, snapshot, touch_step, StatusBoard};
use trundle_sim::{
    DiffSteer, OccupancyGrid, Pose, RandomWaypoint, RandomWaypointConfig, RunState, SimError,
    Simulator, StopCondition, Workspace,
};

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Trundle (Macroquad Frontend) Started. Loading configuration and spawning simulation...");

    let settings = match settings::load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Cannot start without configuration: {}", e);
            return;
        }
    };

    let grid = match build_display_grid(&settings.map) {
        Ok(grid) => grid,
        Err(e) => {
            error!("Invalid map settings: {}", e);
            return;
        }
    };
    let shape = match settings.vehicle.shape.resolve(settings.vehicle.scale) {
        Ok(shape) => shape,
        Err(e) => {
            error!("Invalid vehicle shape settings: {}", e);
            return;
        }
    };

    let board: StatusBoard = Arc::default();
    let pose_topic: Topic<Pose> = Topic::new(64);
    let pose_rx_for_vis = pose_topic.subscribe();

    let tokio_rt = tokio::runtime::Runtime::new().unwrap();
    tokio_rt.spawn(watchdog(Arc::clone(&board)));

    info!("Spawning simulator thread...");
    let spawned = std::thread::Builder::new().name("simulator".into()).spawn({
        let board = Arc::clone(&board);
        let workspace = grid.bounds();
        let settings = settings.clone();
        let topic = pose_topic.clone();
        move || {
            info!("Simulator thread started.");
            match run_simulation(&settings, workspace, topic, &board) {
                Ok(_) => info!("Simulator thread finished successfully."),
                Err(e) => {
                    error!("Simulator thread failed: {:?}", e);
                    raise_fault(&board, &format!("simulation failed: {}", e));
                }
            }
        }
    });
    if let Err(e) = spawned {
        error!("Failed to spawn simulator thread: {}", e);
        return;
    }

    graphics::run_visualization_loop(grid, shape, pose_rx_for_vis, board).await;
}

/// Display-only occupancy grid: a wall border around an open field. The
/// simulator never queries it; its bounds double as the policy workspace.
fn build_display_grid(map: &MapSettings) -> Result<OccupancyGrid, SimError> {
    let mut grid = OccupancyGrid::new(map.width, map.height)?;
    for x in 0..map.width {
        grid.set_occupied(x, 0, true)?;
        grid.set_occupied(x, map.height - 1, true)?;
    }
    for y in 0..map.height {
        grid.set_occupied(0, y, true)?;
        grid.set_occupied(map.width - 1, y, true)?;
    }
    Ok(grid)
}

/// Steps the simulator at the configured rate, publishing each committed
/// pose. Without a stop condition in the settings the loop runs until the
/// window closes and the process exits; the simulator itself never hides an
/// unbounded loop.
fn run_simulation(
    settings: &Settings,
    workspace: Workspace,
    topic: Topic<Pose>,
    board: &StatusBoard,
) -> anyhow::Result<()> {
    let sim_settings = &settings.simulation;
    let model = DiffSteer::new(sim_settings.wheel_separation)?;

    let mut policy_config = RandomWaypointConfig::new(workspace, settings.policy.seed);
    policy_config.speed = settings.policy.speed;
    policy_config.reached_tolerance = settings.policy.reached_tolerance;
    policy_config.min_target_distance = settings.policy.min_target_distance;
    policy_config.steering_gain = settings.policy.steering_gain;
    policy_config.max_wheel_speed = settings.policy.max_wheel_speed;
    let policy = RandomWaypoint::new(model, policy_config)?;

    let initial_pose = Pose::new(
        sim_settings.initial_pose.x,
        sim_settings.initial_pose.y,
        sim_settings.initial_pose.theta,
    );
    let mut sim = Simulator::new(model, sim_settings.dt, initial_pose, Box::new(policy))?;
    sim.set_stop_condition(StopCondition {
        max_steps: sim_settings.max_steps,
        max_duration: sim_settings.max_duration,
    })?;

    // The rendered stream starts with the initial pose, matching the
    // trajectory log.
    topic.publish(initial_pose);
    touch_step(board, initial_pose, 0, 0.0, sim.state());

    let sleeper = SpinSleeper::new(10_000);
    let step_period = Duration::from_secs_f64(sim_settings.dt);
    while sim.state() != RunState::Completed {
        let pose = sim.step()?;
        topic.publish(pose);
        touch_step(board, pose, sim.steps(), sim.elapsed(), sim.state());
        sleeper.sleep(step_period);
    }

    info!(
        steps = sim.steps(),
        elapsed = sim.elapsed(),
        "Simulation run completed."
    );
    Ok(())
}

/// Warns (and surfaces a fault to the overlay) when the simulator thread
/// stops committing steps without having completed.
async fn watchdog(board: StatusBoard) {
    let mut tick = tokio::time::interval(Duration::from_millis(250));
    loop {
        tick.tick().await;
        let status = snapshot(&board);
        if status.state == RunState::Completed {
            info!("Watchdog task finished: simulation completed.");
            return;
        }
        let age = status.last_step_ts.elapsed();
        if status.state == RunState::Running && age > Duration::from_secs(1) {
            warn!(?age, "Simulation step timeout!");
            raise_fault(&board, "simulation stalled");
        }
    }
}
