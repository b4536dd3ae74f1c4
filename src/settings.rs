use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

use trundle_sim::ShapeSpec;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct PoseSettings {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationSettings {
    /// Time step (s), fixed for the whole run.
    pub dt: f64,
    /// Wheel separation (m).
    pub wheel_separation: f64,
    /// Optional automatic stop bounds; the window close is always available.
    pub max_steps: Option<u64>,
    pub max_duration: Option<f64>,
    pub initial_pose: PoseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicySettings {
    pub seed: u64,
    pub speed: f64,
    pub reached_tolerance: f64,
    pub min_target_distance: f64,
    pub steering_gain: f64,
    pub max_wheel_speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    /// Display grid width in cells (1 cell = 1 m).
    pub width: usize,
    /// Display grid height in cells.
    pub height: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleSettings {
    /// Preset name ("car", "box", "triangle") or explicit outline points.
    pub shape: ShapeSpec,
    pub scale: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub policy: PolicySettings,
    pub map: MapSettings,
    pub vehicle: VehicleSettings,
}

pub fn load_settings() -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", DEFAULT_CONFIG_PATH);

    let settings = Config::builder()
        .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(true))
        .build()
        .and_then(|config| config.try_deserialize::<Settings>());

    match settings {
        Ok(settings) => {
            info!("Successfully loaded configuration: {:?}", settings);
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}
