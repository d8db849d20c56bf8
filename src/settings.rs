use anyhow::{Context, ensure};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use gridstep_controller::StepConfig;
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "GRIDSTEP";
/// Largest grid side the sandbox accepts, in tiles.
pub const MAX_GRID_SIDE: u32 = 1024;

/// Everything the sandbox reads at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub controller: StepConfig,
    pub sandbox: SandboxSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SandboxSettings {
    /// Fixed physics tick rate.
    pub physics_hz: u32,
    pub grid_width: u32,
    pub grid_height: u32,
    pub obstacle_count: u32,
    /// Share of scattered obstacles that are water rather than wall.
    pub water_ratio: f64,
    /// Obstacle layout seed; a fresh layout every run when unset.
    pub seed: Option<u64>,
    pub pixels_per_tile: f32,
    pub start_x: i32,
    pub start_y: i32,
}

impl Default for SandboxSettings {
    fn default() -> Self {
        SandboxSettings {
            physics_hz: 50,
            grid_width: 16,
            grid_height: 12,
            obstacle_count: 20,
            water_ratio: 0.3,
            seed: None,
            pixels_per_tile: 40.0,
            start_x: 0,
            start_y: 0,
        }
    }
}

impl SandboxSettings {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.physics_hz > 0, "physics_hz must be positive");
        ensure!(self.grid_width > 0 && self.grid_height > 0, "grid dimensions must be positive");
        ensure!(
            self.grid_width <= MAX_GRID_SIDE && self.grid_height <= MAX_GRID_SIDE,
            "grid {}x{} exceeds the {} tile limit per side",
            self.grid_width,
            self.grid_height,
            MAX_GRID_SIDE
        );
        ensure!(
            (0.0..=1.0).contains(&self.water_ratio),
            "water_ratio must be within [0, 1], got {}",
            self.water_ratio
        );
        ensure!(
            self.pixels_per_tile.is_finite() && self.pixels_per_tile > 0.0,
            "pixels_per_tile must be positive"
        );
        ensure!(
            (0..self.grid_width as i32).contains(&self.start_x)
                && (0..self.grid_height as i32).contains(&self.start_y),
            "start tile ({}, {}) lies outside the {}x{} grid",
            self.start_x,
            self.start_y,
            self.grid_width,
            self.grid_height
        );
        Ok(())
    }
}

/// Loads `config/default.toml` (if present) overlaid with `GRIDSTEP__*` environment variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    info!("Attempting to load configuration from {}", DEFAULT_CONFIG_PATH);

    let builder = Config::builder()
        .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

    match settings_from(builder) {
        Ok(settings) => {
            info!("Successfully loaded configuration: {:?}", settings);
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            Err(e)
        }
    }
}

fn settings_from(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Settings> {
    let settings: Settings = builder
        .build()
        .context("reading configuration sources")?
        .try_deserialize()
        .context("parsing configuration")?;

    let controller = settings.controller.validate().context("invalid [controller] section")?;
    settings.sandbox.validate().context("invalid [sandbox] section")?;

    Ok(Settings {
        controller,
        ..settings
    })
}
