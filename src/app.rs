//! Headless driver for the simulation.
//!
//! The core only exposes tick entry points; this module plays the role of
//! the external scheduler. It loads `config.toml`, builds a
//! [`Simulation`], and feeds a [`SimulationClock`] fixed frame steps, either
//! as fast as possible or paced in real time.

use anyhow::Context;
use formica_core::config::AppConfig;
use formica_core::{ConfigError, Simulation, SimulationClock};
use formica_data::FieldStats;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Load(#[from] anyhow::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Loads and validates `path`.
///
/// A missing file is not an error: defaults are used and written to `path`
/// so the next run has something to edit.
pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        let default = AppConfig::default();
        match toml::to_string(&default) {
            Ok(text) => {
                if let Err(e) = std::fs::write(path, text) {
                    tracing::warn!(path = %path.display(), error = %e, "Could not write default config");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Could not serialize default config"),
        }
        tracing::info!(path = %path.display(), "No config found, using defaults");
        return Ok(default);
    }

    let content = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = AppConfig::from_toml(&content)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(config)
}

/// End-of-run figures printed by the binary.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub simulated_seconds: f64,
    pub heading_passes: u64,
    pub pheromone_cycles: u64,
    pub agents: usize,
    pub field: FieldStats,
    pub avg_frame_us: u64,
    /// Wall-clock seconds since the simulation was built.
    pub wall_seconds: f64,
    pub config_fingerprint: String,
}

pub struct App {
    pub config: AppConfig,
    pub sim: Simulation,
    pub clock: SimulationClock,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let sim = Simulation::new(&config)?;
        let clock = SimulationClock::new(config.clock.clone())?;
        tracing::info!(fingerprint = %config.fingerprint(), "Configuration loaded");
        Ok(Self { config, sim, clock })
    }

    /// Advances one frame of `1 / target_fps` seconds.
    pub fn step(&mut self) {
        self.clock.advance(&mut self.sim, self.config.frame_dt());
    }

    pub fn run_frames(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Runs `frames` frames paced at `target_fps`, stopping early on Ctrl-C.
    pub async fn run_realtime(&mut self, frames: u64) {
        let period = Duration::from_secs_f32(self.config.frame_dt());
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        for _ in 0..frames {
            tokio::select! {
                _ = interval.tick() => self.step(),
                _ = &mut ctrl_c => {
                    tracing::info!("Interrupted, stopping");
                    break;
                }
            }
        }
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let metrics = self.sim.metrics();
        RunSummary {
            frames: self.clock.frames(),
            simulated_seconds: self.clock.elapsed(),
            heading_passes: metrics.heading_passes(),
            pheromone_cycles: metrics.pheromone_cycles(),
            agents: self.sim.agent_positions().len(),
            field: self.sim.field_stats(),
            avg_frame_us: metrics.average_frame().as_micros() as u64,
            wall_seconds: metrics.elapsed().as_secs_f64(),
            config_fingerprint: self.config.fingerprint(),
        }
    }
}
