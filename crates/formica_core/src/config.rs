//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section and every field is optional; missing
//! values fall back to the `Default` impls.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command-line overrides applied by the driver (seed)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! target_fps = 60
//!
//! [world]
//! grid_width = 100
//! grid_height = 100
//! resolution = 1.0
//! num_agents = 1000
//! seed = 42
//!
//! [pheromone]
//! decay_rate = 0.1
//! deposit_rate = 0.2
//! initial_field = "radial_gradient"
//!
//! [clock]
//! slow_interval = 0.1
//! slower_interval = 0.2
//! ```

use crate::error::{ensure_angle_range, ensure_positive, ensure_rate, ConfigError, Result};
use formica_data::{AntStats, GridSpec, PheromoneParams, SpawnRegion};
use serde::{Deserialize, Serialize};

/// World dimensions and population.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// World units per grid cell.
    pub resolution: f32,
    pub num_agents: usize,
    /// Seeds both the spawn RNG and the random angle pool.
    pub seed: u64,
    /// Spawn area in world units; the whole world when absent.
    pub spawn_region: Option<SpawnRegion>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_width: 100,
            grid_height: 100,
            resolution: 1.0,
            num_agents: 1000,
            seed: 42,
            spawn_region: None,
        }
    }
}

impl WorldConfig {
    #[must_use]
    pub fn grid_spec(&self) -> GridSpec {
        GridSpec::new(self.grid_width, self.grid_height, self.resolution)
    }

    #[must_use]
    pub fn spawn_region(&self) -> SpawnRegion {
        self.spawn_region
            .unwrap_or_else(|| SpawnRegion::whole(&self.grid_spec()))
    }
}

/// Motion and steering magnitudes shared by all ants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AntsConfig {
    pub speed: f32,
    pub turn_speed: f32,
    pub pheromone_turn_gain: f32,
}

impl Default for AntsConfig {
    fn default() -> Self {
        let stats = AntStats::default();
        Self {
            speed: stats.speed,
            turn_speed: stats.turn_speed,
            pheromone_turn_gain: stats.pheromone_turn_gain,
        }
    }
}

impl AntsConfig {
    #[must_use]
    pub fn stats(&self) -> AntStats {
        AntStats {
            speed: self.speed,
            turn_speed: self.turn_speed,
            pheromone_turn_gain: self.pheromone_turn_gain,
        }
    }
}

/// Field contents before the first cycle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitialField {
    #[default]
    Empty,
    /// Strongest in the center, fading to zero at the corners.
    RadialGradient,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PheromoneConfig {
    pub decay_rate: f32,
    pub deposit_rate: f32,
    pub initial_field: InitialField,
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        let params = PheromoneParams::default();
        Self {
            decay_rate: params.decay_rate,
            deposit_rate: params.deposit_rate,
            initial_field: InitialField::Empty,
        }
    }
}

impl PheromoneConfig {
    #[must_use]
    pub fn params(&self) -> PheromoneParams {
        PheromoneParams {
            decay_rate: self.decay_rate,
            deposit_rate: self.deposit_rate,
        }
    }
}

/// Random turn pool generation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RandomConfig {
    pub pool_size: usize,
    pub angle_min: f32,
    pub angle_max: f32,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            pool_size: 50_000,
            angle_min: -0.1,
            angle_max: 0.1,
        }
    }
}

impl RandomConfig {
    #[must_use]
    pub fn angle_range(&self) -> (f32, f32) {
        (self.angle_min, self.angle_max)
    }
}

/// Tick cadences in simulated seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// Heading pass interval.
    pub slow_interval: f32,
    /// Pheromone cycle interval.
    pub slower_interval: f32,
    /// Diagnostics interval.
    pub report_interval: f32,
    /// Simulated seconds per real second.
    pub time_scale: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            slow_interval: 0.1,
            slower_interval: 0.2,
            report_interval: 1.0,
            time_scale: 1.0,
        }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("slow_interval", self.slow_interval)?;
        ensure_positive("slower_interval", self.slower_interval)?;
        ensure_positive("report_interval", self.report_interval)?;
        ensure_positive("time_scale", self.time_scale)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub ants: AntsConfig,
    pub pheromone: PheromoneConfig,
    pub random: RandomConfig,
    pub clock: ClockConfig,
    pub target_fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            ants: AntsConfig::default(),
            pheromone: PheromoneConfig::default(),
            random: RandomConfig::default(),
            clock: ClockConfig::default(),
            target_fps: 60,
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// # Validation Rules
    /// - Grid dimensions and resolution must be positive
    /// - Population and random pool must be non-empty
    /// - Decay and deposit rates must be in `[0.0, 1.0]`
    /// - Angle range must be finite with `min <= max`
    /// - Clock intervals, time scale and target fps must be positive
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        if world.grid_width == 0 {
            return Err(ConfigError::NonPositiveDimension { name: "width" });
        }
        if world.grid_height == 0 {
            return Err(ConfigError::NonPositiveDimension { name: "height" });
        }
        if !(world.resolution.is_finite() && world.resolution > 0.0) {
            return Err(ConfigError::NonPositiveResolution(world.resolution));
        }
        if world.num_agents == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if !world.spawn_region().is_valid() {
            return Err(ConfigError::InvalidSpawnRegion);
        }

        for (name, value) in [
            ("speed", self.ants.speed),
            ("turn_speed", self.ants.turn_speed),
            ("pheromone_turn_gain", self.ants.pheromone_turn_gain),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteStat { name, value });
            }
        }

        ensure_rate("decay_rate", self.pheromone.decay_rate)?;
        ensure_rate("deposit_rate", self.pheromone.deposit_rate)?;

        if self.random.pool_size == 0 {
            return Err(ConfigError::EmptyRandomPool);
        }
        let (min, max) = self.random.angle_range();
        ensure_angle_range(min, max)?;

        self.clock.validate()?;

        if self.target_fps == 0 {
            return Err(ConfigError::NonPositiveFps);
        }
        Ok(())
    }

    /// Parses and validates a `config.toml` document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Seconds per frame at `target_fps`.
    #[must_use]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Hash of every parameter that affects trajectories.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.ants).as_bytes());
        hasher.update(format!("{:?}", self.pheromone).as_bytes());
        hasher.update(format!("{:?}", self.random).as_bytes());
        hasher.update(format!("{:?}", self.clock).as_bytes());
        hex::encode(hasher.finalize())
    }
}
