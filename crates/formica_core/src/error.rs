//! Error types for the simulation core.
//!
//! Only construction can fail. Once a [`crate::simulation::Simulation`] is
//! built every pass works on pre-sized arrays and never returns an error.

use formica_data::GridSpec;
use thiserror::Error;

/// Invalid simulation parameters, detected before anything runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid width or height is zero
    #[error("grid {name} must be positive")]
    NonPositiveDimension { name: &'static str },

    /// Cell size is zero, negative or not finite
    #[error("grid resolution must be positive and finite, got {0}")]
    NonPositiveResolution(f32),

    /// No ants to simulate
    #[error("population size must be positive")]
    EmptyPopulation,

    /// Decay or deposit rate outside `[0, 1]`
    #[error("{name} must be in [0.0, 1.0], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },

    /// Random angle range is inverted or not finite
    #[error("angle range [{min}, {max}] is invalid")]
    InvalidAngleRange { min: f32, max: f32 },

    /// Random pool has no samples
    #[error("random pool size must be positive")]
    EmptyRandomPool,

    /// Clock interval or time scale is not a positive finite number
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveInterval { name: &'static str, value: f32 },

    /// Spawn region is inverted or not finite
    #[error("spawn region is invalid")]
    InvalidSpawnRegion,

    /// Position and heading arrays disagree in length
    #[error("agent arrays disagree: {positions} positions, {headings} headings")]
    MismatchedAgentArrays { positions: usize, headings: usize },

    /// A field was built for a different grid than the simulation's
    #[error("field grid {found:?} does not match simulation grid {expected:?}")]
    MismatchedGrid { expected: GridSpec, found: GridSpec },

    /// Ant stats contain a non-finite value
    #[error("ant stat {name} must be finite, got {value}")]
    NonFiniteStat { name: &'static str, value: f32 },

    /// Frame rate of the driver is zero
    #[error("target fps must be positive")]
    NonPositiveFps,
}

/// Cell coordinates that fall outside the grid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
pub struct OutOfBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Result type alias for simulation construction.
pub type Result<T> = std::result::Result<T, ConfigError>;

pub(crate) fn ensure_rate(name: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveInterval { name, value })
    }
}

/// Accepts `[min, max]` when it is ordered and its width is finite.
pub(crate) fn ensure_angle_range(min: f32, max: f32) -> Result<()> {
    if min <= max && (max - min).is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidAngleRange { min, max })
    }
}
