//! Ant population stored as parallel position and heading arrays.
//!
//! Two passes drive the population:
//! - the heading pass (slow cadence) turns each ant by a pooled random offset
//!   and then steers toward the strongest of three pheromone probes;
//! - the movement pass (every frame) integrates position along the heading
//!   and wraps it around the toroidal world.
//!
//! Both passes are per-ant independent and run as one rayon fork-join each
//! when the `parallel` feature is on. Returning from a pass means every ant
//! has been updated.

use crate::error::{ConfigError, Result};
use crate::grid::GridField;
use crate::random::RandomAngleSource;
use formica_data::{AntStats, SpawnRegion, Vec2};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::f32::consts::{FRAC_PI_4, TAU};

/// Angle between the forward probe and each side probe.
pub const SENSOR_ANGLE: f32 = FRAC_PI_4;

/// Pheromone read by the three probes of one ant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Senses {
    pub left: f32,
    pub forward: f32,
    pub right: f32,
}

/// Reads the field one cell length ahead of `position` along `heading`
/// and along `heading ± 45°`. Off-grid probes read 0.
#[must_use]
pub fn sense(field: &GridField, position: Vec2, heading: f32) -> Senses {
    let reach = field.spec().resolution;
    let probe = |angle: f32| field.sample_at(position + Vec2::from_angle(angle).scaled(reach));
    Senses {
        left: probe(heading + SENSOR_ANGLE),
        forward: probe(heading),
        right: probe(heading - SENSOR_ANGLE),
    }
}

/// Rotation (radians, counter-clockwise positive) chosen from `senses`.
///
/// A side wins only when strictly stronger than both others; any tie
/// involving forward keeps the ant straight.
#[inline]
#[must_use]
pub fn steer(senses: Senses, gain: f32) -> f32 {
    let Senses {
        left,
        forward,
        right,
    } = senses;
    if right > left && right > forward {
        -gain * right
    } else if left > right && left > forward {
        gain * left
    } else {
        0.0
    }
}

#[inline]
fn wrap(value: f32, extent: f32) -> f32 {
    value.rem_euclid(extent)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AntPopulation {
    positions: Vec<Vec2>,
    headings: Vec<f32>,
    stats: AntStats,
    heading_ticks: u64,
}

impl AntPopulation {
    /// Builds a population from explicit arrays; index `i` of both is ant `i`.
    pub fn from_parts(positions: Vec<Vec2>, headings: Vec<f32>, stats: AntStats) -> Result<Self> {
        if positions.len() != headings.len() {
            return Err(ConfigError::MismatchedAgentArrays {
                positions: positions.len(),
                headings: headings.len(),
            });
        }
        if positions.is_empty() {
            return Err(ConfigError::EmptyPopulation);
        }
        validate_stats(&stats)?;
        Ok(Self {
            positions,
            headings,
            stats,
            heading_ticks: 0,
        })
    }

    /// Spawns `count` ants uniformly inside `region` with uniform headings.
    ///
    /// Positions are wrapped into `[0, extent)` so a region reaching past
    /// the world edge still yields valid ants.
    pub fn spawn<R: Rng>(
        count: usize,
        region: SpawnRegion,
        extent: Vec2,
        stats: AntStats,
        rng: &mut R,
    ) -> Result<Self> {
        if !region.is_valid() {
            return Err(ConfigError::InvalidSpawnRegion);
        }
        let mut positions = Vec::with_capacity(count);
        let mut headings = Vec::with_capacity(count);
        for _ in 0..count {
            let x = rng.gen_range(region.x[0]..=region.x[1]);
            let y = rng.gen_range(region.y[0]..=region.y[1]);
            positions.push(Vec2::new(wrap(x, extent.x), wrap(y, extent.y)));
            headings.push(rng.gen_range(0.0..TAU));
        }
        tracing::debug!(count, "Spawned ant population");
        Self::from_parts(positions, headings, stats)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    #[inline]
    #[must_use]
    pub fn headings(&self) -> &[f32] {
        &self.headings
    }

    #[must_use]
    pub fn stats(&self) -> &AntStats {
        &self.stats
    }

    /// Number of heading passes run so far; the next pass uses this as its tick.
    #[must_use]
    pub fn heading_ticks(&self) -> u64 {
        self.heading_ticks
    }

    /// Random turn, then pheromone steering, for every ant.
    ///
    /// `field` must be the published field; it is only read.
    pub fn heading_pass(&mut self, field: &GridField, angles: &RandomAngleSource) {
        let tick = self.heading_ticks;
        let stats = self.stats;
        let update = |(i, (heading, &position)): (usize, (&mut f32, &Vec2))| {
            let turned = *heading + angles.angle_for(tick, i) * stats.turn_speed;
            let senses = sense(field, position, turned);
            *heading = (turned + steer(senses, stats.pheromone_turn_gain)).rem_euclid(TAU);
        };

        #[cfg(feature = "parallel")]
        self.headings
            .par_iter_mut()
            .zip(self.positions.par_iter())
            .enumerate()
            .for_each(update);
        #[cfg(not(feature = "parallel"))]
        self.headings
            .iter_mut()
            .zip(self.positions.iter())
            .enumerate()
            .for_each(update);

        self.heading_ticks += 1;
    }

    /// Advances every ant by `speed * dt` along its heading and wraps it
    /// into `[0, extent]` on both axes.
    pub fn movement_pass(&mut self, dt: f32, extent: Vec2) {
        let step = self.stats.speed * dt;
        let update = |(position, &heading): (&mut Vec2, &f32)| {
            *position += Vec2::from_angle(heading).scaled(step);
            position.x = wrap(position.x, extent.x);
            position.y = wrap(position.y, extent.y);
        };

        #[cfg(feature = "parallel")]
        self.positions
            .par_iter_mut()
            .zip(self.headings.par_iter())
            .for_each(update);
        #[cfg(not(feature = "parallel"))]
        self.positions
            .iter_mut()
            .zip(self.headings.iter())
            .for_each(update);
    }

    /// Ants per grid cell, using the containing cell of each position.
    #[must_use]
    pub fn occupancy(&self, field: &GridField) -> Vec<u32> {
        let mut counts = vec![0u32; field.spec().cell_count()];
        for &p in &self.positions {
            let (x, y) = field.cell_containing(p);
            if let Ok(idx) = field.index(x, y) {
                counts[idx] += 1;
            }
        }
        counts
    }
}

fn validate_stats(stats: &AntStats) -> Result<()> {
    for (name, value) in [
        ("speed", stats.speed),
        ("turn_speed", stats.turn_speed),
        ("pheromone_turn_gain", stats.pheromone_turn_gain),
    ] {
        if !value.is_finite() {
            return Err(ConfigError::NonFiniteStat { name, value });
        }
    }
    Ok(())
}
