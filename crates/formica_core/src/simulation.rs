//! The simulation context tying the field, the ants and the random pool
//! together behind the tick surface.

use crate::ants::AntPopulation;
use crate::clock::TickSink;
use crate::config::{AppConfig, InitialField};
use crate::error::{ConfigError, Result};
use crate::grid::GridField;
use crate::metrics::Metrics;
use crate::pheromone::PheromoneSimulator;
use crate::random::RandomAngleSource;
use formica_data::{FieldStats, GridSpec, PheromoneParams, Vec2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Owns every piece of simulation state.
///
/// Each tick entry point takes `&mut self` and runs its pass to completion,
/// so the passes can never overlap: sensing never sees a half-written
/// field and deposit always reads post-movement positions.
#[derive(Debug)]
pub struct Simulation {
    grid: GridSpec,
    ants: AntPopulation,
    pheromones: PheromoneSimulator,
    angles: RandomAngleSource,
    metrics: Metrics,
}

impl Simulation {
    /// Builds a simulation from a validated config.
    ///
    /// The spawn RNG is seeded with `world.seed` and the angle pool with
    /// `world.seed + 1`, so one seed reproduces the whole run.
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.world.grid_spec();

        let mut field = GridField::new(grid)?;
        if config.pheromone.initial_field == InitialField::RadialGradient {
            field.seed_radial_gradient();
        }
        let pheromones = PheromoneSimulator::with_initial_field(field, config.pheromone.params())?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);
        let ants = AntPopulation::spawn(
            config.world.num_agents,
            config.world.spawn_region(),
            grid.world_extent(),
            config.ants.stats(),
            &mut rng,
        )?;
        let angles = RandomAngleSource::from_seed(
            config.random.pool_size,
            config.random.angle_range(),
            config.world.seed.wrapping_add(1),
        )?;

        tracing::info!(
            width = grid.width,
            height = grid.height,
            resolution = grid.resolution,
            agents = ants.len(),
            seed = config.world.seed,
            "Simulation created"
        );

        Ok(Self {
            grid,
            ants,
            pheromones,
            angles,
            metrics: Metrics::new(),
        })
    }

    /// Builds a simulation from explicit parts, starting with an empty field.
    pub fn from_parts(
        grid: GridSpec,
        params: PheromoneParams,
        ants: AntPopulation,
        angles: RandomAngleSource,
    ) -> Result<Self> {
        let pheromones = PheromoneSimulator::new(grid, params)?;
        Ok(Self {
            grid,
            ants,
            pheromones,
            angles,
            metrics: Metrics::new(),
        })
    }

    /// Replaces the published field, e.g. to lay a trail before running.
    ///
    /// The field must be laid out on the same grid as the simulation.
    pub fn with_field(mut self, field: GridField) -> Result<Self> {
        if field.spec() != &self.grid {
            return Err(ConfigError::MismatchedGrid {
                expected: self.grid,
                found: *field.spec(),
            });
        }
        self.pheromones = PheromoneSimulator::with_initial_field(field, *self.pheromones.params())?;
        Ok(self)
    }

    /// Movement pass.
    pub fn movement_pass(&mut self, dt: f32) {
        let started = Instant::now();
        self.ants.movement_pass(dt, self.grid.world_extent());
        self.metrics.record_frame(started.elapsed(), self.ants.len());
    }

    /// Heading pass against the currently published field.
    pub fn heading_pass(&mut self) {
        self.ants
            .heading_pass(self.pheromones.published(), &self.angles);
        self.metrics.record_heading_pass();
    }

    /// Decay, deposit at current ant positions, publish.
    pub fn pheromone_cycle(&mut self) {
        self.pheromones.run_cycle(self.ants.positions());
        self.metrics.record_pheromone_cycle();
    }

    #[must_use]
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    #[must_use]
    pub fn agent_positions(&self) -> &[Vec2] {
        self.ants.positions()
    }

    /// Headings in radians, counter-clockwise from +x.
    #[must_use]
    pub fn agent_headings(&self) -> &[f32] {
        self.ants.headings()
    }

    /// Published intensities, row-major.
    #[must_use]
    pub fn field_snapshot(&self) -> &[f32] {
        self.pheromones.snapshot()
    }

    #[must_use]
    pub fn field(&self) -> &GridField {
        self.pheromones.published()
    }

    #[must_use]
    pub fn field_stats(&self) -> FieldStats {
        self.pheromones.published().stats()
    }

    /// Ants per grid cell, row-major.
    #[must_use]
    pub fn density_map(&self) -> Vec<u32> {
        self.ants.occupancy(self.pheromones.published())
    }

    #[must_use]
    pub fn ants(&self) -> &AntPopulation {
        &self.ants
    }

    #[must_use]
    pub fn angles(&self) -> &RandomAngleSource {
        &self.angles
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

impl TickSink for Simulation {
    fn on_fast_tick(&mut self, dt: f32) {
        self.movement_pass(dt);
    }

    fn on_slow_tick(&mut self) {
        self.heading_pass();
    }

    fn on_slower_tick(&mut self) {
        self.pheromone_cycle();
    }

    fn on_report_tick(&mut self) {
        let stats = self.field_stats();
        tracing::info!(
            frames = self.metrics.frames(),
            heading_passes = self.metrics.heading_passes(),
            pheromone_cycles = self.metrics.pheromone_cycles(),
            total_intensity = stats.total,
            max_intensity = stats.max,
            marked_cells = stats.nonzero_cells,
            "Simulation report"
        );
    }
}
