//! Double-buffered pheromone field with decay and deposit.

use crate::error::{ensure_rate, Result};
use crate::grid::GridField;
use formica_data::{GridSpec, PheromoneParams, Vec2};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

#[cfg(feature = "parallel")]
type VisitCounter = AtomicU32;
#[cfg(not(feature = "parallel"))]
type VisitCounter = u32;

/// Intensities below this are zeroed instead of decayed.
pub const DECAY_FLOOR: f32 = 0.01;

/// Owns the published field ants read and the working field each cycle
/// writes into.
///
/// A cycle is decay, then deposit, then publish. The working buffer is never
/// handed out, so readers only ever see a field that has completed a full
/// cycle.
///
/// # Implementation Notes
/// - Deposits are gathered as per-cell visit counts and applied once per
///   cell, so several ants landing on the same cell never lose an update.
/// - Under the `parallel` feature counts are gathered with `AtomicU32`
///   counters; the sequential path produces the same counts. The counters
///   live as long as the simulator and are zeroed as they are applied.
/// - Publish swaps buffer identities instead of copying.
#[derive(Debug)]
pub struct PheromoneSimulator {
    params: PheromoneParams,
    published: GridField,
    working: GridField,
    visits: Vec<VisitCounter>,
    cycles: u64,
}

impl PheromoneSimulator {
    pub fn new(spec: GridSpec, params: PheromoneParams) -> Result<Self> {
        let published = GridField::new(spec)?;
        Self::with_initial_field(published, params)
    }

    /// Starts from an existing field, e.g. one seeded with a gradient.
    pub fn with_initial_field(field: GridField, params: PheromoneParams) -> Result<Self> {
        ensure_rate("decay_rate", params.decay_rate)?;
        ensure_rate("deposit_rate", params.deposit_rate)?;
        let working = field.clone();
        let cells = field.spec().cell_count();
        Ok(Self {
            params,
            published: field,
            working,
            visits: (0..cells).map(|_| VisitCounter::default()).collect(),
            cycles: 0,
        })
    }

    #[must_use]
    pub fn params(&self) -> &PheromoneParams {
        &self.params
    }

    /// The field ants sense and renderers draw.
    #[inline]
    #[must_use]
    pub fn published(&self) -> &GridField {
        &self.published
    }

    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &[f32] {
        self.published.as_slice()
    }

    /// Number of completed cycles.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Runs one decay, deposit and publish cycle using final ant positions.
    pub fn run_cycle(&mut self, positions: &[Vec2]) {
        self.working.copy_from(&self.published);
        decay(self.working.as_mut_slice(), self.params.decay_rate);
        self.count_visits(positions);
        apply_deposits(
            self.working.as_mut_slice(),
            &mut self.visits,
            self.params.deposit_rate,
        );
        std::mem::swap(&mut self.published, &mut self.working);
        self.cycles += 1;

        tracing::debug!(
            cycle = self.cycles,
            agents = positions.len(),
            "Pheromone cycle published"
        );
    }

    /// A cycle with no ants depositing.
    pub fn decay_only(&mut self) {
        self.run_cycle(&[]);
    }

    #[cfg(feature = "parallel")]
    fn count_visits(&mut self, positions: &[Vec2]) {
        let field = &self.working;
        let visits = &self.visits;
        positions.par_iter().for_each(|&p| {
            let (x, y) = field.nearest_cell(p);
            if let Ok(idx) = field.index(x, y) {
                visits[idx].fetch_add(1, AtomicOrdering::Relaxed);
            }
        });
    }

    #[cfg(not(feature = "parallel"))]
    fn count_visits(&mut self, positions: &[Vec2]) {
        for &p in positions {
            let (x, y) = self.working.nearest_cell(p);
            if let Ok(idx) = self.working.index(x, y) {
                self.visits[idx] += 1;
            }
        }
    }
}

#[inline]
fn decay_cell(v: &mut f32, rate: f32) {
    *v = if *v < DECAY_FLOOR { 0.0 } else { *v * (1.0 - rate) };
}

fn decay(cells: &mut [f32], rate: f32) {
    #[cfg(feature = "parallel")]
    cells.par_iter_mut().for_each(|v| decay_cell(v, rate));
    #[cfg(not(feature = "parallel"))]
    cells.iter_mut().for_each(|v| decay_cell(v, rate));
}

#[inline]
fn deposit_cell(v: &mut f32, visits: u32, rate: f32) {
    if visits > 0 {
        *v = (*v + visits as f32 * rate).min(1.0);
    }
}

/// Applies and clears every visit count.
fn apply_deposits(cells: &mut [f32], visits: &mut [VisitCounter], rate: f32) {
    #[cfg(feature = "parallel")]
    cells
        .par_iter_mut()
        .zip(visits.par_iter())
        .for_each(|(v, n)| deposit_cell(v, n.swap(0, AtomicOrdering::Relaxed), rate));
    #[cfg(not(feature = "parallel"))]
    cells
        .iter_mut()
        .zip(visits.iter_mut())
        .for_each(|(v, n)| deposit_cell(v, std::mem::take(n), rate));
}
