//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and counters for monitoring how often each
//! pass ran and how long frames take.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Frames between periodic info-level log lines.
const LOG_EVERY_FRAMES: u64 = 1000;

/// Counters for the three simulation passes.
pub struct Metrics {
    frames: AtomicU64,
    heading_passes: AtomicU64,
    pheromone_cycles: AtomicU64,
    busy_micros: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("frames", &self.frames())
            .field("heading_passes", &self.heading_passes())
            .field("pheromone_cycles", &self.pheromone_cycles())
            .finish()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: AtomicU64::new(0),
            heading_passes: AtomicU64::new(0),
            pheromone_cycles: AtomicU64::new(0),
            busy_micros: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed movement pass with its duration.
    pub fn record_frame(&self, duration: Duration, agents: usize) {
        let frame = self.frames.fetch_add(1, Ordering::Relaxed) + 1;
        self.busy_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        if frame.is_multiple_of(LOG_EVERY_FRAMES) {
            tracing::info!(
                frame,
                agents,
                heading_passes = self.heading_passes(),
                pheromone_cycles = self.pheromone_cycles(),
                avg_frame_us = self.average_frame().as_micros() as u64,
                "Simulation frame"
            );
        }
    }

    pub fn record_heading_pass(&self) {
        self.heading_passes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pheromone_cycle(&self) {
        self.pheromone_cycles.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn heading_passes(&self) -> u64 {
        self.heading_passes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn pheromone_cycles(&self) -> u64 {
        self.pheromone_cycles.load(Ordering::Relaxed)
    }

    /// Mean movement pass duration so far.
    #[must_use]
    pub fn average_frame(&self) -> Duration {
        let frames = self.frames();
        if frames == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.busy_micros.load(Ordering::Relaxed) / frames)
    }

    /// Gets elapsed wall time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging(level: tracing::Level) {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .finish(),
    )
    .ok();
}
