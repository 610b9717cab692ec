//! # Formica Core
//!
//! The simulation core for Formica - an ant-colony foraging simulation
//! driven by stigmergy.
//!
//! Ants wander a toroidal 2D world, lay pheromone on a uniform grid, and
//! steer toward stronger pheromone ahead of them. The loop is:
//! deposit → decay → sense → turn → move.
//!
//! ## Architecture
//!
//! - **Parallel arrays**: ant positions and headings are plain `Vec`s
//!   indexed by ant id
//! - **Double-buffered field**: ants read the published field while each
//!   pheromone cycle writes a private working buffer, then swaps
//! - **Explicit cadence**: a [`clock::SimulationClock`] turns frame time
//!   into fast (movement), slow (heading) and slower (pheromone) ticks
//! - **Parallel processing**: Rayon-powered passes behind the default
//!   `parallel` feature; the sequential build is bit-identical
//! - **Deterministic simulation**: seeded spawning and a pooled random turn
//!   source indexed by `(tick, ant)`
//!
//! ## Example
//!
//! ```
//! use formica_core::clock::SimulationClock;
//! use formica_core::config::AppConfig;
//! use formica_core::simulation::Simulation;
//!
//! let mut config = AppConfig::default();
//! config.world.num_agents = 100;
//!
//! let mut sim = Simulation::new(&config).unwrap();
//! let mut clock = SimulationClock::new(config.clock.clone()).unwrap();
//! for _ in 0..60 {
//!     clock.advance(&mut sim, config.frame_dt());
//! }
//! assert_eq!(sim.agent_positions().len(), 100);
//! ```

/// Ant population: heading and movement passes
pub mod ants;
/// Tick cadence and the `TickSink` trait
pub mod clock;
/// Configuration management for simulation parameters
pub mod config;
/// Error taxonomy for construction failures
pub mod error;
/// Flat pheromone grid with coordinate mapping
pub mod grid;
/// Performance metrics collection and logging
pub mod metrics;
/// Double-buffered decay and deposit
pub mod pheromone;
/// Precomputed random turn offsets
pub mod random;
/// Top-level simulation context
pub mod simulation;

pub use clock::{SimulationClock, TickSink};
pub use config::AppConfig;
pub use error::{ConfigError, OutOfBounds};
pub use metrics::{init_logging, Metrics};
pub use simulation::Simulation;
