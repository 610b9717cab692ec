//! Formica - an ant-colony foraging simulation.
//!
//! The simulation itself lives in `formica_core`; this crate adds the
//! headless driver used by the `formica` binary.

pub mod app;
