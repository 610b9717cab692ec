//! Fixed-cadence tick dispatch.
//!
//! The simulation itself never looks at wall-clock time. A driver feeds the
//! clock elapsed frame time and the clock turns it into calls on a
//! [`TickSink`]:
//!
//! | tick            | cadence                  | simulation work   |
//! |-----------------|--------------------------|-------------------|
//! | fast            | every frame, with `dt`   | movement pass     |
//! | slow            | every `slow_interval`    | heading pass      |
//! | slower          | every `slower_interval`  | pheromone cycle   |
//! | report          | every `report_interval`  | diagnostics       |
//!
//! Within one frame the order is always slow, fast, slower, report: headings
//! are final before ants move, and ants have moved before they deposit.

use crate::config::ClockConfig;
use crate::error::{ensure_positive, Result};

/// Upper bound on how often one cadence fires within a single frame.
pub const MAX_TICKS_PER_FRAME: u32 = 256;

/// Receiver of the clock's tick entry points.
pub trait TickSink {
    /// Advance one frame by `dt` seconds of simulated time.
    fn on_fast_tick(&mut self, dt: f32);
    fn on_slow_tick(&mut self);
    fn on_slower_tick(&mut self);
    fn on_report_tick(&mut self) {}
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    config: ClockConfig,
    slow_acc: f64,
    slower_acc: f64,
    report_acc: f64,
    elapsed: f64,
    frames: u64,
}

impl SimulationClock {
    pub fn new(config: ClockConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            slow_acc: 0.0,
            slower_acc: 0.0,
            report_acc: 0.0,
            elapsed: 0.0,
            frames: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Changes the simulated-to-real time ratio.
    pub fn set_time_scale(&mut self, time_scale: f32) -> Result<()> {
        ensure_positive("time_scale", time_scale)?;
        self.config.time_scale = time_scale;
        Ok(())
    }

    /// Total simulated seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame of `real_dt` seconds against `sink`.
    ///
    /// Negative or non-finite frame times count as 0. Each cadence fires at
    /// most [`MAX_TICKS_PER_FRAME`] times per frame; anything beyond that is
    /// dropped with a warning.
    pub fn advance<S: TickSink + ?Sized>(&mut self, sink: &mut S, real_dt: f32) {
        let scaled = real_dt.max(0.0) * self.config.time_scale;
        let dt = if scaled.is_finite() {
            scaled
        } else {
            tracing::warn!(real_dt, "Non-finite frame time, treating as 0");
            0.0
        };
        self.elapsed += f64::from(dt);
        self.frames += 1;

        let slow = drain(&mut self.slow_acc, dt, self.config.slow_interval, "slow");
        let slower = drain(&mut self.slower_acc, dt, self.config.slower_interval, "slower");
        let report = drain(&mut self.report_acc, dt, self.config.report_interval, "report");

        for _ in 0..slow {
            sink.on_slow_tick();
        }
        sink.on_fast_tick(dt);
        for _ in 0..slower {
            sink.on_slower_tick();
        }
        for _ in 0..report {
            sink.on_report_tick();
        }
    }
}

/// Adds `dt` to `acc` and returns how many whole `interval`s elapsed,
/// capped at [`MAX_TICKS_PER_FRAME`]. `acc` keeps the remainder.
fn drain(acc: &mut f64, dt: f32, interval: f32, cadence: &'static str) -> u32 {
    let interval = f64::from(interval);
    *acc += f64::from(dt);
    let due = (*acc / interval).floor();
    *acc = (*acc - due * interval).clamp(0.0, interval);
    if due > f64::from(MAX_TICKS_PER_FRAME) {
        tracing::warn!(cadence, due, "Frame too long, dropping ticks");
        MAX_TICKS_PER_FRAME
    } else {
        due as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        dts: Vec<f32>,
    }

    impl TickSink for Recorder {
        fn on_fast_tick(&mut self, dt: f32) {
            self.calls.push("fast");
            self.dts.push(dt);
        }
        fn on_slow_tick(&mut self) {
            self.calls.push("slow");
        }
        fn on_slower_tick(&mut self) {
            self.calls.push("slower");
        }
        fn on_report_tick(&mut self) {
            self.calls.push("report");
        }
    }

    fn clock(slow: f32, slower: f32) -> SimulationClock {
        SimulationClock::new(ClockConfig {
            slow_interval: slow,
            slower_interval: slower,
            report_interval: 1.0,
            time_scale: 1.0,
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_intervals() {
        let config = ClockConfig {
            slow_interval: 0.0,
            ..ClockConfig::default()
        };
        assert!(SimulationClock::new(config).is_err());
        let config = ClockConfig {
            time_scale: -1.0,
            ..ClockConfig::default()
        };
        assert!(SimulationClock::new(config).is_err());
    }

    #[test]
    fn test_order_within_frame() {
        let mut clock = clock(0.5, 0.5);
        let mut rec = Recorder::default();
        clock.advance(&mut rec, 0.5);
        assert_eq!(rec.calls, vec!["slow", "fast", "slower"]);
    }

    #[test]
    fn test_cadence_counts() {
        let mut clock = clock(0.25, 0.5);
        let mut rec = Recorder::default();
        for _ in 0..16 {
            clock.advance(&mut rec, 0.125);
        }
        let count = |name| rec.calls.iter().filter(|c| **c == name).count();
        assert_eq!(count("fast"), 16);
        assert_eq!(count("slow"), 8);
        assert_eq!(count("slower"), 4);
        assert_eq!(count("report"), 2);
        assert_eq!(clock.frames(), 16);
        assert!((clock.elapsed() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_frame_fires_multiple_ticks() {
        let mut clock = clock(0.25, 0.5);
        let mut rec = Recorder::default();
        clock.advance(&mut rec, 1.0);
        assert_eq!(
            rec.calls,
            vec!["slow", "slow", "slow", "slow", "fast", "slower", "slower", "report"]
        );
    }

    #[test]
    fn test_time_scale_applies_to_dt() {
        let mut clock = clock(0.25, 0.5);
        clock.set_time_scale(2.0).unwrap();
        let mut rec = Recorder::default();
        clock.advance(&mut rec, 0.125);
        assert_eq!(rec.dts, vec![0.25]);
        assert_eq!(rec.calls, vec!["slow", "fast"]);
        assert!(clock.set_time_scale(0.0).is_err());
    }

    #[test]
    fn test_huge_frame_is_capped() {
        let mut clock = SimulationClock::new(ClockConfig::default()).unwrap();
        let mut rec = Recorder::default();
        clock.advance(&mut rec, 1.0e7);
        let count = |name| rec.calls.iter().filter(|c| **c == name).count();
        assert_eq!(count("slow"), MAX_TICKS_PER_FRAME as usize);
        assert_eq!(count("slower"), MAX_TICKS_PER_FRAME as usize);
        assert_eq!(count("report"), MAX_TICKS_PER_FRAME as usize);
        assert_eq!(count("fast"), 1);

        // The clock keeps working normally afterwards.
        rec.calls.clear();
        clock.advance(&mut rec, 0.1);
        assert_eq!(rec.calls.iter().filter(|c| **c == "fast").count(), 1);
        assert!(rec.calls.len() <= 5);
    }

    #[test]
    fn test_huge_time_scale_terminates() {
        let mut clock = SimulationClock::new(ClockConfig {
            time_scale: 1.0e9,
            ..ClockConfig::default()
        })
        .unwrap();
        let mut rec = Recorder::default();
        for _ in 0..3 {
            clock.advance(&mut rec, 1.0 / 60.0);
        }
        assert_eq!(clock.frames(), 3);
        assert!(rec.calls.len() <= 3 * (3 * MAX_TICKS_PER_FRAME as usize + 1));
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut clock = clock(0.25, 0.5);
        let mut rec = Recorder::default();
        clock.advance(&mut rec, f32::NAN);
        clock.advance(&mut rec, f32::INFINITY);
        assert_eq!(rec.calls, vec!["fast", "fast"]);
        assert_eq!(rec.dts, vec![0.0, 0.0]);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut clock = clock(0.25, 0.5);
        let mut rec = Recorder::default();
        clock.advance(&mut rec, -1.0);
        assert_eq!(rec.calls, vec!["fast"]);
        assert_eq!(rec.dts, vec![0.0]);
    }
}
