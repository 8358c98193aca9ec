//! Frame timing
//!
//! Physics runs in whole `SIM_DT` steps fed by an accumulator of measured
//! real time; presentation runs at whatever rate the host manages, paced to
//! a frame budget by sleeping.

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// Converts variable frame deltas into a whole number of fixed steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Feed one frame's real delta; returns how many steps to simulate.
    ///
    /// Deltas are clamped to `MAX_FRAME_DT`. If the backlog would need more
    /// than `max_substeps` steps, the excess whole steps are dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            let dropped = (self.accumulator / self.step).floor();
            self.accumulator -= dropped * self.step;
            log::trace!("Dropped {dropped} simulation steps to catch up");
        }
        steps
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Source of per-frame time for the driver loop
pub trait FrameClock {
    /// Mark the start of a frame; returns seconds since the previous frame
    fn begin_frame(&mut self) -> f32;
    /// Called after the frame is presented
    fn end_frame(&mut self);
}

/// Wall-clock pacing: measures real deltas and sleeps out the rest of the
/// frame budget
#[derive(Debug)]
pub struct FramePacer {
    budget: Duration,
    frame_start: Option<Instant>,
}

impl FramePacer {
    pub fn new(hz: f32) -> Self {
        Self {
            budget: Duration::from_secs_f32(1.0 / hz),
            frame_start: None,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Sleep time left after a frame that took `elapsed`; never negative and
    /// never more than one budget
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }
}

impl FrameClock for FramePacer {
    fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let dt = match self.frame_start {
            Some(previous) => now.duration_since(previous).as_secs_f32(),
            // First frame: assume exactly one budget
            None => self.budget.as_secs_f32(),
        };
        self.frame_start = Some(now);
        dt
    }

    fn end_frame(&mut self) {
        let Some(start) = self.frame_start else {
            return;
        };
        let elapsed = start.elapsed();
        let sleep = self.remaining(elapsed);
        if sleep.is_zero() {
            log::trace!("Frame over budget by {:?}", elapsed - self.budget);
        } else {
            thread::sleep(sleep);
        }
    }
}

/// Deterministic clock that reports the same delta every frame and never
/// sleeps; for tests and unpaced headless runs
#[derive(Debug, Clone)]
pub struct SteppedClock {
    dt: f32,
}

impl SteppedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl FrameClock for SteppedClock {
    fn begin_frame(&mut self) -> f32 {
        self.dt
    }

    fn end_frame(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_one_frame_one_step() {
        let mut timestep = FixedTimestep::new(SIM_DT);
        assert_eq!(timestep.advance(SIM_DT), 1);
        assert!(timestep.alpha() < 1e-3);
    }

    #[test]
    fn test_fast_frames_accumulate() {
        let mut timestep = FixedTimestep::new(SIM_DT);
        // 120 Hz presentation: a step every other frame
        let steps: u32 = (0..120).map(|_| timestep.advance(SIM_DT / 2.0)).sum();
        assert!((59..=60).contains(&steps), "got {steps}");
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut timestep = FixedTimestep::new(SIM_DT);
        assert_eq!(timestep.advance(5.0), MAX_SUBSTEPS);
        assert!(timestep.alpha() < 1.0);
        // Backlog was dropped, next normal frame is a single step
        assert_eq!(timestep.advance(SIM_DT), 1);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut timestep = FixedTimestep::new(SIM_DT);
        assert_eq!(timestep.advance(-1.0), 0);
        assert_eq!(timestep.alpha(), 0.0);
    }

    #[test]
    fn test_pacer_remaining_is_bounded() {
        let pacer = FramePacer::new(60.0);
        assert_eq!(pacer.remaining(Duration::ZERO), pacer.budget());
        assert_eq!(pacer.remaining(Duration::from_millis(40)), Duration::ZERO);
        assert!(pacer.remaining(Duration::from_millis(5)) < pacer.budget());
    }

    #[test]
    fn test_stepped_clock() {
        let mut clock = SteppedClock::new(0.02);
        assert_eq!(clock.begin_frame(), 0.02);
        clock.end_frame();
        assert_eq!(clock.begin_frame(), 0.02);
    }
}
