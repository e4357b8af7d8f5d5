//! Frame clocks: elapsed seconds since the loop started.

use std::time::Instant;

/// Source of elapsed time for the render loop
pub trait FrameClock {
    /// Seconds since the clock started
    fn elapsed_s(&self) -> f32;
}

/// Wall-clock time backed by a monotonic `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    start_time: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn elapsed_s(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }
}

/// Hand-advanced clock for deterministic stepping
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    elapsed_s: f32,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward. Negative steps are ignored.
    pub fn advance(&mut self, dt_s: f32) {
        if dt_s > 0.0 {
            self.elapsed_s += dt_s;
        }
    }
}

#[cfg(test)]
impl FrameClock for ManualClock {
    fn elapsed_s(&self) -> f32 {
        self.elapsed_s
    }
}
