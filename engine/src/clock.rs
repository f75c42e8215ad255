//! Frame Clock
//!
//! Monotonic elapsed time since the clock started, read once per tick.

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since the clock started.
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
