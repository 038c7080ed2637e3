#![forbid(unsafe_code)]

//! Fake frame clock for scenario tests.
//!
//! Debounce windows are hundreds of milliseconds; tests cannot sleep
//! through them. The driver hands out `Instant`s computed from an origin
//! plus an accumulated offset, so a 500ms window elapses in one call.

use std::time::Duration;

use web_time::Instant;

/// Drives a scripted run: a frame counter and an injectable clock.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    origin: Instant,
    offset: Duration,
    frame: u64,
    step: Duration,
}

impl FrameDriver {
    /// Start at frame 0 with the given per-frame step.
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            offset: Duration::ZERO,
            frame: 0,
            step,
        }
    }

    /// A driver ticking at the nominal 60Hz cadence.
    #[must_use]
    pub fn at_60hz() -> Self {
        Self::new(Duration::from_micros(16_667))
    }

    /// The current fake time.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.origin + self.offset
    }

    /// Frames advanced so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame and return the new time.
    pub fn advance(&mut self) -> Instant {
        self.frame += 1;
        self.offset += self.step;
        self.now()
    }

    /// Jump the clock forward without consuming frames (e.g. to let a
    /// debounce window settle instantly).
    pub fn jump(&mut self, by: Duration) -> Instant {
        self.offset += by;
        self.now()
    }
}
