#![forbid(unsafe_code)]

//! Drop-latest coalescing for scroll bursts.
//!
//! Hosts can deliver scroll events far faster than frames render. The
//! coalescer records only the latest offset and an in-flight flag: the
//! first event of a burst schedules one recomputation, later events just
//! overwrite the offset. When the frame callback runs it takes the offset
//! and clears the flag. This bounds work to one recomputation per frame
//! and never queues.

/// Coalesces scroll events to at most one pending recomputation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollCoalescer {
    latest: f64,
    in_flight: bool,
}

impl ScrollCoalescer {
    /// Create an idle coalescer at offset 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: 0.0,
            in_flight: false,
        }
    }

    /// Record a scroll offset.
    ///
    /// Returns `true` when this event should schedule a frame callback,
    /// i.e. none is already pending. Later events in the same burst return
    /// `false` and only update the stored offset.
    pub fn record(&mut self, offset: f64) -> bool {
        self.latest = offset;
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Consume the pending recomputation, if any, yielding the latest
    /// offset recorded. Clears the in-flight flag so the next scroll event
    /// schedules again.
    pub fn take(&mut self) -> Option<f64> {
        if !self.in_flight {
            return None;
        }
        self.in_flight = false;
        Some(self.latest)
    }

    /// True when a recomputation is pending.
    #[inline]
    #[must_use]
    pub const fn pending(&self) -> bool {
        self.in_flight
    }

    /// Latest offset seen, whether or not a recomputation is pending.
    #[inline]
    #[must_use]
    pub const fn latest(&self) -> f64 {
        self.latest
    }

    /// Drop any pending recomputation. Idempotent.
    pub fn cancel(&mut self) {
        self.in_flight = false;
    }
}
