#![forbid(unsafe_code)]

//! Debounced resize handling with a width-delta regeneration gate.
//!
//! Raw resize events arrive in bursts while the user drags a window edge.
//! The debouncer waits for the stream to settle, then compares the settled
//! width against the last width that actually regenerated the field. Small
//! nudges are ignored without updating that reference, so repeated nudges
//! accumulate until they cross the gate.

use std::time::Duration;

use tracing::debug;
use web_time::Instant;

/// Settled widths within this distance of the last applied width do not
/// regenerate.
pub const REGENERATE_DELTA: f64 = 50.0;

/// Outcome of a debouncer tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeAction {
    /// Nothing pending, or still inside the settling window.
    None,
    /// The stream settled far enough from the last applied width.
    Apply {
        /// The settled width to regenerate at.
        width: f64,
        /// Time the stream took to settle.
        elapsed: Duration,
    },
    /// The stream settled but the move was within the gate.
    Ignored {
        /// The settled width that was dropped.
        width: f64,
        /// Distance from the last applied width.
        delta: f64,
    },
}

/// Debounces raw resize widths into settled [`ResizeAction`]s.
///
/// All time flows in through `now` parameters; the debouncer never reads
/// a clock itself.
#[derive(Debug)]
pub struct ResizeDebouncer {
    debounce: Duration,
    last_resize: Option<Instant>,
    pending_width: Option<f64>,
    last_applied: f64,
}

impl ResizeDebouncer {
    /// Create a debouncer with the initial applied width.
    #[must_use]
    pub fn new(debounce: Duration, initial_width: f64) -> Self {
        Self {
            debounce,
            last_resize: None,
            pending_width: None,
            last_applied: initial_width,
        }
    }

    /// Record a raw resize event at `now`. Restarts the settling window.
    pub fn handle_resize_at(&mut self, width: f64, now: Instant) {
        if self.pending_width.is_none() && width == self.last_applied {
            return;
        }
        self.pending_width = Some(width);
        self.last_resize = Some(now);
    }

    /// Check whether a pending resize has settled.
    pub fn tick_at(&mut self, now: Instant) -> ResizeAction {
        let Some(pending) = self.pending_width else {
            return ResizeAction::None;
        };
        let Some(last) = self.last_resize else {
            return ResizeAction::None;
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.debounce {
            return ResizeAction::None;
        }
        self.pending_width = None;
        self.last_resize = None;

        let delta = (pending - self.last_applied).abs();
        if delta > REGENERATE_DELTA {
            self.last_applied = pending;
            ResizeAction::Apply {
                width: pending,
                elapsed,
            }
        } else {
            // last_applied stays put: small moves accumulate until the
            // gate is crossed.
            debug!(width = pending, delta, "resize settled within gate, ignored");
            ResizeAction::Ignored {
                width: pending,
                delta,
            }
        }
    }

    /// Remaining settling time, if a resize is pending.
    #[must_use]
    pub fn time_until_apply(&self, now: Instant) -> Option<Duration> {
        let _pending = self.pending_width?;
        let last = self.last_resize?;
        let elapsed = now.saturating_duration_since(last);
        Some(self.debounce.saturating_sub(elapsed))
    }

    /// True when a resize is waiting to settle.
    #[must_use]
    pub const fn pending(&self) -> bool {
        self.pending_width.is_some()
    }

    /// Drop any pending resize without applying it.
    pub fn cancel(&mut self) {
        self.pending_width = None;
        self.last_resize = None;
    }

    /// Switch the settling window (used when the device class changes).
    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Force the applied-width reference, bypassing the gate. Used after a
    /// device-class restart already regenerated at this width.
    pub fn reset_applied(&mut self, width: f64) {
        self.last_applied = width;
    }

    /// Width the field was last regenerated at.
    #[must_use]
    pub const fn last_applied(&self) -> f64 {
        self.last_applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DEBOUNCE: Duration = Duration::from_millis(250);

    fn debouncer() -> (ResizeDebouncer, Instant) {
        (ResizeDebouncer::new(DEBOUNCE, 1024.0), Instant::now())
    }

    #[test]
    fn applies_after_debounce_when_delta_large() {
        let (mut d, now) = debouncer();
        d.handle_resize_at(1100.0, now);
        assert_eq!(d.tick_at(now + Duration::from_millis(100)), ResizeAction::None);
        assert_eq!(
            d.tick_at(now + Duration::from_millis(260)),
            ResizeAction::Apply {
                width: 1100.0,
                elapsed: Duration::from_millis(260),
            }
        );
        assert_eq!(d.last_applied(), 1100.0);
    }

    #[test]
    fn small_delta_is_ignored_and_reference_stays() {
        let (mut d, now) = debouncer();
        d.handle_resize_at(1040.0, now);
        assert_eq!(
            d.tick_at(now + DEBOUNCE),
            ResizeAction::Ignored {
                width: 1040.0,
                delta: 16.0,
            }
        );
        assert_eq!(d.last_applied(), 1024.0);
    }

    #[test]
    fn ignored_deltas_accumulate_to_an_apply() {
        let (mut d, mut now) = debouncer();
        // Two nudges of 40px each: the first is within the gate, the
        // second lands 80px from the untouched reference.
        d.handle_resize_at(1064.0, now);
        now += DEBOUNCE;
        assert!(matches!(d.tick_at(now), ResizeAction::Ignored { .. }));

        d.handle_resize_at(1104.0, now);
        now += DEBOUNCE;
        assert!(matches!(
            d.tick_at(now),
            ResizeAction::Apply { width, .. } if width == 1104.0
        ));
    }

    #[test]
    fn delta_exactly_at_gate_is_ignored() {
        let (mut d, now) = debouncer();
        d.handle_resize_at(1074.0, now);
        // |1074 - 1024| == 50, and the gate is strictly greater-than.
        assert!(matches!(d.tick_at(now + DEBOUNCE), ResizeAction::Ignored { .. }));
    }

    #[test]
    fn burst_restarts_the_window() {
        let (mut d, now) = debouncer();
        d.handle_resize_at(1100.0, now);
        d.handle_resize_at(1200.0, now + Duration::from_millis(200));
        // 250ms after the first event but only 50ms after the second.
        assert_eq!(d.tick_at(now + Duration::from_millis(250)), ResizeAction::None);
        assert!(matches!(
            d.tick_at(now + Duration::from_millis(450)),
            ResizeAction::Apply { width, .. } if width == 1200.0
        ));
    }

    #[test]
    fn resize_back_to_applied_width_is_dropped_early() {
        let (mut d, now) = debouncer();
        d.handle_resize_at(1024.0, now);
        assert!(!d.pending());
        assert_eq!(d.tick_at(now + DEBOUNCE), ResizeAction::None);
    }

    #[test]
    fn cancel_drops_pending() {
        let (mut d, now) = debouncer();
        d.handle_resize_at(1200.0, now);
        assert!(d.pending());
        d.cancel();
        assert!(!d.pending());
        assert_eq!(d.tick_at(now + DEBOUNCE), ResizeAction::None);
    }

    #[test]
    fn time_until_apply_counts_down() {
        let (mut d, now) = debouncer();
        assert_eq!(d.time_until_apply(now), None);
        d.handle_resize_at(1200.0, now);
        assert_eq!(
            d.time_until_apply(now + Duration::from_millis(100)),
            Some(Duration::from_millis(150))
        );
        assert_eq!(d.time_until_apply(now + Duration::from_millis(300)), Some(Duration::ZERO));
    }

    proptest! {
        // The gate law: a settled width applies iff it sits strictly more
        // than REGENERATE_DELTA from the reference, and the reference only
        // moves on an apply.
        #[test]
        fn settled_width_applies_iff_it_crosses_the_gate(width in 0.0f64..4000.0) {
            let (mut d, now) = debouncer();
            d.handle_resize_at(width, now);
            let action = d.tick_at(now + DEBOUNCE);
            let delta = (width - 1024.0).abs();
            if delta > REGENERATE_DELTA {
                prop_assert!(
                    matches!(action, ResizeAction::Apply { width: w, .. } if w == width),
                    "expected Apply with width {}, got {:?}", width, action
                );
                prop_assert_eq!(d.last_applied(), width);
            } else {
                // Exactly the reference width is dropped on arrival and
                // ticks to None; anything else inside the gate is Ignored.
                prop_assert!(
                    !matches!(action, ResizeAction::Apply { .. }),
                    "expected non-Apply, got {:?}", action
                );
                prop_assert_eq!(d.last_applied(), 1024.0);
            }
        }
    }

    #[test]
    fn set_debounce_applies_to_pending_window() {
        let (mut d, now) = debouncer();
        d.set_debounce(Duration::from_millis(500));
        d.handle_resize_at(1200.0, now);
        assert_eq!(d.tick_at(now + Duration::from_millis(300)), ResizeAction::None);
        assert!(matches!(
            d.tick_at(now + Duration::from_millis(500)),
            ResizeAction::Apply { .. }
        ));
    }
}
