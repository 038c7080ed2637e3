#![forbid(unsafe_code)]

//! One-shot visibility reveals.
//!
//! Each revealable section gets an observer. The first time the section's
//! visible fraction reaches the threshold the observer fires and detaches
//! itself, so re-scrolling past a section never replays its entrance.

/// Fraction of a section that must be visible to trigger its reveal.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Lifecycle of a reveal observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationState {
    /// Created but not yet watching.
    Unobserved,
    /// Watching for the threshold crossing.
    Observing,
    /// Fired; the observer no longer reacts to anything.
    Triggered,
}

/// Watches one section and fires exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealObserver {
    threshold: f64,
    state: ObservationState,
}

impl RevealObserver {
    /// Create an observer at the default threshold, not yet observing.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_threshold(REVEAL_THRESHOLD)
    }

    /// Create an observer with a custom threshold.
    #[must_use]
    pub const fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            state: ObservationState::Unobserved,
        }
    }

    /// Start watching. No-op if already observing or triggered.
    pub fn observe(&mut self) {
        if self.state == ObservationState::Unobserved {
            self.state = ObservationState::Observing;
        }
    }

    /// Report the current visible fraction of the watched section.
    ///
    /// Returns `true` exactly once, on the report that first reaches the
    /// threshold. The observer detaches itself at that moment.
    pub fn report(&mut self, visible_fraction: f64) -> bool {
        if self.state != ObservationState::Observing {
            return false;
        }
        if visible_fraction >= self.threshold {
            self.state = ObservationState::Triggered;
            return true;
        }
        false
    }

    /// Stop watching without firing. Idempotent; a triggered observer
    /// stays triggered.
    pub fn detach(&mut self) {
        if self.state == ObservationState::Observing {
            self.state = ObservationState::Unobserved;
        }
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> ObservationState {
        self.state
    }

    /// True once the reveal has fired.
    #[inline]
    #[must_use]
    pub const fn triggered(&self) -> bool {
        matches!(self.state, ObservationState::Triggered)
    }
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Fraction of a section that lies inside the viewport.
///
/// `section_top` is the section's offset from the top of the page,
/// `scroll` the current scroll offset, `viewport_height` the window
/// height. A zero-height section is never visible.
#[must_use]
pub fn visible_fraction(
    section_top: f64,
    section_height: f64,
    scroll: f64,
    viewport_height: f64,
) -> f64 {
    if section_height <= 0.0 {
        return 0.0;
    }
    let view_top = scroll;
    let view_bottom = scroll + viewport_height.max(0.0);
    let top = section_top.max(view_top);
    let bottom = (section_top + section_height).min(view_bottom);
    ((bottom - top) / section_height).clamp(0.0, 1.0)
}
