#![forbid(unsafe_code)]

//! Canonical input events consumed by the runtime.
//!
//! Hosts feed these in whatever order the platform delivers them; the
//! runtime owns all debouncing and coalescing. All payloads are trusted
//! platform-provided numbers, so no validation happens at this layer.

/// A normalized host event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The host viewport resized. The height is carried for completeness
    /// but the viewport snapshot ignores it after first capture.
    Resize { width: f64, height: f64 },
    /// The page scrolled to an absolute offset (>= 0).
    Scroll { offset: f64 },
    /// The host is tearing the component down.
    Unmount,
}

impl Event {
    /// Convenience constructor for resize events.
    #[inline]
    #[must_use]
    pub const fn resize(width: f64, height: f64) -> Self {
        Self::Resize { width, height }
    }

    /// Convenience constructor for scroll events.
    #[inline]
    #[must_use]
    pub const fn scroll(offset: f64) -> Self {
        Self::Scroll { offset }
    }
}
