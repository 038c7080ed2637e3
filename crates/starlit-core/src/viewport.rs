#![forbid(unsafe_code)]

//! Viewport snapshot and device classification.
//!
//! The snapshot deliberately freezes its height at first capture: host
//! environments (mobile browser chrome, on-screen keyboards) fire height
//! resizes that would otherwise make the backdrop jitter. Width is the only
//! dimension that is ever re-applied, and only by the debounced resize path
//! in `starlit-runtime`.

use std::time::Duration;

/// Width below which the viewport is classified as mobile, in pixels.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Device classification derived from viewport width.
///
/// Re-evaluated on every resize event, undebounced. A change of class is
/// the only event that forces a full effect restart (density and size
/// ranges depend on it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    /// Viewport narrower than [`MOBILE_BREAKPOINT`].
    Mobile,
    /// Everything else.
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classify a viewport width.
    #[inline]
    #[must_use]
    pub fn classify(width: f64) -> Self {
        if width < MOBILE_BREAKPOINT {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// True for the mobile class.
    #[inline]
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }

    /// Divisor controlling star count per unit canvas area.
    ///
    /// Lower value means more stars; mobile trades density for frame time.
    #[inline]
    #[must_use]
    pub const fn density_factor(self) -> f64 {
        match self {
            Self::Mobile => 1500.0,
            Self::Desktop => 1000.0,
        }
    }

    /// Width of the uniform star-size band above the 0.5px base radius.
    #[inline]
    #[must_use]
    pub const fn star_size_span(self) -> f64 {
        match self {
            Self::Mobile => 1.5,
            Self::Desktop => 2.0,
        }
    }

    /// Debounce window for resize events.
    #[inline]
    #[must_use]
    pub const fn resize_debounce(self) -> Duration {
        match self {
            Self::Mobile => Duration::from_millis(500),
            Self::Desktop => Duration::from_millis(250),
        }
    }
}

/// Last known viewport geometry, with the height frozen at first capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSnapshot {
    width: f64,
    frozen_height: f64,
    device_class: DeviceClass,
}

impl ViewportSnapshot {
    /// Capture the first measurement. The height recorded here is final.
    #[must_use]
    pub fn capture(width: f64, height: f64) -> Self {
        Self {
            width,
            frozen_height: height,
            device_class: DeviceClass::classify(width),
        }
    }

    /// Last applied width.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Height frozen at first capture. Never updated afterwards.
    #[inline]
    #[must_use]
    pub const fn frozen_height(&self) -> f64 {
        self.frozen_height
    }

    /// Current device class.
    #[inline]
    #[must_use]
    pub const fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    /// Canvas area at the current width and frozen height.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.frozen_height
    }

    /// Re-evaluate the device class against a raw (undebounced) width.
    ///
    /// Returns `true` when the class changed. The stored width is not
    /// touched here; width only moves through [`ViewportSnapshot::apply_width`]
    /// after the debounce window settles.
    pub fn reclassify(&mut self, width: f64) -> bool {
        let class = DeviceClass::classify(width);
        if class == self.device_class {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?class, width, "device class changed");
        self.device_class = class;
        true
    }

    /// Apply a settled width. The frozen height is left as captured.
    pub fn apply_width(&mut self, width: f64) {
        self.width = width;
    }
}
