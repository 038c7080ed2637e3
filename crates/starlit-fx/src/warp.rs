#![forbid(unsafe_code)]

//! Scroll-driven warp: blur and scale as a function of scroll depth.

/// Blur ceiling in pixels.
pub const MAX_BLUR: f64 = 8.0;
/// Scroll distance that reaches full blur, as a multiple of the initial
/// viewport height.
pub const TRIGGER_RATIO: f64 = 1.2;
/// Blur-to-extra-scale divisor; full blur yields scale `1.5`.
pub const SCALE_DIVISOR: f64 = 16.0;

/// One computed warp state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Warp {
    /// Blur radius in pixels, `0.0..=MAX_BLUR`.
    pub blur: f64,
    /// Zoom factor, `1.0..=1.5`, derived from the blur.
    pub scale: f64,
}

impl Warp {
    /// No blur, no zoom.
    pub const IDENTITY: Self = Self {
        blur: 0.0,
        scale: 1.0,
    };
}

impl Default for Warp {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Maps absolute scroll offsets to [`Warp`] states.
///
/// The controller captures the initial viewport height once; the trigger
/// distance never tracks later resizes, so scrolling the same physical
/// distance always reads the same regardless of window fiddling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpController {
    initial_height: f64,
}

impl WarpController {
    /// Capture the trigger baseline from the initial viewport height.
    #[must_use]
    pub const fn new(initial_height: f64) -> Self {
        Self { initial_height }
    }

    /// Height captured at construction.
    #[inline]
    #[must_use]
    pub const fn initial_height(&self) -> f64 {
        self.initial_height
    }

    /// Compute the warp for an absolute scroll offset.
    ///
    /// A zero or negative baseline height disables the effect entirely
    /// rather than dividing by zero. Negative offsets (overscroll bounce)
    /// clamp to the identity warp.
    #[must_use]
    pub fn recompute(&self, scroll_offset: f64) -> Warp {
        if self.initial_height <= 0.0 {
            return Warp::IDENTITY;
        }
        let trigger = self.initial_height * TRIGGER_RATIO;
        let progress = scroll_offset.max(0.0) / trigger;
        let blur = (progress * MAX_BLUR).min(MAX_BLUR);
        Warp {
            blur,
            scale: 1.0 + blur / SCALE_DIVISOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_scroll_is_identity() {
        let ctl = WarpController::new(800.0);
        assert_eq!(ctl.recompute(0.0), Warp::IDENTITY);
    }

    #[test]
    fn full_blur_at_trigger_distance() {
        let ctl = WarpController::new(800.0);
        // Trigger distance is 1.2 * 800 = 960.
        let warp = ctl.recompute(960.0);
        assert_eq!(warp.blur, 8.0);
        assert_eq!(warp.scale, 1.5);
    }

    #[test]
    fn half_way_is_half_blur() {
        let ctl = WarpController::new(800.0);
        let warp = ctl.recompute(480.0);
        assert!((warp.blur - 4.0).abs() < 1e-12);
        assert!((warp.scale - 1.25).abs() < 1e-12);
    }

    #[test]
    fn blur_saturates_past_trigger() {
        let ctl = WarpController::new(800.0);
        assert_eq!(ctl.recompute(5000.0), ctl.recompute(960.0));
    }

    #[test]
    fn zero_height_disables_effect() {
        let ctl = WarpController::new(0.0);
        assert_eq!(ctl.recompute(1000.0), Warp::IDENTITY);
    }

    #[test]
    fn negative_offset_clamps_to_identity() {
        let ctl = WarpController::new(800.0);
        assert_eq!(ctl.recompute(-50.0), Warp::IDENTITY);
    }

    proptest! {
        #[test]
        fn blur_is_monotone_in_scroll(h in 1.0f64..4000.0, a in 0.0f64..10_000.0, b in 0.0f64..10_000.0) {
            let ctl = WarpController::new(h);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ctl.recompute(lo).blur <= ctl.recompute(hi).blur);
        }

        #[test]
        fn warp_stays_in_range(h in 0.0f64..4000.0, s in -1000.0f64..100_000.0) {
            let warp = WarpController::new(h).recompute(s);
            prop_assert!((0.0..=MAX_BLUR).contains(&warp.blur));
            prop_assert!((1.0..=1.5).contains(&warp.scale));
        }

        #[test]
        fn scale_is_locked_to_blur(h in 1.0f64..4000.0, s in 0.0f64..10_000.0) {
            let warp = WarpController::new(h).recompute(s);
            prop_assert!((warp.scale - (1.0 + warp.blur / SCALE_DIVISOR)).abs() < 1e-12);
        }
    }
}
