#![forbid(unsafe_code)]

//! Backdrop effects for the Starlit page.
//!
//! # Role in Starlit
//! `starlit-fx` holds the decorative layer: the starfield that fills the
//! backdrop canvas and the warp controller that maps scroll depth to a
//! blur + scale pair. Effects are deterministic given a seed and draw into
//! a `starlit-render` surface; they know nothing about event timing, which
//! lives in `starlit-runtime`.

pub mod starfield;
pub mod warp;

use starlit_render::Surface;

pub use starfield::{Star, StarfieldFx, StarfieldParams};
pub use warp::{Warp, WarpController};

/// Rendering quality tier for backdrop effects.
///
/// Effects are decorative, so lower tiers thin the work rather than
/// degrade correctness; `Off` renders nothing and leaves the output
/// buffer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FxQuality {
    /// Render everything.
    #[default]
    Full,
    /// Drop roughly a quarter of the work.
    Reduced,
    /// Drop roughly half of the work.
    Minimal,
    /// Render nothing.
    Off,
}

impl FxQuality {
    /// False only for [`FxQuality::Off`].
    #[inline]
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// Per-frame inputs shared by every backdrop effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FxContext {
    /// Monotonic frame counter.
    pub frame: u64,
    /// Seconds since mount.
    pub time_seconds: f64,
    /// Quality tier for this frame.
    pub quality: FxQuality,
}

/// A full-canvas decorative effect.
///
/// Implementations own their state (populations, caches) and are driven by
/// the runtime once per frame. `render` must be deterministic for a fixed
/// state and context.
pub trait BackdropFx {
    /// Stable identifier, used in logs.
    fn name(&self) -> &'static str;

    /// The output surface changed dimensions.
    fn resize(&mut self, width: u32, height: u32);

    /// Advance one frame and draw into `out`.
    fn render(&mut self, ctx: &FxContext, out: &mut Surface);
}
