#![forbid(unsafe_code)]

//! The mounted starfield: canvas, population, warp, and lifecycle.
//!
//! `StarfieldMount` ties the pieces together the way the page wires them:
//! raw resize events feed the debouncer (except device-class flips, which
//! restart immediately), scroll events feed the coalescer, and each frame
//! renders the field then applies the current warp. Teardown is idempotent
//! and every operation no-ops once the canvas is gone.

use starlit_core::coalescer::ScrollCoalescer;
use starlit_core::viewport::ViewportSnapshot;
use starlit_fx::warp::{Warp, WarpController};
use starlit_fx::{BackdropFx, FxContext, FxQuality, StarfieldFx, StarfieldParams};
use starlit_render::present::warp_into;
use starlit_render::{PackedRgba, Surface};
use tracing::{debug, info};
use web_time::Instant;

use crate::resize::{ResizeAction, ResizeDebouncer};

/// Nominal frame cadence used to derive effect time from the frame count.
const FRAME_SECONDS: f64 = 1.0 / 60.0;

/// A mounted backdrop: owns the canvas and all per-page effect state.
#[derive(Debug)]
pub struct StarfieldMount {
    canvas: Option<Surface>,
    composited: Surface,
    fx: StarfieldFx,
    viewport: ViewportSnapshot,
    debouncer: ResizeDebouncer,
    coalescer: ScrollCoalescer,
    warp_ctl: WarpController,
    warp: Warp,
    frame: u64,
}

impl StarfieldMount {
    /// Mount at the initial viewport size and generate the first
    /// population. The height captured here stays the canvas height and
    /// the warp trigger baseline for the life of the mount.
    #[must_use]
    pub fn mount(width: f64, height: f64, params: StarfieldParams) -> Self {
        let viewport = ViewportSnapshot::capture(width, height);
        let mut fx = StarfieldFx::new(params);
        fx.generate(&viewport);

        let w = width.max(0.0) as u32;
        let h = height.max(0.0) as u32;
        let debouncer = ResizeDebouncer::new(viewport.device_class().resize_debounce(), width);

        info!(
            width,
            height,
            stars = fx.stars().len(),
            class = ?viewport.device_class(),
            "starfield mounted"
        );

        Self {
            canvas: Some(Surface::new(w, h)),
            composited: Surface::new(w, h),
            fx,
            viewport,
            debouncer,
            coalescer: ScrollCoalescer::new(),
            warp_ctl: WarpController::new(height),
            warp: Warp::IDENTITY,
            frame: 0,
        }
    }

    /// True until [`unmount`](Self::unmount) runs.
    #[inline]
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    /// Current population size.
    #[inline]
    #[must_use]
    pub fn star_count(&self) -> usize {
        self.fx.stars().len()
    }

    /// Number of device-class restarts so far.
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.fx.epoch()
    }

    /// Warp currently applied at presentation.
    #[inline]
    #[must_use]
    pub const fn warp(&self) -> Warp {
        self.warp
    }

    /// Viewport as the mount sees it.
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> &ViewportSnapshot {
        &self.viewport
    }

    /// Feed a raw (undebounced) resize event.
    ///
    /// The height is ignored past first capture. A device-class flip skips
    /// the debouncer entirely: the pending resize is dropped, the settling
    /// window switches to the new class, and the field restarts at the new
    /// width immediately.
    pub fn handle_resize_at(&mut self, width: f64, _height: f64, now: Instant) {
        if self.canvas.is_none() {
            return;
        }
        if self.viewport.reclassify(width) {
            self.debouncer.cancel();
            self.debouncer
                .set_debounce(self.viewport.device_class().resize_debounce());
            self.apply_width(width);
            self.fx.restart(&self.viewport);
            self.debouncer.reset_applied(width);
            info!(
                width,
                class = ?self.viewport.device_class(),
                epoch = self.fx.epoch(),
                stars = self.fx.stars().len(),
                "device class flip, field restarted"
            );
            return;
        }
        self.debouncer.handle_resize_at(width, now);
    }

    /// Drive the debounce clock. Call once per frame.
    pub fn tick_at(&mut self, now: Instant) {
        if self.canvas.is_none() {
            return;
        }
        match self.debouncer.tick_at(now) {
            ResizeAction::Apply { width, elapsed } => {
                self.apply_width(width);
                self.fx.generate(&self.viewport);
                info!(
                    width,
                    ?elapsed,
                    stars = self.fx.stars().len(),
                    "resize settled, field regenerated"
                );
            }
            ResizeAction::Ignored { .. } | ResizeAction::None => {}
        }
    }

    /// Feed a raw scroll event. Coalesces to at most one warp recompute
    /// per frame.
    pub fn handle_scroll(&mut self, offset: f64) {
        if self.canvas.is_none() {
            return;
        }
        self.coalescer.record(offset);
    }

    /// Render one frame: consume the coalesced scroll (if any), advance
    /// the blink animation, and composite through the warp. Returns the
    /// presented surface, or `None` after unmount.
    pub fn render_frame(&mut self, quality: FxQuality) -> Option<&Surface> {
        let canvas = self.canvas.as_mut()?;

        if let Some(offset) = self.coalescer.take() {
            self.warp = self.warp_ctl.recompute(offset);
            debug!(offset, blur = self.warp.blur, scale = self.warp.scale, "warp updated");
        }

        self.frame += 1;
        let ctx = FxContext {
            frame: self.frame,
            time_seconds: self.frame as f64 * FRAME_SECONDS,
            quality,
        };
        canvas.clear(PackedRgba::TRANSPARENT);
        self.fx.render(&ctx, canvas);
        warp_into(canvas, &mut self.composited, self.warp.blur, self.warp.scale);
        Some(&self.composited)
    }

    /// Tear down. Idempotent: the canvas is dropped, pending work is
    /// cancelled, and every later call on the mount is a no-op.
    pub fn unmount(&mut self) {
        if self.canvas.take().is_some() {
            self.coalescer.cancel();
            self.debouncer.cancel();
            info!(frames = self.frame, "starfield unmounted");
        }
    }

    fn apply_width(&mut self, width: f64) {
        self.viewport.apply_width(width);
        let w = width.max(0.0) as u32;
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.set_width(w);
        }
        self.composited.set_width(w);
    }
}
