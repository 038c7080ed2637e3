#![forbid(unsafe_code)]

//! Starfield backdrop effect.
//!
//! Deterministic given a seed, population regenerated wholesale on resize.

use starlit_core::viewport::ViewportSnapshot;
use starlit_render::{PackedRgba, Surface};

use crate::{BackdropFx, FxContext, FxQuality};

/// Seed used when the host does not supply one.
pub const DEFAULT_SEED: u64 = 0x5354_4152_4649_4C44;

/// A single star in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Horizontal position in `[0, width)`.
    pub x: f64,
    /// Vertical position in `[0, height)`.
    pub y: f64,
    /// Draw radius in pixels.
    pub size: f64,
    /// Current opacity. Deliberately unclamped: the blink step may
    /// overshoot its band by less than one speed step, and the draw path
    /// clamps at the alpha boundary instead.
    pub opacity: f64,
    /// Opacity change per frame.
    pub blink_speed: f64,
    /// `+1.0` brightening, `-1.0` dimming.
    pub blink_direction: f64,
}

/// Parameters controlling star generation and blink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldParams {
    /// Minimum draw radius; the device-class size span sits on top.
    pub base_radius: f64,
    /// Lower edge of the per-star blink speed band.
    pub blink_speed_min: f64,
    /// Width of the blink speed band.
    pub blink_speed_span: f64,
    /// Blink turnaround at the dim end.
    pub opacity_floor: f64,
    /// Blink turnaround at the bright end.
    pub opacity_ceil: f64,
    /// Base star color; per-star opacity modulates the alpha.
    pub star_color: PackedRgba,
    /// RNG seed for the population.
    pub seed: u64,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            base_radius: 0.5,
            blink_speed_min: 0.005,
            blink_speed_span: 0.02,
            opacity_floor: 0.1,
            opacity_ceil: 1.0,
            star_color: PackedRgba::WHITE,
            seed: DEFAULT_SEED,
        }
    }
}

impl StarfieldParams {
    fn star_count_for_quality(total: usize, quality: FxQuality) -> usize {
        if total == 0 {
            return 0;
        }
        match quality {
            FxQuality::Full => total,
            FxQuality::Reduced => total.saturating_sub(total / 4).max(1),
            FxQuality::Minimal => total.saturating_sub(total / 2).max(1),
            FxQuality::Off => 0,
        }
    }
}

/// Starfield backdrop effect.
#[derive(Debug, Clone)]
pub struct StarfieldFx {
    params: StarfieldParams,
    rng: fastrand::Rng,
    stars: Vec<Star>,
    width: u32,
    height: u32,
    epoch: u64,
}

impl StarfieldFx {
    /// Create an empty starfield; call [`generate`](Self::generate) with a
    /// viewport before the first frame.
    #[must_use]
    pub fn new(params: StarfieldParams) -> Self {
        let rng = fastrand::Rng::with_seed(params.seed);
        Self {
            params,
            rng,
            stars: Vec::new(),
            width: 0,
            height: 0,
            epoch: 0,
        }
    }

    /// Current population.
    #[inline]
    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Number of full restarts since construction.
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Regenerate the whole population for the given viewport.
    ///
    /// The count is `floor(area / density_factor)`; the old population is
    /// replaced wholesale, never resized in place, so stale stars can never
    /// linger past a resize.
    pub fn generate(&mut self, viewport: &ViewportSnapshot) {
        let class = viewport.device_class();
        self.width = viewport.width().max(0.0) as u32;
        self.height = viewport.frozen_height().max(0.0) as u32;

        let count = (viewport.area() / class.density_factor()).max(0.0) as usize;
        let span = class.star_size_span();
        let w = f64::from(self.width);
        let h = f64::from(self.height);

        let mut stars = Vec::with_capacity(count);
        for _ in 0..count {
            stars.push(Star {
                x: self.rng.f64() * w,
                y: self.rng.f64() * h,
                size: self.rng.f64() * span + self.params.base_radius,
                opacity: self.rng.f64(),
                blink_speed: self.rng.f64() * self.params.blink_speed_span
                    + self.params.blink_speed_min,
                blink_direction: if self.rng.bool() { 1.0 } else { -1.0 },
            });
        }
        self.stars = stars;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            count = self.stars.len(),
            width = self.width,
            height = self.height,
            "starfield generated"
        );
    }

    /// Full restart: reseed and regenerate. Used when the device class
    /// flips, since density and size bands both change.
    pub fn restart(&mut self, viewport: &ViewportSnapshot) {
        self.epoch += 1;
        self.rng = fastrand::Rng::with_seed(self.params.seed.wrapping_add(self.epoch));
        self.generate(viewport);
    }

    /// Advance every star one blink step.
    ///
    /// The direction flips after the opacity crosses a band edge, so the
    /// stored value can overshoot by up to one step. The overshoot is kept;
    /// the next step walks back inside the band.
    pub fn advance(&mut self) {
        let floor = self.params.opacity_floor;
        let ceil = self.params.opacity_ceil;
        for star in &mut self.stars {
            star.opacity += star.blink_speed * star.blink_direction;
            if star.opacity >= ceil || star.opacity <= floor {
                star.blink_direction = -star.blink_direction;
            }
        }
    }
}

impl Default for StarfieldFx {
    fn default() -> Self {
        Self::new(StarfieldParams::default())
    }
}

impl BackdropFx for StarfieldFx {
    fn name(&self) -> &'static str {
        "starfield"
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, ctx: &FxContext, out: &mut Surface) {
        if !ctx.quality.is_enabled() || out.is_empty() {
            return;
        }
        self.advance();

        let drawn = StarfieldParams::star_count_for_quality(self.stars.len(), ctx.quality);
        let color = self.params.star_color;
        for star in &self.stars[..drawn] {
            out.fill_circle(star.x, star.y, star.size, color.with_alpha(star.opacity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use starlit_core::viewport::DeviceClass;

    fn desktop_vp() -> ViewportSnapshot {
        ViewportSnapshot::capture(1024.0, 800.0)
    }

    fn mobile_vp() -> ViewportSnapshot {
        ViewportSnapshot::capture(375.0, 667.0)
    }

    #[test]
    fn population_follows_area_over_density_desktop() {
        let mut fx = StarfieldFx::default();
        fx.generate(&desktop_vp());
        // 1024 * 800 / 1000, floored.
        assert_eq!(fx.stars().len(), 819);
    }

    #[test]
    fn population_follows_area_over_density_mobile() {
        let vp = mobile_vp();
        assert_eq!(vp.device_class(), DeviceClass::Mobile);
        let mut fx = StarfieldFx::default();
        fx.generate(&vp);
        // 375 * 667 / 1500 = 166.75, floored.
        assert_eq!(fx.stars().len(), 166);
    }

    #[test]
    fn generated_fields_are_in_band() {
        let mut fx = StarfieldFx::default();
        fx.generate(&desktop_vp());
        for star in fx.stars() {
            assert!((0.0..1024.0).contains(&star.x));
            assert!((0.0..800.0).contains(&star.y));
            assert!((0.5..2.5).contains(&star.size), "size {}", star.size);
            assert!((0.0..1.0).contains(&star.opacity));
            assert!(
                (0.005..0.025).contains(&star.blink_speed),
                "speed {}",
                star.blink_speed
            );
            assert!(star.blink_direction == 1.0 || star.blink_direction == -1.0);
        }
    }

    #[test]
    fn mobile_sizes_use_narrower_band() {
        let mut fx = StarfieldFx::default();
        fx.generate(&mobile_vp());
        for star in fx.stars() {
            assert!((0.5..2.0).contains(&star.size), "size {}", star.size);
        }
    }

    #[test]
    fn generate_replaces_population_wholesale() {
        let mut fx = StarfieldFx::default();
        fx.generate(&desktop_vp());
        let mut vp = desktop_vp();
        vp.apply_width(500.0);
        fx.generate(&vp);
        // 500 * 800 / 1000; the class stays Desktop until reclassified.
        assert_eq!(fx.stars().len(), 400);
    }

    #[test]
    fn advance_flips_at_bright_edge_and_keeps_overshoot() {
        let mut fx = StarfieldFx::default();
        fx.stars = vec![Star {
            x: 1.0,
            y: 1.0,
            size: 1.0,
            opacity: 0.995,
            blink_speed: 0.01,
            blink_direction: 1.0,
        }];
        fx.advance();
        let star = fx.stars()[0];
        assert!((star.opacity - 1.005).abs() < 1e-12, "overshoot kept");
        assert_eq!(star.blink_direction, -1.0);

        fx.advance();
        let star = fx.stars()[0];
        assert!((star.opacity - 0.995).abs() < 1e-12);
        assert_eq!(star.blink_direction, -1.0, "single flip per crossing");
    }

    #[test]
    fn advance_flips_at_dim_edge() {
        let mut fx = StarfieldFx::default();
        fx.stars = vec![Star {
            x: 1.0,
            y: 1.0,
            size: 1.0,
            opacity: 0.105,
            blink_speed: 0.01,
            blink_direction: -1.0,
        }];
        fx.advance();
        let star = fx.stars()[0];
        assert!(star.opacity <= 0.1);
        assert_eq!(star.blink_direction, 1.0);
    }

    #[test]
    fn same_seed_same_population() {
        let mut a = StarfieldFx::default();
        let mut b = StarfieldFx::default();
        a.generate(&desktop_vp());
        b.generate(&desktop_vp());
        assert_eq!(a.stars(), b.stars());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = StarfieldFx::new(StarfieldParams {
            seed: 1,
            ..StarfieldParams::default()
        });
        let mut b = StarfieldFx::new(StarfieldParams {
            seed: 2,
            ..StarfieldParams::default()
        });
        a.generate(&desktop_vp());
        b.generate(&desktop_vp());
        assert_ne!(a.stars(), b.stars());
    }

    #[test]
    fn restart_bumps_epoch_and_reshuffles() {
        let mut fx = StarfieldFx::default();
        fx.generate(&desktop_vp());
        let before = fx.stars().to_vec();
        fx.restart(&desktop_vp());
        assert_eq!(fx.epoch(), 1);
        assert_eq!(fx.stars().len(), before.len());
        assert_ne!(fx.stars(), &before[..]);
    }

    #[test]
    fn render_is_deterministic() {
        let vp = desktop_vp();
        let ctx = FxContext {
            frame: 1,
            time_seconds: 0.016,
            quality: FxQuality::Full,
        };

        let mut hashes = Vec::new();
        for _ in 0..2 {
            let mut fx = StarfieldFx::default();
            fx.generate(&vp);
            let mut out = Surface::new(1024, 800);
            fx.render(&ctx, &mut out);
            hashes.push(out.pixel_hash());
        }
        assert_eq!(hashes[0], hashes[1]);
    }

    #[test]
    fn render_lights_pixels() {
        let mut fx = StarfieldFx::default();
        fx.generate(&desktop_vp());
        let mut out = Surface::new(1024, 800);
        fx.render(
            &FxContext {
                frame: 0,
                time_seconds: 0.0,
                quality: FxQuality::Full,
            },
            &mut out,
        );
        assert!(out.lit_pixels() > 0);
    }

    #[test]
    fn quality_off_leaves_surface_untouched() {
        let mut fx = StarfieldFx::default();
        fx.generate(&desktop_vp());
        let mut out = Surface::new(1024, 800);
        fx.render(
            &FxContext {
                frame: 0,
                time_seconds: 0.0,
                quality: FxQuality::Off,
            },
            &mut out,
        );
        assert_eq!(out.lit_pixels(), 0);
    }

    #[test]
    fn quality_reduces_drawn_count() {
        let full = StarfieldParams::star_count_for_quality(800, FxQuality::Full);
        let reduced = StarfieldParams::star_count_for_quality(800, FxQuality::Reduced);
        let minimal = StarfieldParams::star_count_for_quality(800, FxQuality::Minimal);
        assert_eq!(full, 800);
        assert_eq!(reduced, 600);
        assert_eq!(minimal, 400);
        assert_eq!(StarfieldParams::star_count_for_quality(800, FxQuality::Off), 0);
        assert_eq!(StarfieldParams::star_count_for_quality(0, FxQuality::Full), 0);
    }

    #[test]
    fn empty_viewport_yields_no_stars() {
        let mut fx = StarfieldFx::default();
        fx.generate(&ViewportSnapshot::capture(0.0, 0.0));
        assert!(fx.stars().is_empty());
        let mut out = Surface::new(0, 0);
        fx.render(
            &FxContext {
                frame: 0,
                time_seconds: 0.0,
                quality: FxQuality::Full,
            },
            &mut out,
        );
    }

    proptest! {
        // Stars spawn anywhere in [0, 1) and the walk overshoots a band
        // edge by strictly less than one speed step before flipping, so the
        // stored opacity can never leave (-max_step, 1 + max_step).
        #[test]
        fn opacity_stays_within_one_step_of_band(seed in 0u64..1_000, frames in 1usize..400) {
            let mut fx = StarfieldFx::new(StarfieldParams {
                seed,
                ..StarfieldParams::default()
            });
            fx.generate(&ViewportSnapshot::capture(200.0, 150.0));
            for _ in 0..frames {
                fx.advance();
            }
            for star in fx.stars() {
                prop_assert!(star.opacity > -0.025, "opacity {}", star.opacity);
                prop_assert!(star.opacity < 1.0 + 0.025, "opacity {}", star.opacity);
            }
        }

        #[test]
        fn count_follows_the_area_law(w in 0.0f64..2000.0, h in 0.0f64..1200.0) {
            let vp = ViewportSnapshot::capture(w, h);
            let mut fx = StarfieldFx::default();
            fx.generate(&vp);
            let expected = (w * h / vp.device_class().density_factor()) as usize;
            prop_assert_eq!(fx.stars().len(), expected);
        }

        #[test]
        fn directions_stay_unit(seed in 0u64..1_000, frames in 1usize..200) {
            let mut fx = StarfieldFx::new(StarfieldParams {
                seed,
                ..StarfieldParams::default()
            });
            fx.generate(&ViewportSnapshot::capture(120.0, 90.0));
            for _ in 0..frames {
                fx.advance();
            }
            for star in fx.stars() {
                prop_assert!(star.blink_direction == 1.0 || star.blink_direction == -1.0);
            }
        }
    }
}
