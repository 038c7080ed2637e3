#![forbid(unsafe_code)]

//! Owned pixel surface the backdrop effect draws into.
//!
//! A `Surface` is a width x height grid of [`PackedRgba`] pixels. The one
//! contract worth stating up front: after the initial allocation, height
//! never changes. Width-only resizes reallocate the grid at the new width
//! and the original height, which keeps the vertical star distribution
//! stable across orientation-preserving resizes.

use crate::color::PackedRgba;

/// A heap-allocated pixel grid, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
}

impl Surface {
    /// Allocate a surface cleared to transparent. Zero dimensions are
    /// allowed and produce an empty (but valid) surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![PackedRgba::TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    /// Wrap an already-built pixel buffer. The buffer length must match
    /// `width * height`.
    pub(crate) fn from_raw(width: u32, height: u32, pixels: Vec<PackedRgba>) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// True when the surface holds no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw row-major pixel slice.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<PackedRgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Fill the whole surface with one color.
    pub fn clear(&mut self, color: PackedRgba) {
        self.pixels.fill(color);
    }

    /// Reallocate at a new width, keeping the height frozen at whatever it
    /// was at construction. Contents are cleared, not preserved; the caller
    /// redraws the whole backdrop after a resize anyway.
    pub fn set_width(&mut self, width: u32) {
        if width == self.width {
            self.pixels.fill(PackedRgba::TRANSPARENT);
            return;
        }
        self.width = width;
        self.pixels = vec![PackedRgba::TRANSPARENT; (width as usize) * (self.height as usize)];
    }

    /// Source-over blend a single pixel. Out-of-bounds writes are dropped.
    #[inline]
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: PackedRgba) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[idx] = color.over(self.pixels[idx]);
    }

    /// Source-over blend an axis-aligned rectangle, clipped to the grid.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: PackedRgba) {
        for yy in y..y + i64::from(h) {
            for xx in x..x + i64::from(w) {
                self.blend_pixel(xx, yy, color);
            }
        }
    }

    /// Rasterize a filled circle at `(cx, cy)` with radius `radius`,
    /// source-over blended.
    ///
    /// Sub-pixel circles that the scanline pass misses entirely still light
    /// the pixel containing the center, so a radius-0.5 star on a large
    /// surface is never invisible.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: PackedRgba) {
        if self.is_empty() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let r2 = radius * radius;
        let y_lo = (cy - radius).floor() as i64;
        let y_hi = (cy + radius).ceil() as i64;
        let x_lo = (cx - radius).floor() as i64;
        let x_hi = (cx + radius).ceil() as i64;

        let mut lit_any = false;
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                // Sample at the pixel center.
                let dx = (x as f64 + 0.5) - cx;
                let dy = (y as f64 + 0.5) - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color);
                    lit_any = true;
                }
            }
        }

        if !lit_any {
            // Sub-pixel fallback: the circle fits between sample points.
            self.blend_pixel(cx.floor() as i64, cy.floor() as i64, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_transparent() {
        let s = Surface::new(4, 3);
        assert_eq!(s.width(), 4);
        assert_eq!(s.height(), 3);
        assert!(s.pixels().iter().all(|&p| p == PackedRgba::TRANSPARENT));
    }

    #[test]
    fn zero_size_is_valid_and_inert() {
        let mut s = Surface::new(0, 0);
        assert!(s.is_empty());
        s.fill_circle(1.0, 1.0, 2.0, PackedRgba::WHITE);
        assert_eq!(s.pixels().len(), 0);
    }

    #[test]
    fn set_width_keeps_height() {
        let mut s = Surface::new(100, 60);
        s.set_width(180);
        assert_eq!(s.width(), 180);
        assert_eq!(s.height(), 60, "height is frozen at construction");
        assert_eq!(s.pixels().len(), 180 * 60);
    }

    #[test]
    fn set_width_clears_even_at_same_width() {
        let mut s = Surface::new(10, 10);
        s.fill_circle(5.0, 5.0, 3.0, PackedRgba::WHITE);
        s.set_width(10);
        assert!(s.pixels().iter().all(|&p| p == PackedRgba::TRANSPARENT));
    }

    #[test]
    fn fill_circle_lights_center() {
        let mut s = Surface::new(20, 20);
        s.fill_circle(10.0, 10.0, 3.0, PackedRgba::WHITE);
        assert_eq!(s.pixel(10, 10), Some(PackedRgba::WHITE));
        assert_eq!(s.pixel(0, 0), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn subpixel_circle_still_visible() {
        let mut s = Surface::new(20, 20);
        // Radius 0.4 centered on a pixel corner misses every pixel-center
        // sample; the fallback must light the containing pixel.
        s.fill_circle(5.0, 5.0, 0.4, PackedRgba::WHITE);
        assert!(
            s.pixels().iter().any(|&p| p != PackedRgba::TRANSPARENT),
            "sub-pixel star must light at least one pixel"
        );
    }

    #[test]
    fn circle_clipped_at_edges() {
        let mut s = Surface::new(8, 8);
        s.fill_circle(0.0, 0.0, 3.0, PackedRgba::WHITE);
        // No panic and the in-bounds quadrant is lit.
        assert_ne!(s.pixel(0, 0), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn fill_rect_clips_to_grid() {
        let mut s = Surface::new(8, 8);
        s.fill_rect(-2, -2, 4, 4, PackedRgba::WHITE);
        assert_eq!(s.pixel(1, 1), Some(PackedRgba::WHITE));
        assert_eq!(s.pixel(2, 2), Some(PackedRgba::TRANSPARENT));
        assert_eq!(s.lit_pixels(), 4);
    }

    #[test]
    fn blend_accumulates_alpha() {
        let mut s = Surface::new(4, 4);
        let faint = PackedRgba::WHITE.with_alpha(0.3);
        s.fill_circle(2.0, 2.0, 0.6, faint);
        s.fill_circle(2.0, 2.0, 0.6, faint);
        let p = s.pixel(2, 2).unwrap();
        assert!(p.a() > faint.a(), "overlapping draws should accumulate");
    }
}
