#![forbid(unsafe_code)]

//! Packed 32-bit RGBA color.
//!
//! Layout is `0xRRGGBBAA` (R in the high byte, A in the low byte), matching
//! the storage-buffer convention of GPU-side cell data. Blending is 8.8
//! fixed-point so the per-star draw path never touches floating point per
//! channel.

/// A color packed into a single `u32` as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self(0x0000_00FF);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Opaque color from RGB channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    /// Color from all four channels.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    #[must_use]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Replace the alpha channel with a unit-interval coverage value.
    ///
    /// The input is clamped to `[0, 1]` at this boundary; stored animation
    /// state upstream is allowed to overshoot, the drawn alpha is not.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u32;
        Self((self.0 & 0xFFFF_FF00) | a)
    }

    /// Source-over blend of `self` onto `dst` using 8.8 fixed-point
    /// arithmetic (avoids f64 per channel).
    #[inline]
    #[must_use]
    pub const fn over(self, dst: Self) -> Self {
        let t = self.a() as u32 + 1; // 1..=256
        let inv = 256 - (self.a() as u32);
        let r = ((self.r() as u32 * t + dst.r() as u32 * inv) >> 8) as u8;
        let g = ((self.g() as u32 * t + dst.g() as u32 * inv) >> 8) as u8;
        let b = ((self.b() as u32 * t + dst.b() as u32 * inv) >> 8) as u8;
        let a = dst.a().saturating_add(self.a());
        Self::rgba(r, g, b, a)
    }

    /// Perceived brightness in `0..=255` (integer Rec. 601 luma).
    #[inline]
    #[must_use]
    pub const fn luma(self) -> u8 {
        ((self.r() as u32 * 77 + self.g() as u32 * 150 + self.b() as u32 * 29) >> 8) as u8
    }
}
