#![forbid(unsafe_code)]

//! Headless inspection probes for CI.
//!
//! Nothing here touches a terminal. Tests render into a [`Surface`], then
//! count or hash pixels to assert on the output without golden images.

use crate::color::PackedRgba;
use crate::surface::Surface;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x100_0000_01b3;

impl Surface {
    /// Number of pixels that are not fully transparent.
    #[must_use]
    pub fn lit_pixels(&self) -> usize {
        self.pixels()
            .iter()
            .filter(|&&p| p != PackedRgba::TRANSPARENT)
            .count()
    }

    /// FNV-1a hash of the full pixel buffer, dimensions included.
    ///
    /// Two surfaces hash equal iff they are pixel-identical, which is the
    /// backbone of the determinism tests: same seed, same event script,
    /// same hash.
    #[must_use]
    pub fn pixel_hash(&self) -> u64 {
        let mut h = FNV_OFFSET;
        let mut mix = |v: u32| {
            for byte in v.to_le_bytes() {
                h ^= u64::from(byte);
                h = h.wrapping_mul(FNV_PRIME);
            }
        };
        mix(self.width());
        mix(self.height());
        for p in self.pixels() {
            mix(p.0);
        }
        h
    }

    /// Mean luma over all pixels, 0.0 for an empty surface. Coarse probe
    /// for "did the blur dim the peak / preserve overall energy".
    #[must_use]
    pub fn mean_luma(&self) -> f64 {
        if self.pixels().is_empty() {
            return 0.0;
        }
        let total: u64 = self.pixels().iter().map(|p| u64::from(p.luma())).sum();
        total as f64 / self.pixels().len() as f64
    }
}
