#![forbid(unsafe_code)]

//! Presentation transforms: warp (blur + scale) and ANSI output.
//!
//! The warp transform is how scroll depth reads on screen: a box blur whose
//! radius tracks scroll progress, plus a slight center-anchored zoom that
//! hides the blur's soft edges. Both run on the CPU over packed-RGBA
//! surfaces, so the output is bit-identical across hosts.

use std::io::{self, Write};

use web_time::{Duration, Instant};

use crate::color::PackedRgba;
use crate::surface::Surface;

/// Apply the warp transform: box-blur `src` by `blur` pixels, then scale
/// about the surface center by `scale`, writing into `dst`.
///
/// `dst` is resized to match `src`. A blur under half a pixel and a scale
/// of 1.0 degrade to a plain copy. Scaling samples nearest-neighbor from
/// the blurred image; with `scale >= 1` every destination pixel maps inside
/// the source, so no edge padding is needed.
pub fn warp_into(src: &Surface, dst: &mut Surface, blur: f64, scale: f64) {
    if src.is_empty() {
        *dst = src.clone();
        return;
    }
    let radius = blur.max(0.0).round() as u32;
    let scale = if scale.is_finite() && scale >= 1.0 {
        scale
    } else {
        1.0
    };

    #[cfg(feature = "tracing")]
    tracing::trace!(radius, scale, "warp pass");

    let blurred = if radius == 0 {
        src.clone()
    } else {
        box_blur(src, radius)
    };

    if (scale - 1.0).abs() < f64::EPSILON {
        *dst = blurred;
        return;
    }

    let w = src.width();
    let h = src.height();
    let cx = f64::from(w) / 2.0;
    let cy = f64::from(h) / 2.0;
    let mut out = vec![PackedRgba::TRANSPARENT; (w as usize) * (h as usize)];
    for y in 0..h {
        let sy = cy + (f64::from(y) + 0.5 - cy) / scale;
        let sy = (sy as u32).min(h - 1);
        for x in 0..w {
            let sx = cx + (f64::from(x) + 0.5 - cx) / scale;
            let sx = (sx as u32).min(w - 1);
            if let Some(p) = blurred.pixel(sx, sy) {
                out[(y as usize) * (w as usize) + (x as usize)] = p;
            }
        }
    }
    *dst = Surface::from_raw(w, h, out);
}

/// Separable box blur with a running-sum window per channel.
fn box_blur(src: &Surface, radius: u32) -> Surface {
    let w = src.width() as usize;
    let h = src.height() as usize;
    let r = radius as usize;

    // Horizontal pass.
    let mut mid = vec![PackedRgba::TRANSPARENT; w * h];
    for y in 0..h {
        blur_line(
            |i| src.pixels()[y * w + i],
            |i, p| mid[y * w + i] = p,
            w,
            r,
        );
    }
    // Vertical pass.
    let mut out = vec![PackedRgba::TRANSPARENT; w * h];
    for x in 0..w {
        blur_line(|i| mid[i * w + x], |i, p| out[i * w + x] = p, h, r);
    }
    Surface::from_raw(src.width(), src.height(), out)
}

/// Blur one line of `len` pixels with window `2r + 1`, clamping the window
/// at the ends. Running sums keep this O(len) regardless of radius.
fn blur_line(
    get: impl Fn(usize) -> PackedRgba,
    mut set: impl FnMut(usize, PackedRgba),
    len: usize,
    r: usize,
) {
    if len == 0 {
        return;
    }
    let mut sum = [0u32; 4];
    let mut count = 0u32;
    let add = |sum: &mut [u32; 4], count: &mut u32, p: PackedRgba| {
        sum[0] += u32::from(p.r());
        sum[1] += u32::from(p.g());
        sum[2] += u32::from(p.b());
        sum[3] += u32::from(p.a());
        *count += 1;
    };
    let sub = |sum: &mut [u32; 4], count: &mut u32, p: PackedRgba| {
        sum[0] -= u32::from(p.r());
        sum[1] -= u32::from(p.g());
        sum[2] -= u32::from(p.b());
        sum[3] -= u32::from(p.a());
        *count -= 1;
    };

    // Prime the window for index 0.
    for i in 0..=r.min(len - 1) {
        add(&mut sum, &mut count, get(i));
    }
    for i in 0..len {
        set(
            i,
            PackedRgba::rgba(
                (sum[0] / count) as u8,
                (sum[1] / count) as u8,
                (sum[2] / count) as u8,
                (sum[3] / count) as u8,
            ),
        );
        // Slide: bring in i + r + 1, drop i - r.
        let incoming = i + r + 1;
        if incoming < len {
            add(&mut sum, &mut count, get(incoming));
        }
        if i >= r {
            sub(&mut sum, &mut count, get(i - r));
        }
    }
}

/// Writes a surface to a terminal using `▀` half-blocks, two pixel rows per
/// text row, with 24-bit color escapes. Tracks how long the last present
/// took so demos can log frame pacing.
#[derive(Debug, Default)]
pub struct AnsiPresenter {
    last_present: Option<Duration>,
}

impl AnsiPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration of the most recent [`present`](Self::present) call.
    #[must_use]
    pub fn last_present(&self) -> Option<Duration> {
        self.last_present
    }

    /// Write the surface to `out`, homing the cursor first so repeated
    /// presents repaint in place.
    pub fn present(&mut self, surface: &Surface, out: &mut impl Write) -> io::Result<()> {
        let started = Instant::now();
        write!(out, "\x1b[H")?;
        let w = surface.width();
        let h = surface.height();
        let mut y = 0;
        while y < h {
            for x in 0..w {
                let top = surface.pixel(x, y).unwrap_or(PackedRgba::TRANSPARENT);
                let bot = surface
                    .pixel(x, y + 1)
                    .unwrap_or(PackedRgba::TRANSPARENT);
                write!(
                    out,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                    top.r(),
                    top.g(),
                    top.b(),
                    bot.r(),
                    bot.g(),
                    bot.b(),
                )?;
            }
            writeln!(out, "\x1b[0m")?;
            y += 2;
        }
        out.flush()?;
        self.last_present = Some(started.elapsed());
        Ok(())
    }
}
