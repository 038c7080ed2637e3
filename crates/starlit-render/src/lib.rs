#![forbid(unsafe_code)]

//! Render kernel: surfaces, colors, and presentation.
//!
//! # Role in Starlit
//! `starlit-render` owns the pixel pipeline: a packed-RGBA surface the
//! backdrop effect draws into, the warp (blur + scale) presentation
//! transform, and an ANSI half-block presenter for terminal output.
//!
//! # Primary responsibilities
//! - **PackedRgba**: 32-bit color with fixed-point alpha blending.
//! - **Surface**: owned pixel grid with circle rasterization and the
//!   width-only resize contract (height stays frozen).
//! - **warp_into**: separable box blur + center-anchored scale.
//! - **AnsiPresenter**: half-block truecolor output for demos.
//! - **Headless probes**: pixel counting and hashing for CI assertions.
//!
//! The kernel is deterministic: identical draw sequences produce identical
//! pixel buffers, which tests hash and compare.

pub mod color;
pub mod headless;
pub mod present;
pub mod surface;

pub use color::PackedRgba;
pub use surface::Surface;
