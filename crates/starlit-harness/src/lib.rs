#![forbid(unsafe_code)]

//! Test harness for Starlit.
//!
//! # Role in Starlit
//! `starlit-harness` centralizes what every end-to-end test needs: seed
//! selection with environment overrides, a fake frame clock so debounce
//! windows elapse without sleeping, and nothing else. The scripted
//! scenarios themselves live in this crate's `tests/` directory.

pub mod determinism;
pub mod frame_driver;

pub use determinism::DeterminismFixture;
pub use frame_driver::FrameDriver;
