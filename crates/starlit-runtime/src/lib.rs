#![forbid(unsafe_code)]

//! Event runtime for the Starlit backdrop.
//!
//! # Role in Starlit
//! `starlit-runtime` owns everything timed: the resize debouncer with its
//! width-delta gate, the mounted starfield lifecycle, one-shot reveal
//! observers, and a small Elm-style program loop that drives a model from
//! an event source.
//!
//! # Primary responsibilities
//! - **ResizeDebouncer**: per-device-class settling window plus the 50px
//!   regeneration gate.
//! - **StarfieldMount**: the mounted effect (canvas, population, warp,
//!   coalesced scroll) with idempotent teardown.
//! - **RevealObserver**: one-shot visibility triggers at a threshold.
//! - **Program**: update/view loop with injectable time for tests.
//!
//! All timing goes through `*_at(now)` variants so tests drive a fake
//! clock instead of sleeping.

pub mod mount;
pub mod program;
pub mod resize;
pub mod reveal;

pub use mount::StarfieldMount;
pub use program::{Cmd, EventScript, EventSource, Model, Program, ProgramConfig};
pub use resize::{ResizeAction, ResizeDebouncer};
pub use reveal::{ObservationState, RevealObserver};
