#![forbid(unsafe_code)]

//! Core: viewport state, device classification, events, and coalescing.
//!
//! # Role in Starlit
//! `starlit-core` is the input layer. It owns the viewport snapshot
//! (including the frozen-height policy), the device-class breakpoint, and
//! normalized event types that the runtime consumes.
//!
//! # Primary responsibilities
//! - **ViewportSnapshot**: last applied width plus a height frozen at first
//!   measurement.
//! - **DeviceClass**: the 768px breakpoint and the per-class tuning knobs
//!   (star density, size span, debounce window).
//! - **Event**: canonical input events (resize, scroll, unmount).
//! - **ScrollCoalescer**: drop-latest coalescing of scroll bursts to at most
//!   one recomputation per frame.
//!
//! # How it fits in the system
//! The runtime (`starlit-runtime`) consumes `starlit_core::Event` values and
//! drives the backdrop effect. The render kernel (`starlit-render`) is
//! independent of input, so `starlit-core` is the clean bridge between host
//! events and the deterministic render pipeline.

pub mod coalescer;
pub mod event;
pub mod viewport;
