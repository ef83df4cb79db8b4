//! Core systems for Marmot.
//!
//! This crate provides the foundation the widget tree engine builds on:
//!
//! - [`Signal`] - ordered multicast callback lists with removable connections
//! - [`NameGenerator`] - monotonic auto-naming for widgets
//! - [`logging`] - `tracing` target constants for log filtering
//!
//! Everything here is deliberately independent of widgets, rendering, and
//! styling; those live in the `marmot`, `marmot-render`, and `marmot-style`
//! crates.

pub mod logging;
mod naming;
mod signal;

pub use naming::NameGenerator;
pub use signal::{ConnectionId, Signal};
