//! Geometry, color, and the renderer capability for Marmot.
//!
//! The widget tree never draws directly. It computes *what* to draw and
//! *where*, and hands those decisions to an implementation of the
//! [`Renderer`] trait supplied by the embedding application (a sprite
//! batcher, a GPU canvas, a test recorder).
//!
//! This crate holds the small vocabulary shared across that seam:
//! [`Point`], [`Size`], [`Rect`], and [`Color`], plus the [`Renderer`]
//! trait itself and a [`RecordingRenderer`] used by tests.

mod renderer;
mod types;

pub use renderer::{DrawCommand, RecordingRenderer, Renderer};
pub use types::{Color, Point, Rect, Size};
