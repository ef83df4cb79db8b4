//! Marmot - a retained-mode widget tree engine for real-time 2D
//! applications.
//!
//! Marmot keeps a rooted hierarchy of widgets alive between frames and
//! runs four engines over it: inherited-property resolution, cascading
//! named styles, data binding against application model objects, and a
//! per-frame animation scheduler. Rendering and windowing stay outside:
//! the tree computes what to draw and where, and hands that to a
//! [`Renderer`](marmot_render::Renderer) implementation.
//!
//! # Example
//!
//! ```
//! use marmot::prelude::*;
//!
//! let mut tree = WidgetTree::new();
//! let root = tree.create_panel();
//! let title = tree.create_label("Marmot");
//! tree.add_child(root, title).unwrap();
//! tree.set_size(root, Size::new(1000.0, 1600.0)).unwrap();
//!
//! // Drive a frame.
//! tree.update(root);
//! tree.tick(1.0 / 60.0);
//! let mut renderer = RecordingRenderer::new();
//! tree.render(root, &mut renderer);
//! ```

pub mod content;
pub mod error;
pub mod prelude;
pub mod screen;
pub mod stage;
pub mod widget;

pub use marmot_core::{ConnectionId, NameGenerator, Signal, logging};

/// Geometry, color, and the renderer capability.
pub mod render {
    pub use marmot_render::*;
}

/// Styles and the widget property vocabulary.
pub mod style {
    pub use marmot_style::*;
}
