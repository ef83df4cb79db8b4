//! The widget tree engine.
//!
//! This module provides the retained widget hierarchy and the passes that
//! run over it:
//!
//! - [`WidgetTree`]: the arena owning every [`WidgetNode`], with structure
//!   operations, inherited-property resolution, and on-demand absolute
//!   attributes
//! - layout propagation (`set_size` and the margin/stretch/alignment
//!   rules)
//! - style application against a `StyleLibrary`
//! - data binding against [`BindingSource`] contexts
//! - the [`animation`] scheduler
//! - the read-only render traversal with custom render handlers
//!
//! # Overview
//!
//! Widgets are plain data nodes addressed by [`WidgetId`]; there is no
//! widget trait hierarchy. A node's kind ([`WidgetKind`]) selects its
//! default rendering, and everything else - inheritance, styles, bindings,
//! layout, animation - is uniform across kinds.
//!
//! ```
//! use marmot::widget::WidgetTree;
//! use marmot_render::Size;
//! use marmot_style::{EdgeInsets, Stretch};
//!
//! let mut tree = WidgetTree::new();
//! let root = tree.create_panel();
//! let label = tree.create_label("hello");
//! tree.add_child(root, label).unwrap();
//!
//! let node = tree.get_mut(label).unwrap();
//! node.set_margin(EdgeInsets::uniform(10.0));
//! node.set_stretch(Stretch::FILL);
//!
//! tree.set_size(root, Size::new(100.0, 100.0)).unwrap();
//! assert_eq!(tree.get(label).unwrap().size(), Size::new(80.0, 80.0));
//! ```

pub mod animation;
mod binding;
mod layout;
mod node;
mod painting;
mod styling;
mod tree;
mod widgets;

#[cfg(test)]
mod tests;

pub use animation::Animation;
pub use binding::{Binding, BindingExpr, BindingSource, TemplateSegment};
pub use node::{InitHandler, SizeChanged, WidgetContent, WidgetId, WidgetKind, WidgetNode};
pub use painting::{RenderFn, RenderHandlerId, RenderHandlers};
pub use tree::WidgetTree;
