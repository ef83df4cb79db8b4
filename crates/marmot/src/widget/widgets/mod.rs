//! The thin built-in widgets.
//!
//! Each kind contributes a default render function and a convenience
//! constructor on [`WidgetTree`]. The heavy lifting (inheritance, layout,
//! binding, animation) lives in the tree engine; these modules only decide
//! what to draw for a node of their kind.

pub(crate) mod glyph;
pub(crate) mod label;
pub(crate) mod panel;

use super::node::{WidgetId, WidgetKind};
use super::tree::WidgetTree;

impl WidgetTree {
    /// Create a detached panel: a background box that hosts children.
    pub fn create_panel(&mut self) -> WidgetId {
        self.create(WidgetKind::Panel)
    }

    /// Create a detached label with the given text content.
    pub fn create_label(&mut self, text: impl Into<String>) -> WidgetId {
        let id = self.create(WidgetKind::Label);
        let _ = self.set_content_text(id, text);
        id
    }

    /// Create a detached glyph widget drawing the named texture.
    pub fn create_glyph(&mut self, glyph_name: impl Into<String>) -> WidgetId {
        let id = self.create(WidgetKind::Glyph);
        let _ = self.set_content_text(id, glyph_name);
        id
    }
}
