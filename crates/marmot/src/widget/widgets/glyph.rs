//! Glyph: a single-image texture leaf.
//!
//! The glyph name is the widget's content payload; the renderer resolves
//! it to a texture. The image is tinted white scaled by absolute opacity
//! and honors the flip flags and rotation.

use marmot_render::Renderer;

use crate::widget::node::WidgetId;
use crate::widget::tree::WidgetTree;

pub(crate) fn render(tree: &WidgetTree, id: WidgetId, renderer: &mut dyn Renderer) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let position = tree.absolute_offset(id);
    let size = node.size();

    renderer.draw_box(position, size, tree.render_background_color(id));

    let Some(name) = node.content_text() else {
        return;
    };
    renderer.draw_glyph(
        name,
        position,
        size,
        tree.render_graphic_color(id),
        node.flip_horizontal(),
        node.flip_vertical(),
        node.rotate(),
    );
}
