//! Panel: a background box hosting children.

use marmot_render::Renderer;

use crate::widget::node::WidgetId;
use crate::widget::tree::WidgetTree;

pub(crate) fn render(tree: &WidgetTree, id: WidgetId, renderer: &mut dyn Renderer) {
    let Some(node) = tree.get(id) else {
        return;
    };
    renderer.draw_box(
        tree.absolute_offset(id),
        node.size(),
        tree.render_background_color(id),
    );
}
