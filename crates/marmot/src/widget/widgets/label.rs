//! Label: a text leaf.
//!
//! Draws its background box, then its content text aligned within the
//! widget's bounds using the resolved content alignments. With
//! wrap-content set, text wraps at the widget's width and the measured
//! (wrapped) extent is what gets aligned.

use marmot_render::Renderer;
use marmot_style::{HorizontalAlign, VerticalAlign};

use crate::widget::node::WidgetId;
use crate::widget::tree::WidgetTree;

pub(crate) fn render(tree: &WidgetTree, id: WidgetId, renderer: &mut dyn Renderer) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let text = node.content_text().unwrap_or("");
    let size = node.size();

    renderer.draw_box(
        tree.absolute_offset(id),
        size,
        tree.render_background_color(id),
    );

    let font_name = tree.font_name(id);
    let font_size = tree.font_size(id);
    let wrap_width = if node.wrap_content() { size.width } else { 0.0 };
    let text_size = renderer.measure_text(text, font_name.as_deref(), font_size, wrap_width);

    let mut aligned = tree.absolute_offset(id);
    match tree.horizontal_alignment(id) {
        HorizontalAlign::Left => {}
        HorizontalAlign::Center => aligned.x += (size.width - text_size.width) / 2.0,
        HorizontalAlign::Right => aligned.x += size.width - text_size.width,
    }
    match tree.vertical_alignment(id) {
        VerticalAlign::Top => {}
        VerticalAlign::Center => aligned.y += (size.height - text_size.height) / 2.0,
        VerticalAlign::Bottom => aligned.y += size.height - text_size.height,
    }

    renderer.draw_text(
        text,
        font_name.as_deref(),
        font_size,
        aligned,
        tree.render_foreground_color(id),
        wrap_width,
    );
}

#[cfg(test)]
mod tests {
    use marmot_render::{Color, DrawCommand, Point, RecordingRenderer, Size};

    use crate::widget::WidgetTree;

    #[test]
    fn centered_text_is_offset_by_half_the_slack() {
        let mut tree = WidgetTree::new();
        let label = tree.create_label("hi");
        tree.set_size(label, Size::new(10.0, 4.0)).unwrap();
        {
            let node = tree.get_mut(label).unwrap();
            node.set_font_size(Some(2.0));
            node.set_horizontal_alignment(Some(marmot_style::HorizontalAlign::Center));
            node.set_vertical_alignment(Some(marmot_style::VerticalAlign::Center));
        }

        let mut renderer = RecordingRenderer::new();
        tree.render(label, &mut renderer);

        // Measured: 2 chars * 1.0 advance = 2x2; slack (8, 2) halves to (4, 1).
        match &renderer.commands[1] {
            DrawCommand::Text { position, .. } => {
                assert_eq!(*position, Point::new(4.0, 1.0));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn label_text_fades_with_ancestor_opacity() {
        let mut tree = WidgetTree::new();
        let root = tree.create_panel();
        let label = tree.create_label("x");
        tree.add_child(root, label).unwrap();
        tree.set_size(root, Size::new(10.0, 10.0)).unwrap();
        tree.get_mut(root).unwrap().set_opacity(0.5);

        let mut renderer = RecordingRenderer::new();
        tree.render(root, &mut renderer);

        let text_color = renderer
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { color, .. } => Some(*color),
                _ => None,
            })
            .unwrap();
        assert_eq!(text_color, Color::BLACK * 0.5);
    }
}
