//! The read-only render traversal.
//!
//! Rendering walks the tree after all mutation for the frame is done,
//! computing what and where but never drawing directly: every draw goes
//! through the [`Renderer`] capability. A widget draws itself first (its
//! kind's default rendering, or its custom render handlers), then its
//! content widget and children on top, clipped to its bounds if requested.

use marmot_render::{Rect, Renderer};

use super::node::{WidgetId, WidgetKind};
use super::tree::WidgetTree;
use super::widgets;

/// A handle for a registered custom render handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandlerId(u64);

/// A custom render callback for one widget.
///
/// Receives the tree read-only; all widget mutation for the frame has
/// already happened by the time rendering runs.
pub type RenderFn = Box<dyn Fn(&WidgetTree, WidgetId, &mut dyn Renderer)>;

/// An ordered collection of custom render handlers.
///
/// When any handler is registered, the handlers replace the widget's
/// default kind rendering entirely and run in registration order.
#[derive(Default)]
pub struct RenderHandlers {
    next_id: u64,
    handlers: Vec<(RenderHandlerId, RenderFn)>,
}

impl RenderHandlers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a handler at the end of the list.
    pub fn add(&mut self, handler: RenderFn) -> RenderHandlerId {
        self.next_id += 1;
        let id = RenderHandlerId(self.next_id);
        self.handlers.push((id, handler));
        id
    }

    /// Remove a specific handler. Returns `true` if it was registered.
    pub fn remove(&mut self, id: RenderHandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    /// Remove every handler, restoring the default kind rendering.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Whether any handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    fn iter(&self) -> impl Iterator<Item = &RenderFn> {
        self.handlers.iter().map(|(_, f)| f)
    }
}

impl std::fmt::Debug for RenderHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderHandlers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl WidgetTree {
    /// Install a custom render callback on a widget.
    ///
    /// With `replace_existing` set (the usual case), previously registered
    /// handlers are cleared first, so the callback fully takes over the
    /// widget's appearance. Children still render on top as normal.
    pub fn set_custom_render(
        &mut self,
        id: WidgetId,
        handler: impl Fn(&WidgetTree, WidgetId, &mut dyn Renderer) + 'static,
        replace_existing: bool,
    ) -> Option<RenderHandlerId> {
        let node = self.nodes.get_mut(id)?;
        if replace_existing {
            node.render_handlers.clear();
        }
        Some(node.render_handlers.add(Box::new(handler)))
    }

    /// Remove a previously installed custom render callback.
    pub fn remove_custom_render(&mut self, id: WidgetId, handler: RenderHandlerId) -> bool {
        self.nodes
            .get_mut(id)
            .is_some_and(|node| node.render_handlers.remove(handler))
    }

    /// Render the subtree rooted at `root`.
    pub fn render(&self, root: WidgetId, renderer: &mut dyn Renderer) {
        let Some(node) = self.nodes.get(root) else {
            return;
        };
        if !node.visible {
            return;
        }

        if node.render_handlers.is_empty() {
            match node.kind {
                WidgetKind::Panel => widgets::panel::render(self, root, renderer),
                WidgetKind::Label => widgets::label::render(self, root, renderer),
                WidgetKind::Glyph => widgets::glyph::render(self, root, renderer),
            }
        } else {
            for handler in node.render_handlers.iter() {
                handler(self, root, renderer);
            }
        }

        let clip = node.clip_to_bounds;
        if clip {
            renderer.push_clip(Rect::from_origin_size(
                self.absolute_offset(root),
                node.size(),
            ));
        }
        for child in self.child_widgets(root) {
            self.render(child, renderer);
        }
        if clip {
            renderer.pop_clip();
        }
    }
}

#[cfg(test)]
mod tests {
    use marmot_render::{Color, DrawCommand, Point, RecordingRenderer, Size};

    use super::*;
    use crate::widget::WidgetKind;

    #[test]
    fn invisible_subtrees_are_skipped() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        let child = tree.create(WidgetKind::Panel);
        tree.add_child(root, child).unwrap();
        tree.set_size(root, Size::new(10.0, 10.0)).unwrap();
        tree.get_mut(root).unwrap().set_visible(false);

        let mut renderer = RecordingRenderer::new();
        tree.render(root, &mut renderer);
        assert!(renderer.commands.is_empty());
    }

    #[test]
    fn children_draw_after_their_parent() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        let child = tree.create(WidgetKind::Panel);
        tree.add_child(root, child).unwrap();
        tree.get_mut(root)
            .unwrap()
            .set_background_color(Color::RED);
        tree.get_mut(child)
            .unwrap()
            .set_background_color(Color::BLUE);
        tree.set_size(root, Size::new(10.0, 10.0)).unwrap();
        tree.set_size(child, Size::new(5.0, 5.0)).unwrap();

        let mut renderer = RecordingRenderer::new();
        tree.render(root, &mut renderer);
        let colors: Vec<Color> = renderer
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Box { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color::RED, Color::BLUE]);
    }

    #[test]
    fn clip_to_bounds_brackets_the_children() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        let child = tree.create(WidgetKind::Panel);
        tree.add_child(root, child).unwrap();
        tree.set_size(root, Size::new(10.0, 10.0)).unwrap();
        tree.get_mut(root).unwrap().set_offset(Point::new(2.0, 3.0));
        tree.get_mut(root).unwrap().set_clip_to_bounds(true);

        let mut renderer = RecordingRenderer::new();
        tree.render(root, &mut renderer);

        match &renderer.commands[1] {
            DrawCommand::PushClip { rect } => {
                assert_eq!(rect.origin, Point::new(2.0, 3.0));
                assert_eq!(rect.size, Size::new(10.0, 10.0));
            }
            other => panic!("expected a clip push, got {other:?}"),
        }
        assert!(matches!(renderer.commands.last(), Some(DrawCommand::PopClip)));
    }

    #[test]
    fn custom_render_replaces_the_default() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        tree.set_size(root, Size::new(10.0, 10.0)).unwrap();
        tree.get_mut(root)
            .unwrap()
            .set_background_color(Color::RED);

        tree.set_custom_render(
            root,
            |tree, id, renderer| {
                renderer.draw_text(
                    "custom",
                    None,
                    tree.font_size(id),
                    tree.absolute_offset(id),
                    Color::WHITE,
                    0.0,
                );
            },
            true,
        )
        .unwrap();

        let mut renderer = RecordingRenderer::new();
        tree.render(root, &mut renderer);
        assert_eq!(renderer.commands.len(), 1);
        assert!(matches!(renderer.commands[0], DrawCommand::Text { .. }));
    }

    #[test]
    fn custom_render_handlers_run_in_order_and_are_removable() {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Panel);
        tree.set_size(root, Size::new(4.0, 4.0)).unwrap();

        let first = tree
            .set_custom_render(
                root,
                |_, _, r| r.draw_box(Point::ZERO, Size::ZERO, Color::RED),
                true,
            )
            .unwrap();
        // Keep the first handler, append a second.
        tree.set_custom_render(
            root,
            |_, _, r| r.draw_box(Point::ZERO, Size::ZERO, Color::BLUE),
            false,
        )
        .unwrap();

        let mut renderer = RecordingRenderer::new();
        tree.render(root, &mut renderer);
        assert_eq!(renderer.commands.len(), 2);

        assert!(tree.remove_custom_render(root, first));
        renderer.clear();
        tree.render(root, &mut renderer);
        assert_eq!(renderer.commands.len(), 1);
        match &renderer.commands[0] {
            DrawCommand::Box { color, .. } => assert_eq!(*color, Color::BLUE),
            other => panic!("expected the second handler's box, got {other:?}"),
        }
    }
}
