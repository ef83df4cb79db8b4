//! The stage: the per-frame driver owning the whole screen set.
//!
//! A [`Stage`] aggregates the widget arena, the style library, the screen
//! table, and the content catalog, and exposes the frame entry points the
//! embedding loop calls in order each tick:
//!
//! 1. input/event dispatch (outside this crate),
//! 2. [`update`](Stage::update) - binding refresh,
//! 3. [`tick`](Stage::tick) - animation advance, with layout settling
//!    synchronously behind any size writes,
//! 4. [`render`](Stage::render) - the read-only draw traversal.
//!
//! Everything is single-threaded and cooperative: no entry point suspends,
//! and all mutation of a frame has finished before `render` reads. Screen
//! swaps happen between frames; a swap replaces one named entry and merges
//! the incoming styles into the shared library.

use std::rc::Rc;

use marmot_style::{Style, StyleLibrary};

use crate::content::ContentCatalog;
use crate::error::StageError;
use crate::screen::{LayoutLoader, ScreenTable};
use crate::widget::{BindingSource, WidgetId, WidgetTree};

/// The aggregate driver for a loaded screen set.
#[derive(Default)]
pub struct Stage {
    tree: WidgetTree,
    styles: StyleLibrary,
    screens: ScreenTable,
    content: ContentCatalog,
}

impl Stage {
    /// Create an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Component access
    // =========================================================================

    /// The widget arena.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget arena, mutably.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The style library.
    pub fn styles(&self) -> &StyleLibrary {
        &self.styles
    }

    /// The style library, mutably.
    pub fn styles_mut(&mut self) -> &mut StyleLibrary {
        &mut self.styles
    }

    /// The screen table.
    pub fn screens(&self) -> &ScreenTable {
        &self.screens
    }

    /// The content catalog.
    pub fn content(&self) -> &ContentCatalog {
        &self.content
    }

    /// The content catalog, mutably.
    pub fn content_mut(&mut self) -> &mut ContentCatalog {
        &mut self.content
    }

    /// The current screen's root widget.
    pub fn current_root(&self) -> Option<WidgetId> {
        self.screens.current().map(|(_, root)| root)
    }

    // =========================================================================
    // Screen management
    // =========================================================================

    /// Load a layout source through the external parser.
    ///
    /// The loader builds widgets straight into the tree; the screens it
    /// reports are registered strictly (a name collision is an authoring
    /// error on initial load) and the styles it found are registered into
    /// the shared library the same way. Returns the loaded screen names.
    pub fn load_layout(
        &mut self,
        loader: &mut dyn LayoutLoader,
        source: &str,
    ) -> Result<Vec<String>, StageError> {
        let layout = loader.load_layout(&mut self.tree, source);
        let mut names = Vec::with_capacity(layout.screens.len());
        for style in layout.styles {
            self.styles.register(style, false)?;
        }
        for (name, root) in layout.screens {
            self.screens.register(&name, root, false)?;
            names.push(name);
        }
        tracing::debug!(target: "marmot::stage", screens = names.len(), "layout loaded");
        Ok(names)
    }

    /// Select the current screen and bind its context.
    ///
    /// The optional context lands on the screen's root, so the whole
    /// screen inherits it unless a descendant overrides.
    pub fn set_screen(
        &mut self,
        name: &str,
        binding_context: Option<Rc<dyn BindingSource>>,
    ) -> Result<(), StageError> {
        let root = self.screens.set_current(name)?;
        if binding_context.is_some() {
            self.tree.set_binding_context(root, binding_context)?;
        }
        tracing::debug!(target: "marmot::stage", screen = %name, "screen selected");
        Ok(())
    }

    /// Hot-swap one screen: replace (or insert) the named entry and merge
    /// the styles that came with the new tree.
    ///
    /// The replaced root's subtree is destroyed, which also cancels every
    /// animation attached beneath it. Call between frames; the swapped
    /// tree is prepared on the next [`prepare`](Self::prepare).
    pub fn swap_screen(
        &mut self,
        name: &str,
        root: WidgetId,
        styles: Vec<Style>,
        binding_context: Option<Rc<dyn BindingSource>>,
    ) -> Result<(), StageError> {
        self.styles.merge(styles);
        let replaced = self.screens.register(name, root, true)?;
        if let Some(old_root) = replaced {
            if old_root != root {
                let _ = self.tree.remove(old_root);
            }
        }
        if binding_context.is_some() {
            self.tree.set_binding_context(root, binding_context)?;
        }
        tracing::debug!(target: "marmot::stage", screen = %name, "screen swapped");
        Ok(())
    }

    // =========================================================================
    // Frame entry points
    // =========================================================================

    /// Prepare the current screen: styles, bindings, init, initial layout.
    ///
    /// Idempotent until widgets are invalidated (a context reassignment, a
    /// screen swap).
    pub fn prepare(&mut self) {
        if let Some(root) = self.current_root() {
            self.tree.prepare(root, &self.styles);
        }
    }

    /// Refresh live bindings across the current screen.
    pub fn update(&mut self) {
        if let Some(root) = self.current_root() {
            self.tree.update(root);
        }
    }

    /// Advance animations on the current screen by `elapsed_seconds`.
    ///
    /// Layout triggered by animated size changes settles synchronously
    /// before this returns.
    pub fn tick(&mut self, elapsed_seconds: f32) {
        if let Some(root) = self.current_root() {
            self.tree.tick_subtree(root, elapsed_seconds);
        }
    }

    /// Render the current screen.
    pub fn render(&self, renderer: &mut dyn marmot_render::Renderer) {
        if let Some(root) = self.current_root() {
            self.tree.render(root, renderer);
        }
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("widgets", &self.tree.len())
            .field("styles", &self.styles.len())
            .field("screens", &self.screens.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use marmot_render::Size;
    use marmot_style::{PropertyValue, WidgetProperty};

    use super::*;
    use crate::screen::LoadedLayout;

    /// A stand-in for the markup parser: one panel screen per source line.
    struct LineLoader;

    impl LayoutLoader for LineLoader {
        fn load_layout(&mut self, tree: &mut WidgetTree, source: &str) -> LoadedLayout {
            let mut layout = LoadedLayout::default();
            for name in source.lines().filter(|l| !l.is_empty()) {
                let root = tree.create_panel();
                layout.screens.push((name.to_string(), root));
            }
            layout.styles.push(Style::new(
                "default",
                [(WidgetProperty::FontSize, PropertyValue::Number(0.12))],
            ));
            layout
        }
    }

    #[test]
    fn load_layout_registers_screens_and_styles() {
        let mut stage = Stage::new();
        let names = stage.load_layout(&mut LineLoader, "main\npause").unwrap();
        assert_eq!(names, vec!["main", "pause"]);
        assert!(stage.styles().contains("default"));
        assert_eq!(stage.screens().len(), 2);
    }

    #[test]
    fn reloading_the_same_source_collides() {
        let mut stage = Stage::new();
        stage.load_layout(&mut LineLoader, "main").unwrap();
        let err = stage.load_layout(&mut LineLoader, "main").unwrap_err();
        assert!(matches!(err, StageError::Style(_)));
    }

    #[test]
    fn swap_screen_destroys_the_old_tree_and_merges_styles() {
        let mut stage = Stage::new();
        stage.load_layout(&mut LineLoader, "main").unwrap();
        stage.set_screen("main", None).unwrap();
        let old_root = stage.current_root().unwrap();

        let new_root = stage.tree_mut().create_panel();
        let restyled = Style::new(
            "default",
            [(WidgetProperty::FontSize, PropertyValue::Number(0.5))],
        );
        stage
            .swap_screen("main", new_root, vec![restyled], None)
            .unwrap();

        assert!(!stage.tree().contains(old_root));
        assert_eq!(stage.current_root(), Some(new_root));
        assert_eq!(
            stage.styles().get("default").unwrap().get(WidgetProperty::FontSize),
            Some(&PropertyValue::Number(0.5))
        );
    }

    #[test]
    fn frame_entry_points_are_safe_without_a_screen() {
        let mut stage = Stage::new();
        stage.prepare();
        stage.update();
        stage.tick(0.016);
        let mut renderer = marmot_render::RecordingRenderer::new();
        stage.render(&mut renderer);
        assert!(renderer.commands.is_empty());
    }

    #[test]
    fn prepare_settles_initial_layout() {
        let mut stage = Stage::new();
        stage.load_layout(&mut LineLoader, "main").unwrap();
        stage.set_screen("main", None).unwrap();
        let root = stage.current_root().unwrap();

        let child = stage.tree_mut().create_panel();
        stage.tree_mut().add_child(root, child).unwrap();
        stage
            .tree_mut()
            .get_mut(child)
            .unwrap()
            .set_stretch(marmot_style::Stretch::FILL);
        stage.tree_mut().set_size(root, Size::new(20.0, 20.0)).unwrap();

        stage.prepare();
        assert_eq!(stage.tree().get(child).unwrap().size(), Size::new(20.0, 20.0));
    }
}
