//! The widget tree arena.
//!
//! All widgets of a screen set live in one [`WidgetTree`]: a slotmap arena
//! keyed by [`WidgetId`]. The arena owns every node; parent links are plain
//! IDs (non-owning back-references), so the ownership graph can never form
//! a reference cycle. Destroying a widget cascades through its content and
//! children, Qt-style.
//!
//! The tree also hosts every cross-node computation: inherited-property
//! resolution, on-demand absolute offset/opacity/center, the prepare pass,
//! and the per-frame binding refresh. Layout, styling, binding, animation,
//! and painting each extend `WidgetTree` from their own module.

use marmot_core::NameGenerator;
use marmot_render::{Color, Point, Size};
use marmot_style::{HorizontalAlign, VerticalAlign};
use slotmap::SlotMap;

use crate::error::TreeError;

use super::node::{WidgetContent, WidgetId, WidgetKind, WidgetNode};

/// The rooted widget hierarchy and its arena.
#[derive(Debug)]
pub struct WidgetTree {
    pub(crate) nodes: SlotMap<WidgetId, WidgetNode>,
    names: NameGenerator,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    /// Create an empty tree with a fresh name generator.
    pub fn new() -> Self {
        Self::with_names(NameGenerator::new())
    }

    /// Create an empty tree with an injected name generator.
    pub fn with_names(names: NameGenerator) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            names,
        }
    }

    // =========================================================================
    // Node access
    // =========================================================================

    /// Get a widget by ID.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    /// Get a widget mutably by ID.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(id)
    }

    /// Whether the widget still exists.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The number of live widgets in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Creation and structure
    // =========================================================================

    /// Create a detached widget of the given kind.
    ///
    /// The widget receives a generated name and is a root until attached
    /// somewhere with [`add_child`](Self::add_child) or
    /// [`set_content_widget`](Self::set_content_widget).
    pub fn create(&mut self, kind: WidgetKind) -> WidgetId {
        let name = self.names.next_name();
        let id = self.nodes.insert(WidgetNode::new(kind, name));
        tracing::trace!(target: "marmot::tree", ?id, name = %self.nodes[id].name, "created widget");
        id
    }

    /// Attach `child` to `parent`'s child collection.
    ///
    /// If `child` is currently attached elsewhere it is detached first (a
    /// widget never has two parents). Fails with
    /// [`TreeError::CircularParentage`] if `child` is `parent` or one of
    /// its ancestors.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Put `child` into `parent`'s content slot.
    ///
    /// A widget already occupying the slot is destroyed: the content slot
    /// owns its widget. The same cycle rules as
    /// [`add_child`](Self::add_child) apply.
    pub fn set_content_widget(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        if let WidgetContent::Widget(old) = self.nodes[parent].content {
            if old != child {
                let _ = self.remove(old);
            }
        }
        self.detach(child);
        self.nodes[parent].content = WidgetContent::Widget(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Set a leaf text payload as `id`'s content.
    ///
    /// A widget occupying the content slot is destroyed.
    pub fn set_content_text(
        &mut self,
        id: WidgetId,
        text: impl Into<String>,
    ) -> Result<(), TreeError> {
        if !self.nodes.contains_key(id) {
            return Err(TreeError::InvalidWidget(id));
        }
        if let WidgetContent::Widget(old) = self.nodes[id].content {
            let _ = self.remove(old);
        }
        let node = &mut self.nodes[id];
        node.content = WidgetContent::Text(text.into());
        node.local_set.insert(marmot_style::WidgetProperty::Content);
        Ok(())
    }

    /// Destroy a widget and its whole subtree.
    ///
    /// The widget is unlinked from its parent and every descendant (content
    /// and children, recursively) is dropped. Attached animations die with
    /// their nodes, so nothing keeps mutating a destroyed widget.
    pub fn remove(&mut self, id: WidgetId) -> Result<(), TreeError> {
        if !self.nodes.contains_key(id) {
            return Err(TreeError::InvalidWidget(id));
        }
        self.detach(id);
        let descendants = self.collect_descendants(id);
        tracing::trace!(
            target: "marmot::tree",
            ?id,
            descendant_count = descendants.len(),
            "destroying widget subtree"
        );
        for d in descendants {
            self.nodes.remove(d);
        }
        self.nodes.remove(id);
        Ok(())
    }

    /// Unlink `id` from its parent, leaving it a live root.
    fn detach(&mut self, id: WidgetId) {
        let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&c| c != id);
            if p.content == WidgetContent::Widget(id) {
                p.content = WidgetContent::None;
            }
        }
        if let Some(n) = self.nodes.get_mut(id) {
            n.parent = None;
        }
    }

    fn check_attachable(&self, parent: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::InvalidWidget(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(TreeError::InvalidWidget(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(TreeError::CircularParentage);
        }
        Ok(())
    }

    /// Whether `maybe_ancestor` appears on `of`'s parent chain.
    pub fn is_ancestor(&self, maybe_ancestor: WidgetId, of: WidgetId) -> bool {
        let mut cur = self.nodes.get(of).and_then(|n| n.parent);
        while let Some(p) = cur {
            if p == maybe_ancestor {
                return true;
            }
            cur = self.nodes.get(p).and_then(|n| n.parent);
        }
        false
    }

    /// The root of the subtree containing `id`.
    pub fn root_of(&self, id: WidgetId) -> Option<WidgetId> {
        let mut cur = self.nodes.get(id).map(|_| id)?;
        while let Some(p) = self.nodes.get(cur).and_then(|n| n.parent) {
            cur = p;
        }
        Some(cur)
    }

    /// The content widget (if any) followed by the child collection.
    ///
    /// This is the traversal order for prepare, layout, and rendering.
    pub fn child_widgets(&self, id: WidgetId) -> Vec<WidgetId> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(node.children.len() + 1);
        if let WidgetContent::Widget(w) = node.content {
            out.push(w);
        }
        out.extend_from_slice(&node.children);
        out
    }

    /// Every widget of the subtree rooted at `id`, depth-first, `id` first.
    pub fn collect_subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        if self.nodes.contains_key(id) {
            out.push(id);
            let mut i = 0;
            while i < out.len() {
                let current = out[i];
                out.extend(self.child_widgets(current));
                i += 1;
            }
        }
        out
    }

    fn collect_descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut all = self.collect_subtree(id);
        if !all.is_empty() {
            all.remove(0);
        }
        all
    }

    // =========================================================================
    // Lookup and traversal
    // =========================================================================

    /// Find a widget by name within the subtree rooted at `root`.
    pub fn find_by_name(&self, root: WidgetId, name: &str) -> Option<WidgetId> {
        self.collect_subtree(root)
            .into_iter()
            .find(|&id| self.nodes[id].name == name)
    }

    /// Find every widget in the subtree satisfying `predicate`.
    ///
    /// This is the traversal used where the original design relied on
    /// runtime type discovery: match on [`WidgetNode::kind`] or any other
    /// node state.
    pub fn find_widgets(
        &self,
        root: WidgetId,
        predicate: impl Fn(&WidgetNode) -> bool,
    ) -> Vec<WidgetId> {
        self.collect_subtree(root)
            .into_iter()
            .filter(|&id| predicate(&self.nodes[id]))
            .collect()
    }

    // =========================================================================
    // Inherited-property resolution
    // =========================================================================

    /// Resolve an inheritable property by walking the parent chain.
    ///
    /// Returns the first value `pick` produces, starting at `id` and
    /// walking rootward; `default` when the whole chain is unset. The walk
    /// is performed on every read so that an ancestor change is always
    /// observed; nothing is cached.
    pub fn resolve_inherited<T>(
        &self,
        id: WidgetId,
        pick: impl Fn(&WidgetNode) -> Option<T>,
        default: T,
    ) -> T {
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(node) = self.nodes.get(c) else {
                break;
            };
            if let Some(v) = pick(node) {
                return v;
            }
            cur = node.parent;
        }
        default
    }

    /// The effective foreground color (default: black).
    pub fn foreground_color(&self, id: WidgetId) -> Color {
        self.resolve_inherited(id, |n| n.foreground_color, Color::BLACK)
    }

    /// The effective font name (default: none, meaning the renderer default).
    pub fn font_name(&self, id: WidgetId) -> Option<String> {
        self.resolve_inherited(id, |n| n.font_name.clone().map(Some), None)
    }

    /// The effective font size (default floor: 0.1).
    pub fn font_size(&self, id: WidgetId) -> f32 {
        self.resolve_inherited(id, |n| n.font_size, 0.1)
    }

    /// The effective horizontal content alignment (default: left).
    pub fn horizontal_alignment(&self, id: WidgetId) -> HorizontalAlign {
        self.resolve_inherited(id, |n| n.horizontal_alignment, HorizontalAlign::Left)
    }

    /// The effective vertical content alignment (default: top).
    pub fn vertical_alignment(&self, id: WidgetId) -> VerticalAlign {
        self.resolve_inherited(id, |n| n.vertical_alignment, VerticalAlign::Top)
    }

    // =========================================================================
    // Absolute (derived) attributes
    // =========================================================================

    /// The widget's offset accumulated through all ancestors.
    ///
    /// Computed on demand; consistent with any ancestor mutation that
    /// happened earlier in the frame.
    pub fn absolute_offset(&self, id: WidgetId) -> Point {
        let Some(node) = self.nodes.get(id) else {
            return Point::ZERO;
        };
        match node.parent {
            None => node.offset,
            Some(p) => self.absolute_offset(p) + node.offset,
        }
    }

    /// The widget's opacity multiplied through all ancestors.
    pub fn absolute_opacity(&self, id: WidgetId) -> f32 {
        let Some(node) = self.nodes.get(id) else {
            return 1.0;
        };
        match node.parent {
            None => node.opacity,
            Some(p) => self.absolute_opacity(p) * node.opacity,
        }
    }

    /// The widget's center in absolute coordinates.
    pub fn absolute_center(&self, id: WidgetId) -> Point {
        let size = self.nodes.get(id).map_or(Size::ZERO, |n| n.size());
        let half = size / 2.0;
        self.absolute_offset(id) + Point::new(half.width, half.height)
    }

    /// The effective foreground color scaled by absolute opacity.
    pub fn render_foreground_color(&self, id: WidgetId) -> Color {
        self.foreground_color(id) * self.absolute_opacity(id)
    }

    /// The background color scaled by absolute opacity.
    pub fn render_background_color(&self, id: WidgetId) -> Color {
        let Some(node) = self.nodes.get(id) else {
            return Color::TRANSPARENT;
        };
        node.render_background_color(self.absolute_opacity(id))
    }

    /// White scaled by absolute opacity, used to tint textures.
    pub fn render_graphic_color(&self, id: WidgetId) -> Color {
        Color::WHITE * self.absolute_opacity(id)
    }

    // =========================================================================
    // Lifecycle passes
    // =========================================================================

    /// Run the prepare pass over the subtree rooted at `root`.
    ///
    /// For every not-yet-prepared widget, in order: apply its style record,
    /// resolve its bindings, read live bindings, prepare its children, fire
    /// one-time init handlers, and settle child layout. Idempotent until a
    /// widget is invalidated (e.g. by reassigning its binding context).
    pub fn prepare(&mut self, root: WidgetId, styles: &marmot_style::StyleLibrary) {
        let mut initialized = Vec::new();
        self.prepare_widget(root, styles, &mut initialized);
        for id in initialized {
            self.fire_init_handlers(id);
        }
    }

    fn prepare_widget(
        &mut self,
        id: WidgetId,
        styles: &marmot_style::StyleLibrary,
        initialized: &mut Vec<WidgetId>,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.prepared {
            return;
        }

        self.apply_style_record(id, styles);
        self.update_bindings(id);
        self.read_bindings(id);

        for child in self.child_widgets(id) {
            self.prepare_widget(child, styles, initialized);
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if !node.init_called {
            node.init_called = true;
            initialized.push(id);
        }
        node.prepared = true;
        self.update_child_formatting(id);
    }

    /// Register a handler to run once, after `id`'s first prepare pass.
    ///
    /// Init handlers receive the tree mutably and typically attach
    /// animations or finish wiring the widget up. If the widget has already
    /// initialized, the handler runs on the next prepare pass only if the
    /// widget is invalidated; it is never invoked retroactively.
    pub fn on_init(
        &mut self,
        id: WidgetId,
        handler: impl FnMut(&mut WidgetTree, WidgetId) + 'static,
    ) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))?;
        node.init_handlers.push(Box::new(handler));
        Ok(())
    }

    fn fire_init_handlers(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let mut handlers = std::mem::take(&mut node.init_handlers);
        for handler in handlers.iter_mut() {
            handler(self, id);
        }
        // Reattach, keeping any handlers registered while running.
        if let Some(node) = self.nodes.get_mut(id) {
            let added = std::mem::take(&mut node.init_handlers);
            node.init_handlers = handlers;
            node.init_handlers.extend(added);
        }
    }

    /// The cheap per-frame pass: refresh live bindings over a subtree.
    pub fn update(&mut self, root: WidgetId) {
        for id in self.collect_subtree(root) {
            self.read_bindings(id);
        }
    }
}
