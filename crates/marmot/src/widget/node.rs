//! The widget node data model.
//!
//! A [`WidgetNode`] holds everything a single widget owns: visual state,
//! optional local values for the inheritable properties, binding
//! declarations, lifecycle flags, and attached animations and handlers.
//! Structure (parent/children links) and every derived or cascading value
//! live on [`WidgetTree`](super::WidgetTree); nodes are reached through the
//! tree's arena.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use marmot_core::Signal;
use marmot_render::{Color, Point, Size};
use marmot_style::{EdgeInsets, HorizontalAlign, Stretch, VerticalAlign, WidgetProperty};
use slotmap::new_key_type;

use super::animation::Animation;
use super::binding::{Binding, BindingSource};
use super::painting::RenderHandlers;

new_key_type! {
    /// A unique, stable identifier for a widget in the tree's arena.
    ///
    /// IDs remain valid while the widget exists and become invalid when the
    /// widget is destroyed (removed from the tree).
    pub struct WidgetId;
}

/// What a widget holds as its content.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WidgetContent {
    /// No content.
    #[default]
    None,
    /// An opaque leaf payload, e.g. label text or a glyph name.
    Text(String),
    /// A single owned child widget.
    Widget(WidgetId),
}

/// The built-in widget kinds.
///
/// The kind is a tagged discriminator: render dispatch and "find all
/// widgets of a given kind" traversals match on it instead of downcasting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WidgetKind {
    /// A plain container: background box plus children.
    #[default]
    Panel,
    /// A text leaf drawing its content string.
    Label,
    /// A single-image texture leaf; the glyph name is the content payload.
    Glyph,
}

/// Arguments for the size-changed notification.
#[derive(Debug, Clone, Copy)]
pub struct SizeChanged {
    /// The widget whose size changed.
    pub widget: WidgetId,
    /// The new size.
    pub size: Size,
}

/// Handler invoked once when a widget finishes its first prepare pass.
///
/// Init handlers run after the subtree has been prepared and may freely
/// mutate the tree, e.g. to attach animations.
pub type InitHandler = Box<dyn FnMut(&mut super::WidgetTree, WidgetId)>;

/// A node in the retained widget tree.
pub struct WidgetNode {
    // Identity and structure. Links are maintained by the tree.
    pub(crate) name: String,
    pub(crate) style: Option<String>,
    pub(crate) kind: WidgetKind,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) content: WidgetContent,

    // Inheritable attributes; unset values resolve through the parent chain.
    pub(crate) foreground_color: Option<Color>,
    pub(crate) font_name: Option<String>,
    pub(crate) font_size: Option<f32>,
    pub(crate) horizontal_alignment: Option<HorizontalAlign>,
    pub(crate) vertical_alignment: Option<VerticalAlign>,

    // Visual state.
    pub(crate) offset: Point,
    pub(crate) size: Option<Size>,
    pub(crate) original_size: Option<Size>,
    pub(crate) rotate: f32,
    pub(crate) opacity: f32,
    pub(crate) background_color: Color,
    pub(crate) flip_horizontal: bool,
    pub(crate) flip_vertical: bool,
    pub(crate) visible: bool,
    pub(crate) clip_to_bounds: bool,
    pub(crate) allow_input: bool,
    pub(crate) wrap_content: bool,
    pub(crate) margin: EdgeInsets,
    pub(crate) stretch: Stretch,

    // Binding state.
    pub(crate) binding_context: Option<Rc<dyn BindingSource>>,
    pub(crate) event_context: Option<Rc<dyn BindingSource>>,
    pub(crate) bindings: Vec<Binding>,

    // Lifecycle flags.
    pub(crate) prepared: bool,
    pub(crate) init_called: bool,
    pub(crate) updating: bool,
    pub(crate) applying_styles: bool,

    // Properties explicitly assigned by user code, markup, or bindings.
    // Style application never overrides these.
    pub(crate) local_set: HashSet<WidgetProperty>,

    // Attachments.
    pub(crate) animations: Vec<Animation>,
    pub(crate) init_handlers: Vec<InitHandler>,
    pub(crate) render_handlers: RenderHandlers,

    /// Emitted after a size assignment, once children are re-laid-out.
    pub size_changed: Signal<SizeChanged>,

    /// Free-form parameters carried over from the layout source.
    pub parameters: HashMap<String, String>,
}

impl WidgetNode {
    pub(crate) fn new(kind: WidgetKind, name: String) -> Self {
        Self {
            name,
            style: None,
            kind,
            parent: None,
            children: Vec::new(),
            content: WidgetContent::None,
            foreground_color: None,
            font_name: None,
            font_size: None,
            horizontal_alignment: None,
            vertical_alignment: None,
            offset: Point::ZERO,
            size: None,
            original_size: None,
            rotate: 0.0,
            opacity: 1.0,
            background_color: Color::TRANSPARENT,
            flip_horizontal: false,
            flip_vertical: false,
            visible: true,
            clip_to_bounds: false,
            allow_input: true,
            wrap_content: false,
            margin: EdgeInsets::ZERO,
            stretch: Stretch::NONE,
            binding_context: None,
            event_context: None,
            bindings: Vec::new(),
            prepared: false,
            init_called: false,
            updating: false,
            applying_styles: false,
            local_set: HashSet::new(),
            animations: Vec::new(),
            init_handlers: Vec::new(),
            render_handlers: RenderHandlers::new(),
            size_changed: Signal::new(),
            parameters: HashMap::new(),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// The widget's generated (or loader-assigned) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the widget.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The widget kind discriminator.
    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    /// The referenced style name, if any.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Set or clear the referenced style name.
    ///
    /// Takes effect on the next prepare pass.
    pub fn set_style(&mut self, style: Option<String>) {
        self.style = style;
        self.prepared = false;
    }

    /// The parent widget, `None` for a root.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// The owned child collection (excluding the content slot).
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// The content slot.
    pub fn content(&self) -> &WidgetContent {
        &self.content
    }

    /// The content text, if the content is a leaf payload.
    pub fn content_text(&self) -> Option<&str> {
        match &self.content {
            WidgetContent::Text(t) => Some(t),
            _ => None,
        }
    }

    // =========================================================================
    // Local slots for inheritable attributes
    // =========================================================================

    /// The local foreground color, if set on this widget.
    pub fn local_foreground_color(&self) -> Option<Color> {
        self.foreground_color
    }

    /// Set or clear the local foreground color.
    pub fn set_foreground_color(&mut self, color: Option<Color>) {
        self.foreground_color = color;
        self.mark_local(WidgetProperty::ForegroundColor, color.is_some());
    }

    /// The local font name, if set on this widget.
    pub fn local_font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    /// Set or clear the local font name.
    pub fn set_font_name(&mut self, font_name: Option<String>) {
        self.mark_local(WidgetProperty::FontName, font_name.is_some());
        self.font_name = font_name;
    }

    /// The local font size, if set on this widget.
    pub fn local_font_size(&self) -> Option<f32> {
        self.font_size
    }

    /// Set or clear the local font size.
    pub fn set_font_size(&mut self, font_size: Option<f32>) {
        self.font_size = font_size;
        self.mark_local(WidgetProperty::FontSize, font_size.is_some());
    }

    /// The local horizontal content alignment, if set on this widget.
    pub fn local_horizontal_alignment(&self) -> Option<HorizontalAlign> {
        self.horizontal_alignment
    }

    /// Set or clear the local horizontal content alignment.
    pub fn set_horizontal_alignment(&mut self, align: Option<HorizontalAlign>) {
        self.horizontal_alignment = align;
        self.mark_local(WidgetProperty::HorizontalContentAlignment, align.is_some());
    }

    /// The local vertical content alignment, if set on this widget.
    pub fn local_vertical_alignment(&self) -> Option<VerticalAlign> {
        self.vertical_alignment
    }

    /// Set or clear the local vertical content alignment.
    pub fn set_vertical_alignment(&mut self, align: Option<VerticalAlign>) {
        self.vertical_alignment = align;
        self.mark_local(WidgetProperty::VerticalContentAlignment, align.is_some());
    }

    // =========================================================================
    // Visual state
    // =========================================================================

    /// Position relative to the parent.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Set the position relative to the parent.
    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
        self.mark_local(WidgetProperty::Offset, true);
    }

    /// The current size; zero until first assigned.
    ///
    /// Size is assigned through
    /// [`WidgetTree::set_size`](super::WidgetTree::set_size), which re-lays
    /// out children and fires [`size_changed`](Self::size_changed).
    pub fn size(&self) -> Size {
        self.size.unwrap_or(Size::ZERO)
    }

    /// The authored size, before any scale animation altered the current
    /// size. Zero until a size is first assigned.
    ///
    /// When a binding targets `Size`, the bound (current) size is the
    /// intended size.
    pub fn intended_size(&self) -> Size {
        if self
            .bindings
            .iter()
            .any(|b| b.target == WidgetProperty::Size)
        {
            return self.size();
        }
        self.original_size.unwrap_or(Size::ZERO)
    }

    /// Rotation in radians.
    pub fn rotate(&self) -> f32 {
        self.rotate
    }

    /// Set the rotation in radians.
    pub fn set_rotate(&mut self, rotate: f32) {
        self.rotate = rotate;
        self.mark_local(WidgetProperty::Rotate, true);
    }

    /// Local opacity in `[0, 1]`, multiplied down the tree.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the local opacity.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.mark_local(WidgetProperty::Opacity, true);
    }

    /// The background color (not inherited).
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Set the background color.
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
        self.mark_local(WidgetProperty::BackgroundColor, true);
    }

    /// Whether the widget mirrors horizontally when drawn.
    pub fn flip_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Set horizontal mirroring.
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
        self.mark_local(WidgetProperty::FlipHorizontal, true);
    }

    /// Whether the widget mirrors vertically when drawn.
    pub fn flip_vertical(&self) -> bool {
        self.flip_vertical
    }

    /// Set vertical mirroring.
    pub fn set_flip_vertical(&mut self, flip: bool) {
        self.flip_vertical = flip;
        self.mark_local(WidgetProperty::FlipVertical, true);
    }

    /// Whether the widget (and its subtree) is rendered.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the widget.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.mark_local(WidgetProperty::Visible, true);
    }

    /// Whether children are clipped to this widget's bounds.
    pub fn clip_to_bounds(&self) -> bool {
        self.clip_to_bounds
    }

    /// Enable or disable clipping of the subtree.
    pub fn set_clip_to_bounds(&mut self, clip: bool) {
        self.clip_to_bounds = clip;
        self.mark_local(WidgetProperty::ClipToBounds, true);
    }

    /// Whether the widget participates in input dispatch.
    pub fn allow_input(&self) -> bool {
        self.allow_input
    }

    /// Enable or disable input for this widget.
    pub fn set_allow_input(&mut self, allow: bool) {
        self.allow_input = allow;
        self.mark_local(WidgetProperty::AllowInput, true);
    }

    /// Whether text content wraps at the widget's width.
    pub fn wrap_content(&self) -> bool {
        self.wrap_content
    }

    /// Enable or disable content wrapping.
    pub fn set_wrap_content(&mut self, wrap: bool) {
        self.wrap_content = wrap;
        self.mark_local(WidgetProperty::WrapContent, true);
    }

    /// Per-side insets between this widget and its parent's bounds.
    pub fn margin(&self) -> EdgeInsets {
        self.margin
    }

    /// Set the margin. Takes effect on the next parent re-layout.
    pub fn set_margin(&mut self, margin: EdgeInsets) {
        self.margin = margin;
        self.mark_local(WidgetProperty::Margin, true);
    }

    /// How this widget fills its parent per axis.
    pub fn stretch(&self) -> Stretch {
        self.stretch
    }

    /// Set the stretch. Takes effect on the next parent re-layout.
    pub fn set_stretch(&mut self, stretch: Stretch) {
        self.stretch = stretch;
        self.mark_local(WidgetProperty::Stretch, true);
    }

    // =========================================================================
    // Render colors
    // =========================================================================

    /// The background color scaled by an absolute opacity.
    pub(crate) fn render_background_color(&self, absolute_opacity: f32) -> Color {
        self.background_color * absolute_opacity
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Whether styles, bindings, and init have run for this widget.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Force the next prepare pass to run again for this widget.
    pub fn invalidate(&mut self) {
        self.prepared = false;
    }

    /// The number of animations currently attached.
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub(crate) fn has_local(&self, prop: WidgetProperty) -> bool {
        match prop {
            WidgetProperty::ForegroundColor => self.foreground_color.is_some(),
            WidgetProperty::FontName => self.font_name.is_some(),
            WidgetProperty::FontSize => self.font_size.is_some(),
            WidgetProperty::HorizontalContentAlignment => self.horizontal_alignment.is_some(),
            WidgetProperty::VerticalContentAlignment => self.vertical_alignment.is_some(),
            _ => self.local_set.contains(&prop),
        }
    }

    fn mark_local(&mut self, prop: WidgetProperty, set: bool) {
        if set {
            self.local_set.insert(prop);
        } else {
            self.local_set.remove(&prop);
        }
    }
}

impl std::fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetNode")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("style", &self.style)
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("children", &self.children.len())
            .field("animations", &self.animations.len())
            .field("prepared", &self.prepared)
            .finish()
    }
}
