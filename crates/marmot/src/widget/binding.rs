//! Data binding.
//!
//! Widgets declare bindings as `(target property, source expression)`
//! pairs. Expressions resolve against a binding context: any object the
//! application exposes through the [`BindingSource`] trait. A widget with
//! no explicit context inherits its parent's; the event context (the
//! object event handlers target) is looked up through an independent
//! parent chain and only falls back to the data context when no ancestor
//! defines one.
//!
//! Binding runs in two halves. [`WidgetTree::update_bindings`] is the full
//! resolution, performed during prepare and again when a context is
//! reassigned. [`WidgetTree::read_bindings`] is the cheap per-frame half:
//! it refreshes only the live subset (bindings targeting text content), so
//! dynamic text follows the model without re-resolving everything.

use std::fmt::Write as _;
use std::rc::Rc;

use marmot_style::{PropertyValue, WidgetProperty};

use crate::error::TreeError;

use super::node::WidgetId;
use super::tree::WidgetTree;

/// An external model object bindings resolve against.
///
/// Implementations map member names to literal values. A member the object
/// does not expose resolves to `None`, which the binding engine treats as
/// a silent no-op: absent members are expected during incremental
/// authoring.
pub trait BindingSource {
    /// Resolve a named member to a literal value.
    fn resolve(&self, member: &str) -> Option<PropertyValue>;
}

/// One segment of a template expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSegment {
    /// Literal text copied through verbatim.
    Literal(String),
    /// A `{Member}` placeholder resolved against the context.
    Member(String),
}

/// A parsed binding source expression.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingExpr {
    /// A direct member reference: the whole expression is one `{Member}`.
    /// The resolved value is assigned as-is, whatever its type.
    Member(String),
    /// A template string with embedded `{Member}` placeholders. Always
    /// produces text.
    Template(Vec<TemplateSegment>),
}

impl BindingExpr {
    /// Parse a source expression.
    ///
    /// `"{Score}"` parses to a direct member reference; anything else is a
    /// template whose `{Member}` placeholders are substituted on
    /// evaluation. Unterminated braces are treated as literal text.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            let (before, after_open) = rest.split_at(open);
            literal.push_str(before);
            match after_open[1..].find('}') {
                Some(close) => {
                    if !literal.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
                    }
                    let member = &after_open[1..1 + close];
                    segments.push(TemplateSegment::Member(member.trim().to_string()));
                    rest = &after_open[close + 2..];
                }
                None => {
                    literal.push_str(after_open);
                    rest = "";
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(TemplateSegment::Literal(literal));
        }

        match segments.as_slice() {
            [TemplateSegment::Member(m)] => Self::Member(m.clone()),
            _ => Self::Template(segments),
        }
    }

    /// Evaluate the expression against a context.
    ///
    /// Returns `None` when a direct member reference misses. Template
    /// evaluation never fails; missing members substitute as empty text.
    pub fn evaluate(&self, context: &dyn BindingSource) -> Option<PropertyValue> {
        match self {
            Self::Member(member) => context.resolve(member),
            Self::Template(segments) => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        TemplateSegment::Literal(text) => out.push_str(text),
                        TemplateSegment::Member(member) => {
                            if let Some(value) = context.resolve(member) {
                                append_value(&mut out, &value);
                            } else {
                                tracing::trace!(
                                    target: "marmot::binding",
                                    member = %member,
                                    "template member missing from context"
                                );
                            }
                        }
                    }
                }
                Some(PropertyValue::Text(out))
            }
        }
    }
}

/// Render a literal value into template text.
fn append_value(out: &mut String, value: &PropertyValue) {
    match value {
        PropertyValue::Text(t) => out.push_str(t),
        PropertyValue::Number(n) => {
            let _ = write!(out, "{n}");
        }
        PropertyValue::Flag(b) => {
            let _ = write!(out, "{b}");
        }
        PropertyValue::Point(p) => {
            let _ = write!(out, "{},{}", p.x, p.y);
        }
        PropertyValue::Size(s) => {
            let _ = write!(out, "{}x{}", s.width, s.height);
        }
        other => {
            tracing::warn!(target: "marmot::binding", value = ?other, "value has no text form");
        }
    }
}

/// A declared binding: a target widget property fed by an expression.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The widget property the resolved value is assigned into.
    pub target: WidgetProperty,
    /// The parsed source expression.
    pub expr: BindingExpr,
}

impl WidgetTree {
    // =========================================================================
    // Context chains
    // =========================================================================

    /// The effective binding context: the widget's own, or the nearest
    /// ancestor's.
    pub fn binding_context(&self, id: WidgetId) -> Option<Rc<dyn BindingSource>> {
        let node = self.nodes.get(id)?;
        if let Some(ctx) = &node.binding_context {
            return Some(ctx.clone());
        }
        node.parent.and_then(|p| self.binding_context(p))
    }

    /// The effective event context.
    ///
    /// Looked up through the parent chain independently of the data
    /// context; only when no ancestor defines an event context does the
    /// lookup fall back to [`binding_context`](Self::binding_context).
    /// Event handlers and data bindings may therefore target different
    /// objects.
    pub fn event_binding_context(&self, id: WidgetId) -> Option<Rc<dyn BindingSource>> {
        let node = self.nodes.get(id)?;
        if let Some(ctx) = &node.event_context {
            return Some(ctx.clone());
        }
        match node.parent {
            Some(parent) => self
                .event_binding_context(parent)
                .or_else(|| self.binding_context(id)),
            None => self.binding_context(id),
        }
    }

    /// Assign (or clear) the widget's own binding context.
    ///
    /// Reassignment invalidates the widget so the next prepare pass
    /// re-resolves its bindings against the new context.
    pub fn set_binding_context(
        &mut self,
        id: WidgetId,
        context: Option<Rc<dyn BindingSource>>,
    ) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))?;
        node.binding_context = context;
        node.prepared = false;
        Ok(())
    }

    /// Assign (or clear) the widget's own event context.
    pub fn set_event_binding_context(
        &mut self,
        id: WidgetId,
        context: Option<Rc<dyn BindingSource>>,
    ) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))?;
        node.event_context = context;
        Ok(())
    }

    // =========================================================================
    // Declaration and refresh
    // =========================================================================

    /// Declare a binding from a source expression to a widget property.
    ///
    /// A later declaration for the same target replaces the earlier one.
    pub fn set_binding(
        &mut self,
        id: WidgetId,
        target: WidgetProperty,
        source: &str,
    ) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))?;
        let expr = BindingExpr::parse(source);
        if let Some(existing) = node.bindings.iter_mut().find(|b| b.target == target) {
            existing.expr = expr;
        } else {
            node.bindings.push(Binding { target, expr });
        }
        Ok(())
    }

    /// Re-resolve every declared binding against the effective context.
    ///
    /// Invoked during prepare and after a context reassignment. Without a
    /// context in scope this is a no-op.
    pub fn update_bindings(&mut self, id: WidgetId) {
        let Some(context) = self.binding_context(id) else {
            return;
        };
        let bindings: Vec<Binding> = match self.nodes.get(id) {
            Some(node) => node.bindings.clone(),
            None => return,
        };
        for binding in bindings {
            if let Some(value) = binding.expr.evaluate(context.as_ref()) {
                self.apply_binding_value(id, binding.target, &value);
            }
        }
    }

    /// Refresh the live subset of bindings (those feeding text content).
    ///
    /// Runs every frame. While the refresh executes the widget is marked
    /// updating; a nested refresh triggered synchronously from inside a
    /// binding read returns immediately instead of recursing.
    pub fn read_bindings(&mut self, id: WidgetId) {
        {
            let Some(node) = self.nodes.get_mut(id) else {
                return;
            };
            if node.updating {
                return;
            }
            node.updating = true;
        }

        let live: Vec<Binding> = self.nodes[id]
            .bindings
            .iter()
            .filter(|b| b.target == WidgetProperty::Content)
            .cloned()
            .collect();
        if !live.is_empty() {
            if let Some(context) = self.binding_context(id) {
                for binding in live {
                    if let Some(value) = binding.expr.evaluate(context.as_ref()) {
                        self.apply_binding_value(id, binding.target, &value);
                    }
                }
            }
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.updating = false;
        }
    }

    /// Assign a resolved binding value into a widget property.
    ///
    /// Bound values count as explicit local values: a style never
    /// overrides a property the model feeds.
    pub(crate) fn apply_binding_value(
        &mut self,
        id: WidgetId,
        target: WidgetProperty,
        value: &PropertyValue,
    ) {
        self.assign_property(id, target, value, true);
    }
}
