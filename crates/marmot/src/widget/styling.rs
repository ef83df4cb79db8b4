//! Style application.
//!
//! A widget referencing a style by name receives the style's values for
//! every property it has not set explicitly. Missing style names are not
//! errors: a widget may reference a style that arrives with a later screen
//! load. Style application runs once per prepare pass per widget and again
//! only when the widget is invalidated.

use marmot_style::{PropertyValue, StyleLibrary, WidgetProperty};

use super::node::{WidgetContent, WidgetId};
use super::tree::WidgetTree;

impl WidgetTree {
    /// Apply styles to the subtree rooted at `id`.
    ///
    /// Processes the current node, then recurses into its content widget
    /// and children with the same library.
    pub fn apply_styles(&mut self, id: WidgetId, styles: &StyleLibrary) {
        self.apply_style_record(id, styles);
        for child in self.child_widgets(id) {
            self.apply_styles(child, styles);
        }
    }

    /// Apply `id`'s referenced style record, if any, to `id` alone.
    ///
    /// Values only land on properties with no explicit local value. While
    /// the record is applied the widget's `applying_styles` window is open,
    /// so a `Size` supplied by the style updates the authored size rather
    /// than being mistaken for an animated one.
    pub(crate) fn apply_style_record(&mut self, id: WidgetId, styles: &StyleLibrary) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let Some(style_name) = node.style.clone() else {
            return;
        };
        let Some(style) = styles.get(&style_name) else {
            tracing::trace!(
                target: "marmot::style",
                widget = %node.name,
                style = %style_name,
                "style not found in library; skipping"
            );
            return;
        };

        let entries: Vec<(WidgetProperty, PropertyValue)> =
            style.entries().map(|(p, v)| (p, v.clone())).collect();

        if let Some(node) = self.nodes.get_mut(id) {
            node.applying_styles = true;
        }
        for (prop, value) in entries {
            let overridden = self.nodes.get(id).is_none_or(|n| n.has_local(prop));
            if overridden {
                continue;
            }
            self.assign_property(id, prop, &value, false);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.applying_styles = false;
        }
    }

    /// Write a literal value into a widget property slot.
    ///
    /// Shared by style application (`mark_local = false`) and binding
    /// assignment (`mark_local = true`). A value whose shape does not fit
    /// the target slot is dropped with a warning; the frame carries on.
    pub(crate) fn assign_property(
        &mut self,
        id: WidgetId,
        prop: WidgetProperty,
        value: &PropertyValue,
        mark_local: bool,
    ) -> bool {
        // Size re-lays out children, so it goes through the tree.
        if prop == WidgetProperty::Size {
            return match value {
                PropertyValue::Size(s) => self.set_size_impl(id, *s, mark_local).is_ok(),
                other => {
                    warn_mismatch(prop, other);
                    false
                }
            };
        }
        if prop == WidgetProperty::Content {
            return match value {
                PropertyValue::Text(t) => {
                    let Some(node) = self.nodes.get_mut(id) else {
                        return false;
                    };
                    if matches!(node.content, WidgetContent::Widget(_)) {
                        tracing::warn!(
                            target: "marmot::style",
                            widget = %node.name,
                            "cannot assign text content over a content widget"
                        );
                        return false;
                    }
                    node.content = WidgetContent::Text(t.clone());
                    if mark_local {
                        node.local_set.insert(prop);
                    }
                    true
                }
                other => {
                    warn_mismatch(prop, other);
                    false
                }
            };
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let ok = match (prop, value) {
            (WidgetProperty::ForegroundColor, PropertyValue::Color(c)) => {
                node.foreground_color = Some(*c);
                true
            }
            (WidgetProperty::BackgroundColor, PropertyValue::Color(c)) => {
                node.background_color = *c;
                true
            }
            (WidgetProperty::FontName, PropertyValue::Text(t)) => {
                node.font_name = Some(t.clone());
                true
            }
            (WidgetProperty::FontSize, PropertyValue::Number(n)) => {
                node.font_size = Some(*n);
                true
            }
            (WidgetProperty::HorizontalContentAlignment, PropertyValue::HAlign(a)) => {
                node.horizontal_alignment = Some(*a);
                true
            }
            (WidgetProperty::VerticalContentAlignment, PropertyValue::VAlign(a)) => {
                node.vertical_alignment = Some(*a);
                true
            }
            (WidgetProperty::Offset, PropertyValue::Point(p)) => {
                node.offset = *p;
                true
            }
            (WidgetProperty::Opacity, PropertyValue::Number(n)) => {
                node.opacity = *n;
                true
            }
            (WidgetProperty::Rotate, PropertyValue::Number(n)) => {
                node.rotate = *n;
                true
            }
            (WidgetProperty::Visible, PropertyValue::Flag(b)) => {
                node.visible = *b;
                true
            }
            (WidgetProperty::ClipToBounds, PropertyValue::Flag(b)) => {
                node.clip_to_bounds = *b;
                true
            }
            (WidgetProperty::AllowInput, PropertyValue::Flag(b)) => {
                node.allow_input = *b;
                true
            }
            (WidgetProperty::WrapContent, PropertyValue::Flag(b)) => {
                node.wrap_content = *b;
                true
            }
            (WidgetProperty::FlipHorizontal, PropertyValue::Flag(b)) => {
                node.flip_horizontal = *b;
                true
            }
            (WidgetProperty::FlipVertical, PropertyValue::Flag(b)) => {
                node.flip_vertical = *b;
                true
            }
            (WidgetProperty::Margin, PropertyValue::Insets(m)) => {
                node.margin = *m;
                true
            }
            (WidgetProperty::Stretch, PropertyValue::Stretch(s)) => {
                node.stretch = *s;
                true
            }
            (prop, other) => {
                warn_mismatch(prop, other);
                false
            }
        };
        if ok && mark_local {
            node.local_set.insert(prop);
        }
        ok
    }
}

fn warn_mismatch(prop: WidgetProperty, value: &PropertyValue) {
    tracing::warn!(
        target: "marmot::style",
        property = %prop,
        value = ?value,
        "value shape does not fit property; ignoring"
    );
}
