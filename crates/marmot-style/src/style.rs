//! Named style records.

use crate::property::{PropertyValue, WidgetProperty};

/// A named bundle of default property values.
///
/// Styles are immutable once built. Values are kept in declaration order;
/// if a property is declared twice the later declaration wins at build
/// time.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    name: String,
    entries: Vec<(WidgetProperty, PropertyValue)>,
}

impl Style {
    /// Build a style from declared entries.
    pub fn new(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (WidgetProperty, PropertyValue)>,
    ) -> Self {
        let mut deduped: Vec<(WidgetProperty, PropertyValue)> = Vec::new();
        for (prop, value) in entries {
            if let Some(existing) = deduped.iter_mut().find(|(p, _)| *p == prop) {
                existing.1 = value;
            } else {
                deduped.push((prop, value));
            }
        }
        Self {
            name: name.into(),
            entries: deduped,
        }
    }

    /// The style's name, used as its library key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value this style defines for `prop`, if any.
    pub fn get(&self, prop: WidgetProperty) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| v)
    }

    /// Iterate the declared entries in order.
    pub fn entries(&self) -> impl Iterator<Item = (WidgetProperty, &PropertyValue)> {
        self.entries.iter().map(|(p, v)| (*p, v))
    }

    /// The number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the style declares no values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
