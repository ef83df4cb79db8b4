//! Styling for Marmot widgets.
//!
//! A [`Style`] is a named, immutable bundle of default property values. A
//! widget that references a style by name receives every value the style
//! defines for a property the widget has not set locally; explicit local
//! values always win. Styles are collected into a [`StyleLibrary`], keyed by
//! name, scoped to the currently loaded screen set.
//!
//! The property vocabulary ([`WidgetProperty`] keys paired with
//! [`PropertyValue`] literals) is shared with the binding engine in the
//! `marmot` crate: both styles and data bindings ultimately assign the same
//! kinds of values to the same widget slots.

mod error;
mod library;
mod property;
mod style;
mod types;

pub use error::{Error, Result};
pub use library::StyleLibrary;
pub use property::{PropertyValue, WidgetProperty};
pub use style::Style;
pub use types::{EdgeInsets, HorizontalAlign, Stretch, StretchMode, VerticalAlign};
