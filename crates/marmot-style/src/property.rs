//! The widget property vocabulary.
//!
//! Styles and data bindings both assign literal values into widget slots.
//! [`WidgetProperty`] names the slot and [`PropertyValue`] carries the
//! literal; the widget tree matches the pair against its own fields when a
//! style is applied or a binding resolves. A value of the wrong shape for a
//! slot is ignored with a warning rather than aborting the frame.

use std::fmt;
use std::str::FromStr;

use marmot_render::{Color, Point, Size};

use crate::error::Error;
use crate::types::{EdgeInsets, HorizontalAlign, Stretch, VerticalAlign};

/// The assignable properties of a widget node.
///
/// The string forms (used by markup and style sources) are the PascalCase
/// names shown in each variant's documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetProperty {
    /// `ForegroundColor`
    ForegroundColor,
    /// `BackgroundColor`
    BackgroundColor,
    /// `FontName`
    FontName,
    /// `FontSize`
    FontSize,
    /// `HorizontalContentAlignment`
    HorizontalContentAlignment,
    /// `VerticalContentAlignment`
    VerticalContentAlignment,
    /// `Offset`
    Offset,
    /// `Size`
    Size,
    /// `Opacity`
    Opacity,
    /// `Rotate`
    Rotate,
    /// `Visible`
    Visible,
    /// `ClipToBounds`
    ClipToBounds,
    /// `AllowInput`
    AllowInput,
    /// `WrapContent`
    WrapContent,
    /// `FlipHorizontal`
    FlipHorizontal,
    /// `FlipVertical`
    FlipVertical,
    /// `Margin`
    Margin,
    /// `Stretch`
    Stretch,
    /// `Content`
    Content,
}

impl WidgetProperty {
    /// All properties, in a stable order.
    pub const ALL: &'static [Self] = &[
        Self::ForegroundColor,
        Self::BackgroundColor,
        Self::FontName,
        Self::FontSize,
        Self::HorizontalContentAlignment,
        Self::VerticalContentAlignment,
        Self::Offset,
        Self::Size,
        Self::Opacity,
        Self::Rotate,
        Self::Visible,
        Self::ClipToBounds,
        Self::AllowInput,
        Self::WrapContent,
        Self::FlipHorizontal,
        Self::FlipVertical,
        Self::Margin,
        Self::Stretch,
        Self::Content,
    ];

    /// The canonical string name of this property.
    pub fn name(self) -> &'static str {
        match self {
            Self::ForegroundColor => "ForegroundColor",
            Self::BackgroundColor => "BackgroundColor",
            Self::FontName => "FontName",
            Self::FontSize => "FontSize",
            Self::HorizontalContentAlignment => "HorizontalContentAlignment",
            Self::VerticalContentAlignment => "VerticalContentAlignment",
            Self::Offset => "Offset",
            Self::Size => "Size",
            Self::Opacity => "Opacity",
            Self::Rotate => "Rotate",
            Self::Visible => "Visible",
            Self::ClipToBounds => "ClipToBounds",
            Self::AllowInput => "AllowInput",
            Self::WrapContent => "WrapContent",
            Self::FlipHorizontal => "FlipHorizontal",
            Self::FlipVertical => "FlipVertical",
            Self::Margin => "Margin",
            Self::Stretch => "Stretch",
            Self::Content => "Content",
        }
    }
}

impl fmt::Display for WidgetProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidgetProperty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| Error::UnknownProperty {
                name: s.to_string(),
            })
    }
}

/// A literal value assignable to a widget property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A color literal.
    Color(Color),
    /// A scalar (font size, opacity, rotation).
    Number(f32),
    /// A point/vector literal (offset).
    Point(Point),
    /// A size literal.
    Size(Size),
    /// A text literal (content, font name).
    Text(String),
    /// A boolean flag.
    Flag(bool),
    /// A horizontal alignment.
    HAlign(HorizontalAlign),
    /// A vertical alignment.
    VAlign(VerticalAlign),
    /// Per-side insets.
    Insets(EdgeInsets),
    /// Per-axis stretch modes.
    Stretch(Stretch),
}

impl PropertyValue {
    /// The color payload, if this is a color.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// The scalar payload, if this is a number.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text payload, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// The flag payload, if this is a boolean.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<Color> for PropertyValue {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<f32> for PropertyValue {
    fn from(n: f32) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for PropertyValue {
    fn from(t: &str) -> Self {
        Self::Text(t.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(t: String) -> Self {
        Self::Text(t)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_names_round_trip() {
        for p in WidgetProperty::ALL {
            assert_eq!(p.name().parse::<WidgetProperty>().unwrap(), *p);
        }
    }

    #[test]
    fn unknown_property_is_an_error() {
        let err = "NoSuchThing".parse::<WidgetProperty>().unwrap_err();
        assert!(matches!(err, Error::UnknownProperty { name } if name == "NoSuchThing"));
    }

    #[test]
    fn value_accessors() {
        assert_eq!(PropertyValue::from(0.25_f32).as_number(), Some(0.25));
        assert_eq!(PropertyValue::from("hi").as_text(), Some("hi"));
        assert_eq!(PropertyValue::from(true).as_flag(), Some(true));
        assert!(PropertyValue::from("hi").as_number().is_none());
    }
}
