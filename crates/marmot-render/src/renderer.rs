//! The renderer capability consumed by the widget tree.

use crate::types::{Color, Point, Rect, Size};

/// Drawing surface the widget tree renders into.
///
/// Implementations own texture/font/content resolution; the widget tree
/// refers to fonts and glyphs by name only. `font_name: None` selects the
/// renderer's default font. A `wrap_width` of `0.0` disables wrapping.
///
/// Clipping is a save/restore stack: every [`push_clip`](Self::push_clip)
/// must be paired with a [`pop_clip`](Self::pop_clip).
pub trait Renderer {
    /// Fill an axis-aligned box.
    fn draw_box(&mut self, position: Point, size: Size, color: Color);

    /// Draw a named glyph (a single-image texture) stretched to `size`.
    #[allow(clippy::too_many_arguments)]
    fn draw_glyph(
        &mut self,
        name: &str,
        position: Point,
        size: Size,
        color: Color,
        flip_horizontal: bool,
        flip_vertical: bool,
        rotation: f32,
    );

    /// Draw text at `position` with the given font and logical font size.
    fn draw_text(
        &mut self,
        text: &str,
        font_name: Option<&str>,
        font_size: f32,
        position: Point,
        color: Color,
        wrap_width: f32,
    );

    /// Measure the space `draw_text` would occupy.
    fn measure_text(
        &self,
        text: &str,
        font_name: Option<&str>,
        font_size: f32,
        wrap_width: f32,
    ) -> Size;

    /// Push a rectangular clip region (intersected with the current clip).
    fn push_clip(&mut self, rect: Rect);

    /// Pop the most recently pushed clip region.
    fn pop_clip(&mut self);
}

/// A single recorded drawing operation.
///
/// See [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled box.
    Box {
        position: Point,
        size: Size,
        color: Color,
    },
    /// A named glyph.
    Glyph {
        name: String,
        position: Point,
        size: Size,
        color: Color,
        flip_horizontal: bool,
        flip_vertical: bool,
        rotation: f32,
    },
    /// A text run.
    Text {
        text: String,
        font_name: Option<String>,
        font_size: f32,
        position: Point,
        color: Color,
        wrap_width: f32,
    },
    /// A clip push.
    PushClip { rect: Rect },
    /// A clip pop.
    PopClip,
}

/// A renderer that records draw commands instead of drawing.
///
/// Text metrics are synthetic but deterministic: each character advances by
/// half the font size and a line is one font size tall, wrapping at
/// `wrap_width` when it is positive. That is enough for layout and
/// alignment assertions without a font stack.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Commands recorded so far, in submission order.
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn draw_box(&mut self, position: Point, size: Size, color: Color) {
        self.commands.push(DrawCommand::Box {
            position,
            size,
            color,
        });
    }

    fn draw_glyph(
        &mut self,
        name: &str,
        position: Point,
        size: Size,
        color: Color,
        flip_horizontal: bool,
        flip_vertical: bool,
        rotation: f32,
    ) {
        self.commands.push(DrawCommand::Glyph {
            name: name.to_string(),
            position,
            size,
            color,
            flip_horizontal,
            flip_vertical,
            rotation,
        });
    }

    fn draw_text(
        &mut self,
        text: &str,
        font_name: Option<&str>,
        font_size: f32,
        position: Point,
        color: Color,
        wrap_width: f32,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            font_name: font_name.map(str::to_string),
            font_size,
            position,
            color,
            wrap_width,
        });
    }

    fn measure_text(
        &self,
        text: &str,
        _font_name: Option<&str>,
        font_size: f32,
        wrap_width: f32,
    ) -> Size {
        let advance = font_size * 0.5;
        let full_width = text.chars().count() as f32 * advance;
        if wrap_width > 0.0 && full_width > wrap_width {
            let lines = (full_width / wrap_width).ceil();
            Size::new(wrap_width, font_size * lines)
        } else {
            Size::new(full_width, font_size)
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::PushClip { rect });
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_submission_order() {
        let mut r = RecordingRenderer::new();
        r.draw_box(Point::ZERO, Size::new(10.0, 10.0), Color::RED);
        r.draw_text("hi", None, 0.1, Point::ZERO, Color::BLACK, 0.0);
        assert_eq!(r.commands.len(), 2);
        assert!(matches!(r.commands[0], DrawCommand::Box { .. }));
        assert!(matches!(r.commands[1], DrawCommand::Text { .. }));
    }

    #[test]
    fn measure_is_deterministic_and_wraps() {
        let r = RecordingRenderer::new();
        let flat = r.measure_text("abcd", None, 1.0, 0.0);
        assert_eq!(flat, Size::new(2.0, 1.0));

        let wrapped = r.measure_text("abcd", None, 1.0, 1.0);
        assert_eq!(wrapped, Size::new(1.0, 2.0));
    }
}
