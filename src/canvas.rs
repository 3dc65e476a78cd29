//! Drawing surface used by the card layout engine.
//!
//! The engine only needs a handful of vector operations, so it talks to a
//! [`Canvas`] instead of a concrete PDF writer. Coordinates are millimetres
//! from the top-left corner of the page.

use crate::error::Result;
use crate::geometry::{Point, Rect};

/// Orientation of a word on its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Reading normally
    Upright,
    /// Rotated 180° about the centre of its area
    Inverted,
}

/// A 2D vector drawing surface with page emission.
pub trait Canvas {
    /// Value produced once all pages are finished.
    type Output;

    /// Start a new, empty page.
    fn begin_page(&mut self) -> Result<()>;

    /// Finish the current page.
    fn end_page(&mut self) -> Result<()>;

    /// Set the stroke colour to a grey level (0 = black, 1 = white).
    fn set_stroke_gray(&mut self, gray: f32);

    /// Set the dash pattern for strokes. An empty pattern draws solid lines.
    fn set_dash(&mut self, pattern: &[f32]);

    /// Set the font size for following text, in mm.
    fn set_font_size(&mut self, size: f32);

    /// Begin a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Add a straight segment to `p`.
    fn line_to(&mut self, p: Point);

    /// Stroke the current path.
    fn stroke(&mut self);

    /// Draw a single line of text centred in `area`.
    ///
    /// Centring uses the advance width of the text and the ascent and
    /// descent of the font. Inverted text is rotated about the centre of
    /// `area`.
    fn draw_text_centered(
        &mut self,
        text: &str,
        area: Rect,
        orientation: Orientation,
    ) -> Result<()>;

    /// Finish the document.
    fn finish(self) -> Result<Self::Output>
    where
        Self: Sized;
}

/// A drawing command captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `begin_page`
    BeginPage,
    /// `end_page`
    EndPage,
    /// `set_stroke_gray`
    StrokeGray(f32),
    /// `set_dash`
    Dash(Vec<f32>),
    /// `set_font_size`
    FontSize(f32),
    /// `move_to`
    MoveTo(Point),
    /// `line_to`
    LineTo(Point),
    /// `stroke`
    Stroke,
    /// `draw_text_centered`
    Text {
        /// Text drawn
        text: String,
        /// Area it was centred in
        area: Rect,
        /// Orientation
        orientation: Orientation,
    },
}

/// Canvas that records commands instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create an empty recording canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Canvas for RecordingCanvas {
    type Output = Vec<DrawCommand>;

    fn begin_page(&mut self) -> Result<()> {
        self.commands.push(DrawCommand::BeginPage);
        Ok(())
    }

    fn end_page(&mut self) -> Result<()> {
        self.commands.push(DrawCommand::EndPage);
        Ok(())
    }

    fn set_stroke_gray(&mut self, gray: f32) {
        self.commands.push(DrawCommand::StrokeGray(gray));
    }

    fn set_dash(&mut self, pattern: &[f32]) {
        self.commands.push(DrawCommand::Dash(pattern.to_vec()));
    }

    fn set_font_size(&mut self, size: f32) {
        self.commands.push(DrawCommand::FontSize(size));
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn draw_text_centered(
        &mut self,
        text: &str,
        area: Rect,
        orientation: Orientation,
    ) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            area,
            orientation,
        });
        Ok(())
    }

    fn finish(self) -> Result<Self::Output> {
        Ok(self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas() {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_page().unwrap();
        canvas.move_to(Point::new(0.0, 0.0));
        canvas.line_to(Point::new(1.0, 0.0));
        canvas.stroke();
        canvas
            .draw_text_centered("kato", Rect::new(0.0, 0.0, 60.0, 30.0), Orientation::Upright)
            .unwrap();
        canvas.end_page().unwrap();

        assert_eq!(canvas.commands().len(), 6);
        let commands = canvas.finish().unwrap();
        assert_eq!(commands.first(), Some(&DrawCommand::BeginPage));
        assert_eq!(commands.last(), Some(&DrawCommand::EndPage));
    }
}
