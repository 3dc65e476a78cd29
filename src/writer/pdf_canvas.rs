//! PDF implementation of the drawing canvas.
//!
//! Layout works in millimetres from the top-left corner of the page; PDF
//! uses points from the bottom-left. Every coordinate passed to the canvas
//! is converted here.

use super::content_stream::ContentStreamBuilder;
use super::font_manager::{CardFont, EncodedText, GlyphUsage};
use super::pdf_writer::{PdfWriter, PdfWriterConfig};
use crate::canvas::{Canvas, Orientation};
use crate::config::{LINE_WIDTH, PAGE_HEIGHT, PAGE_WIDTH, POINTS_PER_MM};
use crate::error::Result;
use crate::geometry::{Point, Rect};

/// Resource name of the card font on every page.
const FONT_RESOURCE: &str = "F1";

/// A canvas that renders pages into a PDF document.
pub struct PdfCanvas {
    writer: PdfWriter,
    font: CardFont,
    /// Page size in mm
    page_width: f32,
    page_height: f32,
    /// Content of the open page
    page: Option<ContentStreamBuilder>,
    /// Font size in mm
    font_size: f32,
    used_glyphs: GlyphUsage,
}

impl PdfCanvas {
    /// Create a canvas for A4 pages.
    pub fn new(font: CardFont, config: PdfWriterConfig) -> Self {
        Self::with_page_size(font, config, PAGE_WIDTH, PAGE_HEIGHT)
    }

    /// Create a canvas with a custom page size in mm.
    pub fn with_page_size(
        font: CardFont,
        config: PdfWriterConfig,
        page_width: f32,
        page_height: f32,
    ) -> Self {
        Self {
            writer: PdfWriter::with_config(config),
            font,
            page_width,
            page_height,
            page: None,
            font_size: 12.0 / POINTS_PER_MM,
            used_glyphs: GlyphUsage::new(),
        }
    }

    /// Number of finished pages.
    pub fn page_count(&self) -> usize {
        self.writer.page_count()
    }

    /// Font used for text.
    pub fn font(&self) -> &CardFont {
        &self.font
    }

    /// Convert a layout point to PDF user space.
    fn to_pdf(&self, p: Point) -> (f32, f32) {
        (p.x * POINTS_PER_MM, (self.page_height - p.y) * POINTS_PER_MM)
    }

    fn content(&mut self) -> Option<&mut ContentStreamBuilder> {
        if self.page.is_none() {
            log::debug!("Drawing outside of a page is ignored");
        }
        self.page.as_mut()
    }
}

impl Canvas for PdfCanvas {
    type Output = Vec<u8>;

    fn begin_page(&mut self) -> Result<()> {
        if self.page.is_some() {
            self.end_page()?;
        }

        let mut content = ContentStreamBuilder::new();
        content.set_line_width(LINE_WIDTH * POINTS_PER_MM).set_fill_gray(0.0);
        self.page = Some(content);
        Ok(())
    }

    fn end_page(&mut self) -> Result<()> {
        if let Some(content) = self.page.take() {
            self.writer.add_page(
                self.page_width * POINTS_PER_MM,
                self.page_height * POINTS_PER_MM,
                &content,
            )?;
        }
        Ok(())
    }

    fn set_stroke_gray(&mut self, gray: f32) {
        if let Some(content) = self.content() {
            content.set_stroke_gray(gray);
        }
    }

    fn set_dash(&mut self, pattern: &[f32]) {
        let pattern = pattern.iter().map(|mm| mm * POINTS_PER_MM).collect();
        if let Some(content) = self.content() {
            content.set_dash_pattern(pattern, 0.0);
        }
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn move_to(&mut self, p: Point) {
        let (x, y) = self.to_pdf(p);
        if let Some(content) = self.content() {
            content.move_to(x, y);
        }
    }

    fn line_to(&mut self, p: Point) {
        let (x, y) = self.to_pdf(p);
        if let Some(content) = self.content() {
            content.line_to(x, y);
        }
    }

    fn stroke(&mut self) {
        if let Some(content) = self.content() {
            content.stroke();
        }
    }

    fn draw_text_centered(
        &mut self,
        text: &str,
        area: Rect,
        orientation: Orientation,
    ) -> Result<()> {
        let encoded = self.font.encode(text);
        let size = self.font_size;
        let width = self.font.advance(&encoded) * size / 1000.0;
        let ascent = self.font.ascent() * size / 1000.0;
        let descent = self.font.descent() * size / 1000.0;

        let center = area.center();
        let origin = Point::new(
            center.x - width / 2.0,
            center.y - (ascent + descent) / 2.0 + ascent,
        );

        let (a, d, origin) = match orientation {
            Orientation::Upright => (1.0, 1.0, origin),
            Orientation::Inverted => (-1.0, -1.0, origin.rotated_half_turn(center)),
        };
        let (x, y) = self.to_pdf(origin);

        if let EncodedText::Glyphs(glyphs) = &encoded {
            self.used_glyphs.extend(glyphs.iter().copied());
        }

        if let Some(content) = self.content() {
            content
                .begin_text()
                .set_font(FONT_RESOURCE, size * POINTS_PER_MM)
                .text_matrix(a, 0.0, 0.0, d, x, y)
                .op(encoded.show_op())
                .end_text();
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        self.end_page()?;
        self.writer
            .set_font(FONT_RESOURCE, self.font.clone(), std::mem::take(&mut self.used_glyphs));
        self.writer.finish()
    }
}
