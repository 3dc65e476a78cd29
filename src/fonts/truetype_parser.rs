//! TrueType/OpenType font parser for PDF embedding.
//!
//! This module wraps the `ttf-parser` crate to extract what is needed to
//! centre words on cards and to embed the font program:
//! - character to glyph mapping and advance widths
//! - vertical metrics (ascender, descender, cap height)
//! - FontDescriptor values (bounding box, flags, italic angle)

use std::collections::HashMap;

use ttf_parser::{Face, GlyphId};

/// Error types for TrueType font parsing.
#[derive(Debug, thiserror::Error)]
pub enum TrueTypeError {
    /// Failed to parse font file
    #[error("Failed to parse font file: {0}")]
    ParseError(String),

    /// Font file is empty or invalid
    #[error("Font file is empty or invalid")]
    EmptyFont,
}

/// Result type for TrueType operations.
pub type TrueTypeResult<T> = Result<T, TrueTypeError>;

/// Parsed TrueType font data.
#[derive(Debug)]
pub struct TrueTypeFont<'a> {
    /// The parsed font face
    face: Face<'a>,
    /// Cached character to glyph ID mapping
    char_to_glyph: HashMap<char, u16>,
    /// Cached glyph widths (glyph ID -> width in 1/1000 em)
    glyph_widths: HashMap<u16, u16>,
}

impl<'a> TrueTypeFont<'a> {
    /// Parse a TrueType/OpenType font from raw data.
    pub fn parse(data: &'a [u8]) -> TrueTypeResult<Self> {
        if data.is_empty() {
            return Err(TrueTypeError::EmptyFont);
        }

        let face = Face::parse(data, 0).map_err(|e| TrueTypeError::ParseError(e.to_string()))?;

        let mut font = Self {
            face,
            char_to_glyph: HashMap::new(),
            glyph_widths: HashMap::new(),
        };

        font.build_char_map();
        font.build_width_table();

        Ok(font)
    }

    /// Build the character to glyph ID mapping over the Basic Multilingual Plane.
    fn build_char_map(&mut self) {
        for codepoint in 0..=0xFFFF_u32 {
            if let Some(ch) = char::from_u32(codepoint) {
                if let Some(glyph_id) = self.face.glyph_index(ch) {
                    self.char_to_glyph.insert(ch, glyph_id.0);
                }
            }
        }
    }

    /// Build glyph width table from hmtx table.
    fn build_width_table(&mut self) {
        let units_per_em = self.face.units_per_em().max(1) as u32;

        for glyph_id in 0..self.face.number_of_glyphs() {
            let advance = self.face.glyph_hor_advance(GlyphId(glyph_id)).unwrap_or(0);
            let width_1000 = (advance as u32 * 1000 / units_per_em) as u16;
            self.glyph_widths.insert(glyph_id, width_1000);
        }
    }

    /// Get the font's PostScript name.
    pub fn postscript_name(&self) -> Option<String> {
        self.face
            .names()
            .into_iter()
            .find(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|name| name.to_string())
    }

    /// Get units per em for this font.
    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    /// Get the ascender in font units.
    pub fn ascender(&self) -> i16 {
        self.face.ascender()
    }

    /// Get the descender in font units (negative value).
    pub fn descender(&self) -> i16 {
        self.face.descender()
    }

    /// Get the cap height in font units.
    pub fn cap_height(&self) -> Option<i16> {
        self.face.capital_height()
    }

    /// Italic angle estimated from the style bit: upright 0, italic -12.
    pub fn italic_angle(&self) -> f32 {
        if self.is_italic() {
            -12.0
        } else {
            0.0
        }
    }

    /// Check if the font is bold.
    pub fn is_bold(&self) -> bool {
        self.face.is_bold()
    }

    /// Check if the font is italic.
    pub fn is_italic(&self) -> bool {
        self.face.is_italic()
    }

    /// Get the font bounding box.
    pub fn bbox(&self) -> (i16, i16, i16, i16) {
        let bbox = self.face.global_bounding_box();
        (bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max)
    }

    /// Get glyph ID for a character.
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.char_to_glyph.get(&ch).copied()
    }

    /// Get glyph width in 1/1000 em units.
    pub fn glyph_width(&self, glyph_id: u16) -> u16 {
        self.glyph_widths.get(&glyph_id).copied().unwrap_or(500)
    }

    /// Character to glyph mapping of the font.
    pub fn char_map(&self) -> &HashMap<char, u16> {
        &self.char_to_glyph
    }

    /// Glyph widths of the font, in 1/1000 em.
    pub fn glyph_widths(&self) -> &HashMap<u16, u16> {
        &self.glyph_widths
    }

    /// StemV estimated from the font weight; TrueType doesn't store it.
    pub fn stem_v(&self) -> i16 {
        if self.is_bold() {
            140
        } else {
            80
        }
    }

    /// Get font flags for the PDF FontDescriptor.
    ///
    /// - Bit 1: FixedPitch
    /// - Bit 6: Nonsymbolic
    /// - Bit 7: Italic
    pub fn font_flags(&self) -> u32 {
        let mut flags = 0u32;

        if self.face.is_monospaced() {
            flags |= 1 << 0;
        }

        flags |= 1 << 5;

        if self.is_italic() {
            flags |= 1 << 6;
        }

        flags
    }
}

/// Font metrics extracted for the PDF FontDescriptor.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// PostScript name
    pub name: String,
    /// Units per em
    pub units_per_em: u16,
    /// Ascender (positive)
    pub ascender: i16,
    /// Descender (negative)
    pub descender: i16,
    /// Cap height
    pub cap_height: i16,
    /// Italic angle
    pub italic_angle: f32,
    /// Bounding box (llx, lly, urx, ury)
    pub bbox: (i16, i16, i16, i16),
    /// Stem V (vertical stem width)
    pub stem_v: i16,
    /// Font flags
    pub flags: u32,
}

impl FontMetrics {
    /// Extract metrics from a parsed TrueType font.
    pub fn from_font(font: &TrueTypeFont) -> Self {
        Self {
            name: font
                .postscript_name()
                .unwrap_or_else(|| "Unknown".to_string()),
            units_per_em: font.units_per_em().max(1),
            ascender: font.ascender(),
            descender: font.descender(),
            cap_height: font.cap_height().unwrap_or(font.ascender()),
            italic_angle: font.italic_angle(),
            bbox: font.bbox(),
            stem_v: font.stem_v(),
            flags: font.font_flags(),
        }
    }

    /// Convert a value from font units to PDF units (1/1000 em).
    pub fn to_pdf_units(&self, value: i16) -> i32 {
        (value as i32 * 1000) / self.units_per_em as i32
    }

    /// Get ascender in PDF units.
    pub fn pdf_ascender(&self) -> i32 {
        self.to_pdf_units(self.ascender)
    }

    /// Get descender in PDF units.
    pub fn pdf_descender(&self) -> i32 {
        self.to_pdf_units(self.descender)
    }

    /// Get cap height in PDF units.
    pub fn pdf_cap_height(&self) -> i32 {
        self.to_pdf_units(self.cap_height)
    }

    /// Get bounding box in PDF units.
    pub fn pdf_bbox(&self) -> (i32, i32, i32, i32) {
        (
            self.to_pdf_units(self.bbox.0),
            self.to_pdf_units(self.bbox.1),
            self.to_pdf_units(self.bbox.2),
            self.to_pdf_units(self.bbox.3),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_on_empty_data() {
        let result = TrueTypeFont::parse(&[]);
        assert!(matches!(result, Err(TrueTypeError::EmptyFont)));
    }

    #[test]
    fn test_error_on_invalid_data() {
        let result = TrueTypeFont::parse(b"not a font file");
        assert!(matches!(result, Err(TrueTypeError::ParseError(_))));
    }

    #[test]
    fn test_pdf_units_conversion() {
        let metrics = FontMetrics {
            name: "Test".to_string(),
            units_per_em: 2048,
            ascender: 1901,
            descender: -483,
            cap_height: 1493,
            italic_angle: 0.0,
            bbox: (-2090, -948, 3673, 2524),
            stem_v: 80,
            flags: 32,
        };
        assert_eq!(metrics.pdf_ascender(), 928);
        assert_eq!(metrics.pdf_descender(), -235);
        assert_eq!(metrics.pdf_cap_height(), 729);
        assert_eq!(metrics.pdf_bbox().0, -1020);
    }
}
