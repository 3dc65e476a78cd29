//! Fonts for card text.
//!
//! A card sheet uses exactly one font, [`CardFont`]:
//! - `Helvetica`, the PDF Base-14 font with built-in metrics and WinAnsi
//!   encoding
//! - `Embedded`, a TrueType/OpenType font embedded as a Type0 font with
//!   Identity-H encoding, which keeps every character of the word list
//!
//! Both provide the advance widths and vertical metrics needed to centre
//! words on a card, and build their own PDF font objects.

use super::content_stream::ContentStreamOp;
use super::object_serializer::ObjectSerializer;
use super::pdf_writer::stream_object;
use crate::error::{Error, Result};
use crate::fonts::encoding::REPLACEMENT_BYTE;
use crate::fonts::{encode_winansi, unicode_to_winansi, FontMetrics, TrueTypeFont};
use crate::object::{Object, ObjectRef};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Helvetica ascender in 1/1000 em.
const HELVETICA_ASCENT: f32 = 718.0;
/// Helvetica descender depth in 1/1000 em.
const HELVETICA_DESCENT: f32 = 207.0;

/// Helvetica advance widths for WinAnsi codes 0x20-0xFF, in 1/1000 em.
///
/// Undefined codes have width 0.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    // 0x20
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0x30
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 0x40
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 0x50
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 0x60
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 0x70
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    // 0x80
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    // 0x90
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    // 0xA0
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Width of a WinAnsi code in Helvetica, in 1/1000 em.
pub fn helvetica_width(code: u8) -> u16 {
    match code {
        0x20..=0xFF => HELVETICA_WIDTHS[(code - 0x20) as usize],
        _ => 0,
    }
}

/// Glyphs drawn with an embedded font: glyph ID -> character.
pub type GlyphUsage = BTreeMap<u16, char>;

/// A word encoded for the current font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedText {
    /// Single-byte WinAnsi codes
    WinAnsi(Vec<u8>),
    /// Glyph IDs paired with the character each one shows
    Glyphs(Vec<(u16, char)>),
}

impl EncodedText {
    /// The text-showing operator for this text.
    pub fn show_op(&self) -> ContentStreamOp {
        match self {
            EncodedText::WinAnsi(bytes) => ContentStreamOp::ShowText(bytes.clone()),
            EncodedText::Glyphs(glyphs) => {
                ContentStreamOp::ShowHexText(glyphs.iter().map(|(gid, _)| *gid).collect())
            },
        }
    }
}

/// Embedded TrueType font.
///
/// Holds the font program and the lookup tables extracted from it. The
/// whole program is embedded; only the widths and ToUnicode entries are
/// limited to the glyphs actually drawn.
#[derive(Debug)]
pub struct EmbeddedFont {
    /// PostScript name, reduced to characters valid in a PDF name
    pub name: String,
    /// Raw font data (for embedding)
    font_data: bytes::Bytes,
    /// Character -> glyph ID
    glyph_lookup: HashMap<char, u16>,
    /// Glyph ID -> width in 1/1000 em
    glyph_widths: HashMap<u16, u16>,
    /// Descriptor metrics
    metrics: FontMetrics,
}

impl EmbeddedFont {
    /// Create an embedded font from raw TTF/OTF data.
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        let font = TrueTypeFont::parse(&data).map_err(|e| Error::Font(e.to_string()))?;
        let metrics = FontMetrics::from_font(&font);
        let glyph_lookup = font.char_map().clone();
        let glyph_widths = font.glyph_widths().clone();

        let name: String = metrics
            .name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        let name = if name.is_empty() {
            "EmbeddedFont".to_string()
        } else {
            name
        };

        Ok(Self {
            name,
            font_data: bytes::Bytes::from(data),
            glyph_lookup,
            glyph_widths,
            metrics,
        })
    }

    /// Load an embedded font from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_data(data)
    }

    /// Get the glyph ID for a character.
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.glyph_lookup.get(&ch).copied()
    }

    /// Get the width of a glyph in 1/1000 em units.
    pub fn glyph_width(&self, gid: u16) -> u16 {
        self.glyph_widths.get(&gid).copied().unwrap_or(500)
    }

    /// Get the raw font data for embedding.
    pub fn font_data(&self) -> &[u8] {
        &self.font_data
    }

    /// Descriptor metrics of the font.
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Build the CID widths array (`W`) for the glyphs in `used`.
    ///
    /// Consecutive glyph IDs share one run: `[start [w1 w2 ...] ...]`.
    pub fn widths_array(&self, used: &GlyphUsage) -> Object {
        let glyphs: Vec<u16> = used.keys().copied().collect();
        let mut result = Vec::new();

        let mut i = 0;
        while i < glyphs.len() {
            let start = glyphs[i];
            let mut widths = vec![Object::Integer(self.glyph_width(start) as i64)];

            while i + 1 < glyphs.len() && glyphs[i + 1] == glyphs[i] + 1 {
                i += 1;
                widths.push(Object::Integer(self.glyph_width(glyphs[i]) as i64));
            }

            result.push(Object::Integer(start as i64));
            result.push(Object::Array(widths));
            i += 1;
        }

        Object::Array(result)
    }

    /// Generate the ToUnicode CMap for the glyphs in `used`.
    pub fn tounicode_cmap(&self, used: &GlyphUsage) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo <<\n");
        cmap.push_str("  /Registry (Adobe)\n");
        cmap.push_str("  /Ordering (UCS)\n");
        cmap.push_str("  /Supplement 0\n");
        cmap.push_str(">> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        let mappings: Vec<(u16, char)> = used.iter().map(|(&gid, &ch)| (gid, ch)).collect();

        // At most 100 entries per bfchar section
        for chunk in mappings.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for &(gid, ch) in chunk {
                let mut utf16 = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{:04X}", unit))
                    .collect();
                cmap.push_str(&format!("<{:04X}> <{}>\n", gid, hex));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}

/// The font words are set in.
#[derive(Debug, Clone, Default)]
pub enum CardFont {
    /// Base-14 Helvetica, WinAnsi encoded
    #[default]
    Helvetica,
    /// An embedded TrueType/OpenType font
    Embedded(Arc<EmbeddedFont>),
}

impl CardFont {
    /// Load a TrueType/OpenType font file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(CardFont::Embedded(Arc::new(EmbeddedFont::from_file(path)?)))
    }

    /// Use the first candidate font that loads, or Helvetica.
    pub fn discover(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            match Self::load(path) {
                Ok(font) => {
                    log::debug!("Using font {} from {}", font.name(), path.display());
                    return font;
                },
                Err(e) => log::debug!("Skipping font {}: {}", path.display(), e),
            }
        }

        log::warn!("No usable TrueType font found, falling back to Helvetica");
        CardFont::Helvetica
    }

    /// Base font name.
    pub fn name(&self) -> &str {
        match self {
            CardFont::Helvetica => "Helvetica",
            CardFont::Embedded(font) => &font.name,
        }
    }

    /// Whether the font is embedded.
    pub fn is_embedded(&self) -> bool {
        matches!(self, CardFont::Embedded(_))
    }

    /// Ascender height in 1/1000 em.
    pub fn ascent(&self) -> f32 {
        match self {
            CardFont::Helvetica => HELVETICA_ASCENT,
            CardFont::Embedded(font) => font.metrics.pdf_ascender() as f32,
        }
    }

    /// Descender depth below the baseline in 1/1000 em, as a positive value.
    pub fn descent(&self) -> f32 {
        match self {
            CardFont::Helvetica => HELVETICA_DESCENT,
            CardFont::Embedded(font) => -(font.metrics.pdf_descender() as f32),
        }
    }

    /// Encode a word for drawing.
    ///
    /// Characters the font cannot show are logged and drawn as `?` in
    /// Helvetica or as the missing glyph in an embedded font.
    pub fn encode(&self, text: &str) -> EncodedText {
        match self {
            CardFont::Helvetica => {
                let encoded = encode_winansi(text);
                for ch in &encoded.replaced {
                    log::warn!(
                        "Character “{}” in “{}” cannot be shown in Helvetica",
                        ch,
                        text
                    );
                }
                EncodedText::WinAnsi(encoded.bytes)
            },
            CardFont::Embedded(font) => EncodedText::Glyphs(
                text.chars()
                    .map(|ch| {
                        let gid = font.glyph_id(ch).unwrap_or_else(|| {
                            log::warn!(
                                "Character “{}” in “{}” is missing from {}",
                                ch,
                                text,
                                font.name
                            );
                            0
                        });
                        (gid, ch)
                    })
                    .collect(),
            ),
        }
    }

    /// Advance width of encoded text in 1/1000 em.
    pub fn advance(&self, text: &EncodedText) -> f32 {
        match (self, text) {
            (CardFont::Embedded(font), EncodedText::Glyphs(glyphs)) => glyphs
                .iter()
                .map(|(gid, _)| font.glyph_width(*gid) as f32)
                .sum(),
            (_, EncodedText::WinAnsi(bytes)) => {
                bytes.iter().map(|&code| helvetica_width(code) as f32).sum()
            },
            (CardFont::Helvetica, EncodedText::Glyphs(glyphs)) => glyphs
                .iter()
                .map(|(_, ch)| unicode_to_winansi(*ch as u32).unwrap_or(REPLACEMENT_BYTE))
                .map(|code| helvetica_width(code) as f32)
                .sum(),
        }
    }

    /// Width of `text` in the units of `font_size`.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.advance(&self.encode(text)) * font_size / 1000.0
    }

    /// Build the font objects, numbered from `first_id`.
    ///
    /// The first object is the font dictionary referenced from page
    /// resources. `used` lists the glyphs drawn with an embedded font.
    pub fn pdf_objects(
        &self,
        first_id: u32,
        used: &GlyphUsage,
        compress: bool,
    ) -> Result<Vec<(ObjectRef, Object)>> {
        let font = match self {
            CardFont::Helvetica => {
                return Ok(vec![(
                    ObjectRef::new(first_id, 0),
                    ObjectSerializer::dict(vec![
                        ("Type", ObjectSerializer::name("Font")),
                        ("Subtype", ObjectSerializer::name("Type1")),
                        ("BaseFont", ObjectSerializer::name("Helvetica")),
                        ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
                    ]),
                )]);
            },
            CardFont::Embedded(font) => font,
        };

        let type0_ref = ObjectRef::new(first_id, 0);
        let cid_ref = ObjectRef::new(first_id + 1, 0);
        let descriptor_ref = ObjectRef::new(first_id + 2, 0);
        let file_ref = ObjectRef::new(first_id + 3, 0);
        let tounicode_ref = ObjectRef::new(first_id + 4, 0);

        let type0 = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Font")),
            ("Subtype", ObjectSerializer::name("Type0")),
            ("BaseFont", ObjectSerializer::name(&font.name)),
            ("Encoding", ObjectSerializer::name("Identity-H")),
            ("DescendantFonts", ObjectSerializer::array(vec![cid_ref.into()])),
            ("ToUnicode", tounicode_ref.into()),
        ]);

        let cid_font = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Font")),
            ("Subtype", ObjectSerializer::name("CIDFontType2")),
            ("BaseFont", ObjectSerializer::name(&font.name)),
            (
                "CIDSystemInfo",
                ObjectSerializer::dict(vec![
                    ("Registry", ObjectSerializer::string("Adobe")),
                    ("Ordering", ObjectSerializer::string("Identity")),
                    ("Supplement", ObjectSerializer::integer(0)),
                ]),
            ),
            ("FontDescriptor", descriptor_ref.into()),
            ("CIDToGIDMap", ObjectSerializer::name("Identity")),
            ("W", font.widths_array(used)),
        ]);

        let metrics = &font.metrics;
        let (llx, lly, urx, ury) = metrics.pdf_bbox();
        let descriptor = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("FontDescriptor")),
            ("FontName", ObjectSerializer::name(&font.name)),
            ("Flags", ObjectSerializer::integer(metrics.flags as i64)),
            (
                "FontBBox",
                ObjectSerializer::array(vec![
                    ObjectSerializer::integer(llx as i64),
                    ObjectSerializer::integer(lly as i64),
                    ObjectSerializer::integer(urx as i64),
                    ObjectSerializer::integer(ury as i64),
                ]),
            ),
            ("ItalicAngle", ObjectSerializer::real(metrics.italic_angle as f64)),
            ("Ascent", ObjectSerializer::integer(metrics.pdf_ascender() as i64)),
            ("Descent", ObjectSerializer::integer(metrics.pdf_descender() as i64)),
            ("CapHeight", ObjectSerializer::integer(metrics.pdf_cap_height() as i64)),
            ("StemV", ObjectSerializer::integer(metrics.stem_v as i64)),
            ("FontFile2", file_ref.into()),
        ]);

        let font_file = stream_object(
            vec![("Length1", ObjectSerializer::integer(font.font_data.len() as i64))],
            font.font_data(),
            compress,
        )?;

        let tounicode = stream_object(Vec::new(), font.tounicode_cmap(used).as_bytes(), compress)?;

        Ok(vec![
            (type0_ref, type0),
            (cid_ref, cid_font),
            (descriptor_ref, descriptor),
            (file_ref, font_file),
            (tounicode_ref, tounicode),
        ])
    }
}
