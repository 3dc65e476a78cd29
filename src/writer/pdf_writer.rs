//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.
//!
//! Objects are numbered in a fixed order (catalog, page tree, font, pages
//! with their content streams, info) and nothing time-dependent is
//! written, so identical input gives identical bytes.

use super::content_stream::ContentStreamBuilder;
use super::font_manager::{CardFont, GlyphUsage};
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::{Object, ObjectRef};
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some("krucindiko".to_string()),
            compress: true,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams and embedded font data are compressed
    /// using FlateDecode (zlib/deflate).
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Build a stream object, compressing the data when asked.
pub(crate) fn stream_object(
    entries: Vec<(&str, Object)>,
    data: &[u8],
    compress: bool,
) -> Result<Object> {
    let mut dict = ObjectSerializer::dict_map(entries);
    let data = if compress {
        dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
        compress_data(data)?
    } else {
        data.to_vec()
    };

    Ok(Object::Stream {
        dict,
        data: bytes::Bytes::from(data),
    })
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content: Vec<u8>,
}

/// The single font resource shared by every page.
struct FontResource {
    resource_name: String,
    font: CardFont,
    used_glyphs: GlyphUsage,
}

/// PDF document writer.
///
/// Collects finished pages and the font resource, then writes the whole
/// document in [`finish`](PdfWriter::finish).
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    font: Option<FontResource>,
}

impl PdfWriter {
    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            font: None,
        }
    }

    /// Add a page with the given dimensions in points.
    pub fn add_page(
        &mut self,
        width: f32,
        height: f32,
        content: &ContentStreamBuilder,
    ) -> Result<()> {
        self.pages.push(PageData {
            width,
            height,
            content: content.build()?,
        });
        Ok(())
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Set the font available to every page under `resource_name`.
    pub fn set_font(
        &mut self,
        resource_name: impl Into<String>,
        font: CardFont,
        used_glyphs: GlyphUsage,
    ) {
        self.font = Some(FontResource {
            resource_name: resource_name.into(),
            font,
            used_glyphs,
        });
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::new();
        let compress = self.config.compress;
        let mut output = Vec::new();

        // PDF Header
        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let catalog_ref = ObjectRef::new(1, 0);
        let pages_ref = ObjectRef::new(2, 0);
        let mut next_id = 3;

        let mut objects: Vec<(ObjectRef, Object)> = Vec::new();

        // Font objects
        let mut font_resources = Vec::new();
        if let Some(resource) = &self.font {
            let font_objects = resource
                .font
                .pdf_objects(next_id, &resource.used_glyphs, compress)?;
            let font_ref = ObjectRef::new(next_id, 0);
            font_resources.push((
                resource.resource_name.as_str(),
                ObjectSerializer::reference(font_ref),
            ));
            next_id += font_objects.len() as u32;
            objects.extend(font_objects);
        }
        let resources =
            ObjectSerializer::dict(vec![("Font", ObjectSerializer::dict(font_resources))]);

        // Page and content objects
        let mut page_refs = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let page_ref = ObjectRef::new(next_id, 0);
            let content_ref = ObjectRef::new(next_id + 1, 0);
            next_id += 2;

            let page_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_ref)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(0.0, 0.0, page.width as f64, page.height as f64),
                ),
                ("Contents", ObjectSerializer::reference(content_ref)),
                ("Resources", resources.clone()),
            ]);

            page_refs.push(ObjectSerializer::reference(page_ref));
            objects.push((page_ref, page_obj));
            objects.push((content_ref, stream_object(Vec::new(), &page.content, compress)?));
        }

        let pages_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", ObjectSerializer::array(page_refs)),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ]);

        let catalog_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(pages_ref)),
        ]);

        // Info object
        let info_ref = ObjectRef::new(next_id, 0);
        next_id += 1;
        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::string(title)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::string(creator)));
            info_entries.push(("Producer", ObjectSerializer::string(creator)));
        }
        let info_obj = ObjectSerializer::dict(info_entries);

        objects.insert(0, (pages_ref, pages_obj));
        objects.insert(0, (catalog_ref, catalog_obj));
        objects.push((info_ref, info_obj));

        // Write all objects in ID order
        let mut xref_offsets = Vec::with_capacity(objects.len());
        for (obj_ref, obj) in &objects {
            xref_offsets.push(output.len());
            serializer.write_indirect(&mut output, obj_ref.id, obj_ref.gen, obj)?;
        }

        // Write xref table
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", next_id)?;

        // Object 0 is always free
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(next_id as i64)),
            ("Root", ObjectSerializer::reference(catalog_ref)),
            ("Info", ObjectSerializer::reference(info_ref)),
        ]);

        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!("Wrote PDF with {} pages, {} bytes", self.pages.len(), output.len());
        Ok(output)
    }
}
