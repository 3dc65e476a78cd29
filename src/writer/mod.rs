//! PDF writing for card sheets.
//!
//! ## Architecture
//!
//! ```text
//! CardLayout (mm, top-left origin)
//!     ↓
//! [PdfCanvas] (mm → points, bottom-left origin)
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [PdfWriter] (pages, font resource, xref and trailer)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use krucindiko::canvas::{Canvas, Orientation};
//! use krucindiko::geometry::Rect;
//! use krucindiko::writer::{CardFont, PdfCanvas, PdfWriterConfig};
//!
//! # fn main() -> krucindiko::Result<()> {
//! let mut canvas = PdfCanvas::new(CardFont::Helvetica, PdfWriterConfig::default());
//! canvas.begin_page()?;
//! canvas.draw_text_centered("kato", Rect::new(15.0, 28.5, 60.0, 30.0), Orientation::Upright)?;
//! let bytes = canvas.finish()?;
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! # Ok(())
//! # }
//! ```

pub mod content_stream;
pub mod font_manager;
pub mod object_serializer;
pub mod pdf_canvas;
pub mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{CardFont, EmbeddedFont, EncodedText, GlyphUsage};
pub use object_serializer::ObjectSerializer;
pub use pdf_canvas::PdfCanvas;
pub use pdf_writer::{PdfWriter, PdfWriterConfig};
