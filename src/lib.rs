
//! # krucindiko
//!
//! Renders a tab-separated word list into printable flash-card sheets.
//!
//! Each card is a square folded in half: one word is printed upright on the
//! top half and the next word upside down on the bottom half, with a dashed
//! fold line between them. Columns are mirrored on odd pages so that the
//! sheets line up when printed double-sided.
//!
//! ## Architecture
//!
//! ```text
//! words       tab-separated source → unique words
//! pagination  page balancing for double-sided printing
//! layout      slots, mirroring and card drawing over a Canvas
//! writer      PDF canvas, content streams, fonts, document assembly
//! pipeline    runs every output job and writes the files
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use krucindiko::config::{GridSpec, OutputJob};
//! use krucindiko::pipeline::render_pdf;
//! use krucindiko::words::WordList;
//! use krucindiko::writer::{CardFont, PdfWriterConfig};
//!
//! # fn main() -> krucindiko::Result<()> {
//! let words: WordList = ["kato", "hundo", "birdo"].into_iter().collect();
//! let deck = render_pdf(
//!     &words,
//!     &GridSpec::standard(),
//!     &OutputJob::double_sided(),
//!     &CardFont::Helvetica,
//!     PdfWriterConfig::default(),
//! )?;
//! assert_eq!(deck.page_word_counts, vec![3]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Word source
pub mod words;

// Layout
pub mod canvas;
pub mod geometry;
pub mod layout;
pub mod pagination;

// PDF writing
pub mod fonts;
pub mod object;
pub mod writer;

// Orchestration
pub mod pipeline;

pub use error::{Error, Result};
