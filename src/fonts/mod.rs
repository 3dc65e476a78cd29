//! Font parsing and text encoding.
//!
//! Provides WinAnsi encoding for the standard Helvetica font and a
//! TrueType parser for fonts embedded in the card sheets.

pub mod encoding;
pub mod truetype_parser;

pub use encoding::{encode_winansi, unicode_to_winansi, WinAnsiText};
pub use truetype_parser::{FontMetrics, TrueTypeError, TrueTypeFont};
