//! Error types for the card generator.
//!
//! Only conditions that stop a run are errors. Malformed input lines are
//! skipped and repeated words are reported as warnings through `log`.

use std::path::PathBuf;

/// Result type alias for card generator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading words or writing card sheets.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The word source file does not exist
    #[error("Word file not found: {}", path.display())]
    InputNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// IO error (reading the word file or writing a PDF)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Font data could not be used for embedding
    #[error("Font error: {0}")]
    Font(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_error() {
        let err = Error::InputNotFound {
            path: PathBuf::from("vortoj.tsv"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("not found"));
        assert!(msg.contains("vortoj.tsv"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("read-only"));
    }

    #[test]
    fn test_font_error() {
        let err = Error::Font("not a font file".to_string());
        assert!(format!("{}", err).contains("not a font file"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
