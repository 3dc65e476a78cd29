//! Run orchestration.
//!
//! ```text
//! vortoj.tsv
//!     ↓
//! [WordList] (unique words, first occurrence order)
//!     ↓
//! [Balancing] (per output job)
//!     ↓
//! [CardLayout] over [PdfCanvas]
//!     ↓
//! PDF file
//! ```
//!
//! The word list and the font are loaded once and shared by every job.

use std::fs;
use std::path::PathBuf;

use crate::config::{AppConfig, GridSpec, OutputJob};
use crate::error::Result;
use crate::layout::CardLayout;
use crate::pagination::{page_word_counts, Balancing};
use crate::words::WordList;
use crate::writer::{CardFont, PdfCanvas, PdfWriterConfig};

/// A rendered PDF held in memory.
#[derive(Debug, Clone)]
pub struct RenderedDeck {
    /// PDF bytes
    pub bytes: Vec<u8>,
    /// Number of words on each page
    pub page_word_counts: Vec<usize>,
}

impl RenderedDeck {
    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_word_counts.len()
    }
}

/// What a run wrote for one output job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// File that was written
    pub path: PathBuf,
    /// Number of pages
    pub page_count: usize,
    /// Number of words on each page
    pub page_word_counts: Vec<usize>,
}

/// Render one output job into PDF bytes.
pub fn render_pdf(
    words: &WordList,
    grid: &GridSpec,
    job: &OutputJob,
    font: &CardFont,
    writer_config: PdfWriterConfig,
) -> Result<RenderedDeck> {
    let balancing = Balancing::plan(job.strategy, words.len(), grid.words_per_page());
    let counts = page_word_counts(words.len(), grid, &balancing);

    let canvas = PdfCanvas::with_page_size(
        font.clone(),
        writer_config,
        grid.page_width,
        grid.page_height,
    );
    let mut layout = CardLayout::new(canvas, *grid, job.decoration, balancing);
    layout.render(words.iter())?;
    debug_assert_eq!(layout.pages_started(), counts.len());
    let bytes = layout.finish()?;

    Ok(RenderedDeck {
        bytes,
        page_word_counts: counts,
    })
}

/// Produce every configured PDF.
///
/// Fails if the word file is missing or unreadable, or if an output file
/// cannot be written. Nothing is written when the word file is missing.
pub fn run(config: &AppConfig) -> Result<Vec<RenderSummary>> {
    let words = WordList::load(&config.input)?;
    log::info!("Read {} words from {}", words.len(), config.input.display());

    let font = CardFont::discover(&config.font_candidates);
    log::debug!("Using font {}", font.name());

    let mut summaries = Vec::with_capacity(config.jobs.len());
    for job in &config.jobs {
        let writer_config = PdfWriterConfig::default()
            .with_title(job.file_name.trim_end_matches(".pdf"))
            .with_compress(config.compress);
        let deck = render_pdf(&words, &config.grid, job, &font, writer_config)?;

        let path = config.output_path(job);
        fs::write(&path, &deck.bytes)?;
        log::info!(
            "Wrote {} ({} pages: {:?})",
            path.display(),
            deck.page_count(),
            deck.page_word_counts
        );

        summaries.push(RenderSummary {
            path,
            page_count: deck.page_count(),
            page_word_counts: deck.page_word_counts,
        });
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BalanceStrategy, Decoration};

    fn words(n: usize) -> WordList {
        (0..n).map(|i| format!("w{}", i)).collect()
    }

    fn uncompressed() -> PdfWriterConfig {
        PdfWriterConfig::default().with_compress(false)
    }

    #[test]
    fn test_render_counts_pages() {
        let deck = render_pdf(
            &words(30),
            &GridSpec::standard(),
            &OutputJob::double_sided(),
            &CardFont::Helvetica,
            uncompressed(),
        )
        .unwrap();

        assert_eq!(deck.page_word_counts, vec![15, 15]);
        assert_eq!(deck.page_count(), 2);
        let text = String::from_utf8_lossy(&deck.bytes);
        assert!(text.contains("/Count 2"));
    }

    #[test]
    fn test_render_zero_words() {
        let deck = render_pdf(
            &WordList::default(),
            &GridSpec::standard(),
            &OutputJob::outlined(),
            &CardFont::Helvetica,
            uncompressed(),
        )
        .unwrap();

        assert_eq!(deck.page_count(), 0);
        assert!(String::from_utf8_lossy(&deck.bytes).contains("/Count 0"));
    }

    #[test]
    fn test_unbalanced_fills_pages() {
        let job = OutputJob::new("x.pdf", Decoration::Crosshairs, BalanceStrategy::None);
        let deck = render_pdf(
            &words(50),
            &GridSpec::standard(),
            &job,
            &CardFont::Helvetica,
            uncompressed(),
        )
        .unwrap();
        assert_eq!(deck.page_word_counts, vec![24, 24, 2]);
    }

    #[test]
    fn test_run_missing_input() {
        let config = AppConfig::new()
            .with_input("/nonexistent/vortoj.tsv")
            .with_font_candidates(Vec::new());
        let err = run(&config).unwrap_err();
        assert!(matches!(err, crate::error::Error::InputNotFound { .. }));
    }
}
