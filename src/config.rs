//! Layout constants and run configuration.
//!
//! The card geometry is fixed. [`GridSpec::standard`] bundles the constants
//! below and is what the binary uses; other grids exist only so the
//! pagination arithmetic can be exercised with different capacities.

use std::path::{Path, PathBuf};

/// Conversion factor from millimetres to PDF points.
pub const POINTS_PER_MM: f32 = 2.834_645_7;

/// Page width in mm (A4).
pub const PAGE_WIDTH: f32 = 210.0;
/// Page height in mm (A4).
pub const PAGE_HEIGHT: f32 = 297.0;

/// Card size in mm. Cards are square.
pub const CARD_SIZE: f32 = 60.0;

/// Card columns on a page.
pub const COLUMNS_PER_PAGE: usize = 3;
/// Card rows on a page.
pub const ROWS_PER_PAGE: usize = 4;
/// Words printed on each card (one per half).
pub const WORDS_PER_CARD: usize = 2;
/// Words that fit on one page.
pub const WORDS_PER_PAGE: usize = COLUMNS_PER_PAGE * ROWS_PER_PAGE * WORDS_PER_CARD;

/// Length of each arm pair of a registration crosshair, in mm.
pub const CROSSHAIR_SIZE: f32 = 5.0;
/// Stroke width for all lines, in mm.
pub const LINE_WIDTH: f32 = 0.5;
/// Dash pattern of the fold line, in mm.
pub const FOLD_DASH: [f32; 2] = [3.0, 1.0];
/// Grey level of registration crosshairs.
pub const CROSSHAIR_GRAY: f32 = 0.5;

/// Default word source file.
pub const DEFAULT_INPUT: &str = "vortoj.tsv";

/// Fonts tried in order before falling back to Helvetica.
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// The card grid of a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Page width in mm
    pub page_width: f32,
    /// Page height in mm
    pub page_height: f32,
    /// Card edge length in mm
    pub card_size: f32,
    /// Card columns per page
    pub columns: usize,
    /// Card rows per page
    pub rows: usize,
}

impl GridSpec {
    /// The A4 grid of 3 × 4 cards of 60 mm.
    pub fn standard() -> Self {
        Self {
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            card_size: CARD_SIZE,
            columns: COLUMNS_PER_PAGE,
            rows: ROWS_PER_PAGE,
        }
    }

    /// Same page and card size with a different number of columns and rows.
    pub fn with_cards(mut self, columns: usize, rows: usize) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Cards on one page.
    pub fn cards_per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// Words on one page.
    pub fn words_per_page(&self) -> usize {
        self.cards_per_page() * WORDS_PER_CARD
    }

    /// Top-left corner of the card grid, which is centred on the page.
    pub fn cards_start(&self) -> (f32, f32) {
        (
            self.page_width / 2.0 - self.columns as f32 * self.card_size / 2.0,
            self.page_height / 2.0 - self.rows as f32 * self.card_size / 2.0,
        )
    }

    /// Font size used for words, a fixed fraction of the card size.
    pub fn font_size(&self) -> f32 {
        self.card_size / 9.0
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard()
    }
}

/// What is printed around the cards of each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Grey registration crosshairs at every grid intersection
    Crosshairs,
    /// Solid black cut lines around and between the cards
    Outlines,
}

/// How the last pages are balanced for double-sided printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStrategy {
    /// Fill every page in order
    None,
    /// Precomputed skip points, splitting the last page pair (and a lone last page)
    SkipPoints,
    /// Split at the second-to-last page while iterating
    SecondToLast,
}

/// One PDF to produce from the word list.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputJob {
    /// Output file name, relative to the output directory
    pub file_name: String,
    /// Page decoration
    pub decoration: Decoration,
    /// Balancing of the final pages
    pub strategy: BalanceStrategy,
}

impl OutputJob {
    /// Create a new output job.
    pub fn new(
        file_name: impl Into<String>,
        decoration: Decoration,
        strategy: BalanceStrategy,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            decoration,
            strategy,
        }
    }

    /// Single-sided sheets with crosshairs.
    pub fn single_sided() -> Self {
        Self::new("krucindiko-unuflanke.pdf", Decoration::Crosshairs, BalanceStrategy::None)
    }

    /// Double-sided sheets with crosshairs.
    pub fn double_sided() -> Self {
        Self::new("krucindiko-duflanke.pdf", Decoration::Crosshairs, BalanceStrategy::SkipPoints)
    }

    /// Pre-cut card stock with outlines.
    pub fn outlined() -> Self {
        Self::new("krucindiko.pdf", Decoration::Outlines, BalanceStrategy::SecondToLast)
    }
}

/// Configuration of a whole run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Tab-separated word source
    pub input: PathBuf,
    /// Directory receiving the PDFs
    pub output_dir: PathBuf,
    /// PDFs to produce
    pub jobs: Vec<OutputJob>,
    /// TrueType fonts tried in order; Helvetica is used if none loads
    pub font_candidates: Vec<PathBuf>,
    /// Compress content and font streams
    pub compress: bool,
    /// Card grid
    pub grid: GridSpec,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            jobs: vec![
                OutputJob::single_sided(),
                OutputJob::double_sided(),
                OutputJob::outlined(),
            ],
            font_candidates: DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            compress: true,
            grid: GridSpec::standard(),
        }
    }

    /// Read words from a different file.
    pub fn with_input(mut self, input: impl AsRef<Path>) -> Self {
        self.input = input.as_ref().to_path_buf();
        self
    }

    /// Write PDFs into a different directory.
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Replace the list of PDFs to produce.
    pub fn with_jobs(mut self, jobs: Vec<OutputJob>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Replace the font candidates. An empty list forces Helvetica.
    pub fn with_font_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.font_candidates = candidates;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Path of a job's output file.
    pub fn output_path(&self, job: &OutputJob) -> PathBuf {
        self.output_dir.join(&job.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_capacities() {
        let grid = GridSpec::standard();
        assert_eq!(grid.cards_per_page(), 12);
        assert_eq!(grid.words_per_page(), 24);
        assert_eq!(grid.words_per_page(), WORDS_PER_PAGE);
    }

    #[test]
    fn test_cards_are_centred() {
        let (x, y) = GridSpec::standard().cards_start();
        assert_eq!(x, 15.0);
        assert_eq!(y, 28.5);
    }

    #[test]
    fn test_font_size_fraction() {
        let size = GridSpec::standard().font_size();
        assert!((size - 60.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_jobs() {
        let config = AppConfig::default();
        let names: Vec<_> = config.jobs.iter().map(|j| j.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["krucindiko-unuflanke.pdf", "krucindiko-duflanke.pdf", "krucindiko.pdf"]
        );
        assert_eq!(config.input, PathBuf::from("vortoj.tsv"));
        assert!(config.compress);
    }

    #[test]
    fn test_builder_methods() {
        let config = AppConfig::new()
            .with_input("/tmp/words.tsv")
            .with_output_dir("/tmp/out")
            .with_jobs(vec![OutputJob::outlined()])
            .with_font_candidates(Vec::new())
            .with_compress(false);

        assert_eq!(config.input, PathBuf::from("/tmp/words.tsv"));
        assert_eq!(config.jobs.len(), 1);
        assert!(config.font_candidates.is_empty());
        assert!(!config.compress);
        assert_eq!(
            config.output_path(&config.jobs[0]),
            PathBuf::from("/tmp/out/krucindiko.pdf")
        );
    }
}
