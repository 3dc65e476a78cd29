//! Pagination planning for double-sided printing.
//!
//! When a sheet is printed on both sides, the cards on the back must sit
//! behind the cards on the front. The layout fills pages in order, so the
//! final pages need to be balanced: a jump to the next page boundary is
//! forced early, leaving the rest of a page blank. Two ways of choosing
//! the jumps are supported:
//!
//! - [`SkipPoints`] precomputes the word indices that trigger a jump. It
//!   splits the last page pair evenly and, when the page count is odd,
//!   also splits the lone last page in half.
//! - [`SecondToLastSplit`] triggers a single jump on the second-to-last
//!   page while iterating.
//!
//! Both leave every earlier page full. They are not interchangeable for
//! every word count; see the tests for where they agree.

use crate::config::{BalanceStrategy, GridSpec};
use crate::layout::Placement;
use std::collections::BTreeSet;

/// Number of pages needed for `word_count` words without balancing.
pub fn page_count(word_count: usize, words_per_page: usize) -> usize {
    word_count.div_ceil(words_per_page)
}

/// Round `index` up to the next multiple of `words_per_page`.
///
/// An index that already starts a page is returned unchanged.
pub fn next_page_start(index: usize, words_per_page: usize) -> usize {
    index.div_ceil(words_per_page) * words_per_page
}

/// Words that fall on the last page, counting a full last page as `P`.
fn last_page_words(word_count: usize, words_per_page: usize) -> usize {
    match word_count % words_per_page {
        0 => words_per_page,
        rem => rem,
    }
}

/// Word indices at which layout jumps to the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipPoints {
    points: BTreeSet<usize>,
}

impl SkipPoints {
    /// Plan the skip points for `word_count` words.
    ///
    /// The last page pair shares `rem + P` words: the first page of the pair
    /// gets the smaller half and the second page the larger one. With an odd
    /// number of pages (three or more) the final page is split in half as
    /// well, so the output always ends on a complete sheet.
    pub fn plan(word_count: usize, words_per_page: usize) -> Self {
        let mut points = BTreeSet::new();
        let n_pages = page_count(word_count, words_per_page);

        if n_pages >= 2 {
            let words_in_last_two = last_page_words(word_count, words_per_page) + words_per_page;
            let last_pair = (n_pages & !1) - 2;
            let smaller_half = words_in_last_two / 2;
            let larger_half = words_in_last_two - smaller_half;

            points.insert(last_pair * words_per_page + smaller_half);
            points.insert((last_pair + 1) * words_per_page + larger_half);
        }

        if n_pages >= 3 && n_pages % 2 == 1 {
            points.insert((n_pages - 1) * words_per_page + words_per_page / 2);
        }

        Self { points }
    }

    /// Check whether `index` is a skip point.
    pub fn contains(&self, index: usize) -> bool {
        self.points.contains(&index)
    }

    /// Iterate over the skip points in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.points.iter().copied()
    }

    /// Number of skip points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if there are no skip points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A single early page break on the second-to-last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondToLastSplit {
    /// Page on which the break happens
    pub page: usize,
    /// Position within that page at which the next page is started
    pub target: usize,
}

impl SecondToLastSplit {
    /// Plan the split for `word_count` words.
    ///
    /// Only word counts above two full pages are split. Otherwise the
    /// target equals the page capacity and is never reached.
    pub fn plan(word_count: usize, words_per_page: usize) -> Self {
        let n_pages = page_count(word_count, words_per_page);
        let target = if word_count > 2 * words_per_page {
            (last_page_words(word_count, words_per_page) + words_per_page) / 2
        } else {
            words_per_page
        };

        Self {
            page: n_pages.saturating_sub(2),
            target,
        }
    }

    /// Check whether the word at `index` has to start a new page.
    pub fn should_skip(&self, index: usize, words_per_page: usize) -> bool {
        index / words_per_page == self.page && index % words_per_page == self.target
    }
}

/// The balancing applied while laying out one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Balancing {
    /// Every page is filled in order
    Unbalanced,
    /// Jump at precomputed word indices
    SkipPoints(SkipPoints),
    /// Jump once on the second-to-last page
    SecondToLast(SecondToLastSplit),
}

impl Balancing {
    /// Plan the balancing for a strategy and word count.
    pub fn plan(strategy: BalanceStrategy, word_count: usize, words_per_page: usize) -> Self {
        let balancing = match strategy {
            BalanceStrategy::None => Balancing::Unbalanced,
            BalanceStrategy::SkipPoints => {
                Balancing::SkipPoints(SkipPoints::plan(word_count, words_per_page))
            },
            BalanceStrategy::SecondToLast => {
                Balancing::SecondToLast(SecondToLastSplit::plan(word_count, words_per_page))
            },
        };
        log::debug!("Balancing for {} words: {:?}", word_count, balancing);
        balancing
    }

    /// Check whether layout must jump to the next page before placing the
    /// word at `index`.
    pub fn should_skip(&self, index: usize, words_per_page: usize) -> bool {
        match self {
            Balancing::Unbalanced => false,
            Balancing::SkipPoints(points) => points.contains(index),
            Balancing::SecondToLast(split) => split.should_skip(index, words_per_page),
        }
    }
}

/// Number of words on each page that layout will emit.
///
/// Runs the same placement rules as the layout engine without drawing.
pub fn page_word_counts(word_count: usize, grid: &GridSpec, balancing: &Balancing) -> Vec<usize> {
    let mut placement = Placement::new(grid.words_per_page());
    let mut counts: Vec<usize> = Vec::new();

    for _ in 0..word_count {
        placement.balance(balancing);

        let page = placement.page();
        if counts.len() <= page {
            counts.resize(page + 1, 0);
        }
        counts[page] += 1;
        placement.place_next();
    }

    counts
}
