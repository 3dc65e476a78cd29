//! Word placement state and slot arithmetic.

use crate::config::{GridSpec, WORDS_PER_CARD};
use crate::pagination::{next_page_start, Balancing};

/// Half of a card a word is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHalf {
    /// Upper half, printed upright
    Top,
    /// Lower half, printed rotated 180°
    Bottom,
}

/// Where the word at a given placement index goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Placement index the slot was derived from
    pub index: usize,
    /// Position of the word on its card (0 or 1)
    pub word_in_card: usize,
    /// Card number counted over the whole document
    pub card_num: usize,
    /// Card number within its page
    pub card_in_page: usize,
    /// Page number, starting at 0
    pub page_num: usize,
    /// Grid column, already mirrored on odd pages
    pub column: usize,
    /// Grid row
    pub row: usize,
}

impl Slot {
    /// Compute the slot for placement index `index`.
    ///
    /// Columns are mirrored on odd pages so that, once a sheet is turned
    /// over, each card on the back lies behind the matching card on the
    /// front.
    pub fn at(index: usize, grid: &GridSpec) -> Self {
        let cards_per_page = grid.cards_per_page();
        let word_in_card = index % WORDS_PER_CARD;
        let card_num = index / WORDS_PER_CARD;
        let card_in_page = card_num % cards_per_page;
        let page_num = card_num / cards_per_page;

        let mut column = card_num % grid.columns;
        if page_num % 2 == 1 {
            column = mirror_column(column, grid.columns);
        }

        Self {
            index,
            word_in_card,
            card_num,
            card_in_page,
            page_num,
            column,
            row: card_in_page / grid.columns,
        }
    }

    /// Half of the card this word is printed on.
    pub fn half(&self) -> CardHalf {
        if self.word_in_card == 0 {
            CardHalf::Top
        } else {
            CardHalf::Bottom
        }
    }

    /// Whether this word opens a new page.
    pub fn starts_page(&self) -> bool {
        self.word_in_card == 0 && self.card_in_page == 0
    }
}

/// Mirror a column index within a row of `columns` cards.
pub fn mirror_column(column: usize, columns: usize) -> usize {
    columns - 1 - column
}

/// Index of the next word to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    index: usize,
    words_per_page: usize,
}

impl Placement {
    /// Start placing at the first slot of the first page.
    pub fn new(words_per_page: usize) -> Self {
        Self {
            index: 0,
            words_per_page,
        }
    }

    /// Current placement index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Page the next word will land on.
    pub fn page(&self) -> usize {
        self.index / self.words_per_page
    }

    /// Slot of the next word.
    pub fn slot(&self, grid: &GridSpec) -> Slot {
        Slot::at(self.index, grid)
    }

    /// Advance past the word just placed.
    pub fn place_next(&mut self) {
        self.index += 1;
    }

    /// Jump to the first slot of the next page. Does nothing at a page start.
    pub fn skip_to_next_page(&mut self) {
        self.index = next_page_start(self.index, self.words_per_page);
    }

    /// Apply `balancing` before the next word is placed.
    ///
    /// Returns `true` when a jump happened.
    pub fn balance(&mut self, balancing: &Balancing) -> bool {
        if balancing.should_skip(self.index, self.words_per_page) {
            let before = self.index;
            self.skip_to_next_page();
            self.index != before
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::SkipPoints;

    #[test]
    fn test_first_slots() {
        let grid = GridSpec::standard();

        let first = Slot::at(0, &grid);
        assert!(first.starts_page());
        assert_eq!((first.column, first.row), (0, 0));
        assert_eq!(first.half(), CardHalf::Top);

        let second = Slot::at(1, &grid);
        assert!(!second.starts_page());
        assert_eq!((second.column, second.row), (0, 0));
        assert_eq!(second.half(), CardHalf::Bottom);

        let fourth_card = Slot::at(6, &grid);
        assert_eq!(fourth_card.card_num, 3);
        assert_eq!((fourth_card.column, fourth_card.row), (0, 1));
    }

    #[test]
    fn test_last_slot_of_page() {
        let slot = Slot::at(23, &GridSpec::standard());
        assert_eq!(slot.page_num, 0);
        assert_eq!(slot.card_in_page, 11);
        assert_eq!((slot.column, slot.row), (2, 3));
    }

    #[test]
    fn test_odd_page_mirrors_columns() {
        let grid = GridSpec::standard();
        let page_two = Slot::at(24, &grid);
        assert!(page_two.starts_page());
        assert_eq!(page_two.page_num, 1);
        assert_eq!(page_two.column, 2);

        let third_card = Slot::at(24 + 4, &grid);
        assert_eq!(third_card.column, 0);

        let page_three = Slot::at(48, &grid);
        assert_eq!(page_three.column, 0);
    }

    #[test]
    fn test_mirror_is_involution() {
        for columns in 1..6 {
            for column in 0..columns {
                assert_eq!(mirror_column(mirror_column(column, columns), columns), column);
            }
        }
    }

    #[test]
    fn test_skip_to_next_page() {
        let mut placement = Placement::new(24);
        for _ in 0..15 {
            placement.place_next();
        }
        placement.skip_to_next_page();
        assert_eq!(placement.index(), 24);
        assert_eq!(placement.page(), 1);

        placement.skip_to_next_page();
        assert_eq!(placement.index(), 24);
    }

    #[test]
    fn test_balance_applies_skip_points() {
        let balancing = Balancing::SkipPoints(SkipPoints::plan(30, 24));
        let mut placement = Placement::new(24);
        let mut jumps = Vec::new();

        for _ in 0..30 {
            if placement.balance(&balancing) {
                jumps.push(placement.index());
            }
            placement.place_next();
        }

        assert_eq!(jumps, vec![24]);
        assert_eq!(placement.index(), 39);
    }
}
