//! Property tests for page balancing and placement.

use krucindiko::config::{BalanceStrategy, GridSpec};
use krucindiko::layout::mirror_column;
use krucindiko::pagination::{page_count, page_word_counts, Balancing};
use krucindiko::words::WordList;
use proptest::prelude::*;

fn counts(word_count: usize, grid: &GridSpec, strategy: BalanceStrategy) -> Vec<usize> {
    let balancing = Balancing::plan(strategy, word_count, grid.words_per_page());
    page_word_counts(word_count, grid, &balancing)
}

fn grid_strategy() -> impl Strategy<Value = GridSpec> {
    (1usize..=4, 1usize..=5)
        .prop_map(|(columns, rows)| GridSpec::standard().with_cards(columns, rows))
}

fn balance_strategy() -> impl Strategy<Value = BalanceStrategy> {
    prop_oneof![
        Just(BalanceStrategy::None),
        Just(BalanceStrategy::SkipPoints),
        Just(BalanceStrategy::SecondToLast),
    ]
}

proptest! {
    #[test]
    fn every_word_is_placed(
        word_count in 0usize..500,
        grid in grid_strategy(),
        strategy in balance_strategy(),
    ) {
        let pages = counts(word_count, &grid, strategy);
        prop_assert_eq!(pages.iter().sum::<usize>(), word_count);
    }

    #[test]
    fn pages_are_never_empty_or_overfull(
        word_count in 0usize..500,
        grid in grid_strategy(),
        strategy in balance_strategy(),
    ) {
        let capacity = grid.words_per_page();
        for words in counts(word_count, &grid, strategy) {
            prop_assert!(words > 0);
            prop_assert!(words <= capacity);
        }
    }

    #[test]
    fn unbalanced_fills_in_order(word_count in 0usize..500, grid in grid_strategy()) {
        let capacity = grid.words_per_page();
        let pages = counts(word_count, &grid, BalanceStrategy::None);
        prop_assert_eq!(pages.len(), page_count(word_count, capacity));
        if let Some((_, full)) = pages.split_last() {
            prop_assert!(full.iter().all(|&w| w == capacity));
        }
    }

    #[test]
    fn second_to_last_keeps_earlier_pages_full(word_count in 0usize..500, grid in grid_strategy()) {
        let capacity = grid.words_per_page();
        let pages = counts(word_count, &grid, BalanceStrategy::SecondToLast);
        prop_assert_eq!(pages.len(), page_count(word_count, capacity));

        let keep = pages.len().saturating_sub(2);
        prop_assert!(pages[..keep].iter().all(|&w| w == capacity));
        if word_count > 2 * capacity {
            let last = pages[pages.len() - 1];
            let before = pages[pages.len() - 2];
            prop_assert!(last >= before && last - before <= 1);
        }
    }

    #[test]
    fn skip_points_give_even_page_count(word_count in 0usize..500, grid in grid_strategy()) {
        let capacity = grid.words_per_page();
        let pages = counts(word_count, &grid, BalanceStrategy::SkipPoints);
        if word_count > capacity {
            prop_assert_eq!(pages.len() % 2, 0);
            let last = pages[pages.len() - 1];
            let before = pages[pages.len() - 2];
            prop_assert!(last >= before && last - before <= 1);
        } else {
            prop_assert_eq!(pages.len(), page_count(word_count, capacity));
        }
    }

    #[test]
    fn strategies_agree_on_even_page_counts(word_count in 0usize..500, grid in grid_strategy()) {
        let capacity = grid.words_per_page();
        let n_pages = page_count(word_count, capacity);
        prop_assume!(n_pages >= 4 && n_pages % 2 == 0);
        prop_assert_eq!(
            counts(word_count, &grid, BalanceStrategy::SkipPoints),
            counts(word_count, &grid, BalanceStrategy::SecondToLast)
        );
    }

    #[test]
    fn mirroring_twice_is_identity(columns in 1usize..10, offset in 0usize..10) {
        let column = offset % columns;
        prop_assert_eq!(mirror_column(mirror_column(column, columns), columns), column);
    }

    #[test]
    fn word_list_keeps_first_occurrences(raw in proptest::collection::vec("[a-e]{1,3}", 0..60)) {
        let list: WordList = raw.iter().cloned().collect();
        let mut expected: Vec<&str> = Vec::new();
        for word in &raw {
            if !expected.contains(&word.as_str()) {
                expected.push(word.as_str());
            }
        }
        prop_assert_eq!(list.iter().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn thirty_words_double_sided() {
    assert_eq!(counts(30, &GridSpec::standard(), BalanceStrategy::SkipPoints), vec![15, 15]);
}

#[test]
fn zero_words_give_no_pages() {
    for strategy in [
        BalanceStrategy::None,
        BalanceStrategy::SkipPoints,
        BalanceStrategy::SecondToLast,
    ] {
        assert!(counts(0, &GridSpec::standard(), strategy).is_empty());
    }
}
