//! Property-based tests for pagination, capture and form invariants.
//!
//! Tests validate:
//! 1. Every page shows min(page_size, rows - page * page_size) rows
//! 2. Capturing k columns of an n-row table holds k * n values
//! 3. The weight slider always sums to 100

use buscador::model::ResultTable;
use buscador::state::{AppState, PaginationState, WeightSlider};
use proptest::prelude::*;

fn table(rows: usize, columns: usize) -> ResultTable {
    ResultTable::new(
        (0..columns).map(|c| format!("col{c}")).collect(),
        (0..rows)
            .map(|r| (0..columns).map(|c| format!("{r}:{c}")).collect())
            .collect(),
    )
}

// ===== Property 1: Page sizes =====

proptest! {
    #[test]
    fn page_shows_expected_row_count(rows in 0usize..500, size in 1usize..50, page in 0usize..60) {
        let mut state = PaginationState::new(rows, size);
        let applied = state.show_page(page);
        let total = state.total_pages();

        prop_assert_eq!(applied, page < total.max(1));
        if applied && rows > 0 {
            let expected = size.min(rows - page * size);
            prop_assert_eq!(state.visible_count(), expected);
        }
    }

    #[test]
    fn pages_partition_all_rows(rows in 0usize..300, size in 1usize..40) {
        let mut state = PaginationState::new(rows, size);
        let mut seen = 0;
        for page in 0..state.total_pages() {
            prop_assert!(state.show_page(page));
            let visible = state.visible_rows();
            prop_assert_eq!(visible.start, seen);
            seen = visible.end;
        }
        prop_assert_eq!(seen, rows);
    }
}

// ===== Property 2: Capture counts =====

proptest! {
    #[test]
    fn capture_holds_every_row_of_each_column(
        rows in 0usize..80,
        columns in 1usize..6,
        presses in proptest::collection::vec(0usize..6, 0..10),
    ) {
        let mut state = AppState::new(10, None);
        state.replace_table(table(rows, columns));

        let mut expected = 0;
        for column in presses {
            state.press_header(column);
            state.release_pointer();
            if column < columns {
                expected += rows;
            }
        }

        prop_assert_eq!(state.capture.item_count(), expected);
    }
}

// ===== Property 3: Slider =====

proptest! {
    #[test]
    fn slider_weights_sum_to_one_hundred(position in any::<i64>(), nudges in proptest::collection::vec(-20i64..20, 0..20)) {
        let mut slider = WeightSlider::new(position);
        prop_assert_eq!(u16::from(slider.value1()) + u16::from(slider.value2()), 100);
        for delta in nudges {
            slider.nudge(delta);
            prop_assert_eq!(u16::from(slider.value1()) + u16::from(slider.value2()), 100);
        }
    }
}
