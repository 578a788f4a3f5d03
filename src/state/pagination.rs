//! Client-side pagination of the results table.
//!
//! Paging never removes or reorders rows: it only decides which row indices
//! are shown, so row indices stay stable for the capture buffer.

use crate::state::table_events::{TableReplaced, TableSubscriber};
use std::ops::Range;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page navigation controls, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageControl {
    /// `<<`
    First,
    /// `<`
    Previous,
    /// `>`
    Next,
    /// `>>`
    Last,
}

impl PageControl {
    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            PageControl::First => "<<",
            PageControl::Previous => "<",
            PageControl::Next => ">",
            PageControl::Last => ">>",
        }
    }
}

/// Page state for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
    row_count: usize,
    total_pages: usize,
}

impl PaginationState {
    /// State for a table of `row_count` body rows, on page 0.
    ///
    /// A zero page size is treated as 1.
    pub fn new(row_count: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            current_page: 0,
            page_size,
            row_count,
            total_pages: row_count.div_ceil(page_size),
        }
    }

    /// Zero-based current page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(row_count / page_size)`.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Body row count.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Index of the last page (0 for an empty table).
    fn last_page(&self) -> usize {
        self.total_pages.saturating_sub(1)
    }

    /// Show page `page`. Pages past the last are rejected and leave the state
    /// unchanged; returns whether the page was applied.
    pub fn show_page(&mut self, page: usize) -> bool {
        if page > self.last_page() {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Row indices shown on the current page.
    pub fn visible_rows(&self) -> Range<usize> {
        let start = (self.current_page * self.page_size).min(self.row_count);
        let end = (start + self.page_size).min(self.row_count);
        start..end
    }

    /// Number of rows shown on the current page.
    pub fn visible_count(&self) -> usize {
        self.visible_rows().len()
    }

    /// Apply a navigation control. Returns whether the page changed.
    pub fn apply(&mut self, control: PageControl) -> bool {
        let before = self.current_page;
        match control {
            PageControl::First => {
                self.current_page = 0;
            }
            PageControl::Previous => {
                if self.current_page > 0 {
                    self.current_page -= 1;
                }
            }
            PageControl::Next => {
                if self.current_page < self.last_page() {
                    self.current_page += 1;
                }
            }
            PageControl::Last => {
                self.current_page = self.last_page();
            }
        }
        before != self.current_page
    }

    /// `"Página X de Y"`, one-based. An empty table reads as page 1 of 1.
    pub fn indicator(&self) -> String {
        format!(
            "Página {} de {}",
            self.current_page + 1,
            self.total_pages.max(1)
        )
    }
}

/// Owns the page state of whichever table is on screen.
#[derive(Debug, Clone)]
pub struct PaginationController {
    page_size: usize,
    state: Option<PaginationState>,
}

impl PaginationController {
    /// Controller with no table.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            state: None,
        }
    }

    /// Page state, or `None` when there is no results table.
    pub fn state(&self) -> Option<&PaginationState> {
        self.state.as_ref()
    }

    /// Apply a control; no-op without a table.
    pub fn apply(&mut self, control: PageControl) -> bool {
        match self.state.as_mut() {
            Some(state) => state.apply(control),
            None => false,
        }
    }

    /// Rows shown, or an empty range without a table.
    pub fn visible_rows(&self) -> Range<usize> {
        self.state
            .as_ref()
            .map(PaginationState::visible_rows)
            .unwrap_or(0..0)
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableSubscriber for PaginationController {
    fn on_table_replaced(&mut self, event: &TableReplaced<'_>) {
        self.state = event
            .table
            .filter(|table| table.has_results_marker())
            .map(|table| PaginationState::new(table.row_count(), self.page_size));
    }
}
