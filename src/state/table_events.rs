//! "Table replaced" notification.
//!
//! Whenever a search response swaps the results table, [`AppState`] bumps the
//! [`TableGeneration`] and delivers one [`TableReplaced`] event to each
//! subscriber in a fixed order: pagination first, then capture.
//!
//! [`AppState`]: crate::state::AppState

use crate::model::ResultTable;

/// Monotonic identifier of the table currently on screen.
///
/// Header bindings and page state are only valid for the generation they were
/// built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TableGeneration(u64);

impl TableGeneration {
    /// Generation before any table arrived.
    pub fn initial() -> Self {
        Self(0)
    }

    /// The following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// A new table (or no table) is now displayed.
#[derive(Debug, Clone, Copy)]
pub struct TableReplaced<'a> {
    /// Generation of the new table.
    pub generation: TableGeneration,
    /// The new table, or `None` when the page has no results marker.
    pub table: Option<&'a ResultTable>,
}

/// Component that rebuilds itself when the table changes.
pub trait TableSubscriber {
    /// Rebuild against the new table.
    fn on_table_replaced(&mut self, event: &TableReplaced<'_>);
}
