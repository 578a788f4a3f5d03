//! Server-backed lists: the history panel and the favorites panel.
//!
//! Both panels follow the same read-through pattern: a fetch replaces the
//! whole list, a successful delete removes only the items whose key matches,
//! and a failed fetch collapses the list to a single error placeholder.

use crate::model::{Favorite, HistoryEntry, RequestError};

/// Placeholder shown when a fetch fails.
pub const ERROR_PLACEHOLDER: &str = "Ha ocurrido un error.";
/// Placeholder shown for an empty collection.
pub const EMPTY_PLACEHOLDER: &str = "No se encuentran elementos.";
/// Placeholder shown before the first fetch completes.
pub const LOADING_PLACEHOLDER: &str = "Cargando...";

/// Item with a server-side delete key.
pub trait Keyed {
    /// Key sent with the delete request.
    fn key(&self) -> &str;
}

impl Keyed for HistoryEntry {
    fn key(&self) -> &str {
        &self.query
    }
}

impl Keyed for Favorite {
    fn key(&self) -> &str {
        &self.nombre
    }
}

/// What the list area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// First fetch outstanding.
    Loading,
    /// Last fetch failed.
    Error,
    /// Items (possibly none).
    Loaded,
}

/// Rendered rendition of a server collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteList<T> {
    status: ListStatus,
    items: Vec<T>,
    selected: usize,
}

impl<T> Default for RemoteList<T> {
    fn default() -> Self {
        Self {
            status: ListStatus::Loading,
            items: Vec::new(),
            selected: 0,
        }
    }
}

/// History panel list.
pub type HistoryPanel = RemoteList<HistoryEntry>;
/// Favorites panel list.
pub type FavoritesPanel = RemoteList<Favorite>;

impl<T: Keyed> RemoteList<T> {
    /// List in the loading state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch status.
    pub fn status(&self) -> ListStatus {
        self.status
    }

    /// Loaded items; empty unless [`ListStatus::Loaded`].
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Single placeholder line to show instead of items, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.status {
            ListStatus::Loading => Some(LOADING_PLACEHOLDER),
            ListStatus::Error => Some(ERROR_PLACEHOLDER),
            ListStatus::Loaded if self.items.is_empty() => Some(EMPTY_PLACEHOLDER),
            ListStatus::Loaded => None,
        }
    }

    /// Replace the list with a fetch result.
    pub fn apply_fetch(&mut self, result: Result<Vec<T>, RequestError>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.status = ListStatus::Loaded;
                self.clamp_selection();
            }
            Err(error) => {
                tracing::warn!(%error, "list fetch failed");
                self.items.clear();
                self.status = ListStatus::Error;
                self.selected = 0;
            }
        }
    }

    /// Remove every item whose key equals `key` exactly. Returns how many
    /// were removed.
    pub fn remove_key(&mut self, key: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);
        self.clamp_selection();
        before - self.items.len()
    }

    /// Selected index, when there are items.
    pub fn selected_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.selected)
    }

    /// Selected item.
    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Select `index` if it exists.
    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    /// Select the next item, stopping at the last.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// Select the previous item, stopping at the first.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }
}
