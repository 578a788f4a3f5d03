//! Mouse hit-testing.
//!
//! The view records where it drew each clickable element in a [`HitMap`];
//! these pure functions map a pointer position back to a [`MouseTarget`].

use crate::state::form::FormField;
use crate::state::pagination::PageControl;
use crate::state::table_events::TableGeneration;
use crate::state::FocusPane;
use ratatui::layout::Rect;

/// Columns at the right edge of a list row that act as its delete cell.
pub const DELETE_CELL_WIDTH: u16 = 3;

/// Whether `(x, y)` lies inside `area`.
pub fn rect_contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x
        && x < area.x.saturating_add(area.width)
        && y >= area.y
        && y < area.y.saturating_add(area.height)
}

/// Index of the first rectangle in `cells` containing `(x, y)`.
pub fn hit_index(cells: &[Rect], x: u16, y: u16) -> Option<usize> {
    cells.iter().position(|cell| rect_contains(*cell, x, y))
}

/// Where a one-row-per-item list was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListGeometry {
    /// Inner area the rows occupy.
    pub rows: Rect,
    /// Index of the item on the first row.
    pub offset: usize,
    /// Number of items in the list.
    pub len: usize,
}

/// Part of a list row that was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListHit {
    /// The item text.
    Item(usize),
    /// The `✕` delete cell.
    Delete(usize),
}

/// Resolve a click inside a list.
///
/// Rows past the last item, and anything outside `geometry.rows`, miss.
pub fn detect_list_click(geometry: ListGeometry, x: u16, y: u16) -> Option<ListHit> {
    if !rect_contains(geometry.rows, x, y) {
        return None;
    }

    let index = geometry.offset + usize::from(y - geometry.rows.y);
    if index >= geometry.len {
        return None;
    }

    let right = geometry.rows.x + geometry.rows.width;
    if x >= right.saturating_sub(DELETE_CELL_WIDTH) {
        Some(ListHit::Delete(index))
    } else {
        Some(ListHit::Item(index))
    }
}

/// Rectangles of everything clickable, captured on the last draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    /// Search input box.
    pub search: Rect,
    /// Filter form pane.
    pub form: Rect,
    /// One row per rendered form field.
    pub form_rows: Vec<(FormField, Rect)>,
    /// History pane.
    pub history: Rect,
    /// History rows.
    pub history_list: ListGeometry,
    /// Favorites pane.
    pub favorites: Rect,
    /// Favorites rows.
    pub favorites_list: ListGeometry,
    /// Results pane.
    pub results: Rect,
    /// One rectangle per header cell, by column index. Columns that did not
    /// fit have an empty rectangle.
    pub header_cells: Vec<Rect>,
    /// Pagination buttons.
    pub page_buttons: Vec<(PageControl, Rect)>,
    /// Table generation the header cells belong to.
    pub generation: TableGeneration,
}

/// What a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseTarget {
    /// Results header cell.
    Header {
        /// Column index.
        column: usize,
        /// Table generation the cell was drawn for.
        generation: TableGeneration,
    },
    /// A pagination button.
    Page(PageControl),
    /// A history entry.
    HistoryItem(usize),
    /// A history entry's delete cell.
    HistoryDelete(usize),
    /// A favorite.
    FavoriteItem(usize),
    /// A favorite's delete cell.
    FavoriteDelete(usize),
    /// A form field row.
    Field(FormField),
    /// Elsewhere inside a pane.
    Pane(FocusPane),
    /// Outside every pane.
    Nothing,
}

/// Resolve `(x, y)` against the last drawn layout, most specific first.
pub fn detect_click(map: &HitMap, x: u16, y: u16) -> MouseTarget {
    if let Some(column) = hit_index(&map.header_cells, x, y) {
        return MouseTarget::Header {
            column,
            generation: map.generation,
        };
    }

    if let Some((control, _)) = map
        .page_buttons
        .iter()
        .find(|(_, area)| rect_contains(*area, x, y))
    {
        return MouseTarget::Page(*control);
    }

    match detect_list_click(map.history_list, x, y) {
        Some(ListHit::Item(i)) => return MouseTarget::HistoryItem(i),
        Some(ListHit::Delete(i)) => return MouseTarget::HistoryDelete(i),
        None => {}
    }

    match detect_list_click(map.favorites_list, x, y) {
        Some(ListHit::Item(i)) => return MouseTarget::FavoriteItem(i),
        Some(ListHit::Delete(i)) => return MouseTarget::FavoriteDelete(i),
        None => {}
    }

    if let Some((field, _)) = map
        .form_rows
        .iter()
        .find(|(_, area)| rect_contains(*area, x, y))
    {
        return MouseTarget::Field(*field);
    }

    let panes = [
        (map.search, FocusPane::Search),
        (map.form, FocusPane::Form),
        (map.history, FocusPane::History),
        (map.favorites, FocusPane::Favorites),
        (map.results, FocusPane::Results),
    ];
    panes
        .iter()
        .find(|(area, _)| rect_contains(*area, x, y))
        .map(|(_, pane)| MouseTarget::Pane(*pane))
        .unwrap_or(MouseTarget::Nothing)
}

// ===== Tests =====

#[cfg(test)]
#[path = "mouse_handler_tests.rs"]
mod tests;
