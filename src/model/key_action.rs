//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that key bindings map to.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by
/// [`KeyBindings`](crate::config::KeyBindings). Directional actions are
/// interpreted by whichever pane has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Focus
    /// Focus the search input. Default: Ctrl+b
    FocusSearch,
    /// Cycle focus forward: Search → Form → History → Favorites → Results. Default: Tab
    CycleFocus,
    /// Cycle focus backward. Default: Shift+Tab
    CycleFocusBack,

    // Directional, per focused pane
    /// History/favorites: previous item. Form: previous field. Default: k/↑
    MoveUp,
    /// History/favorites: next item. Form: next field. Default: j/↓
    MoveDown,
    /// Form: decrease value. Results: previous column. Default: h/←
    MoveLeft,
    /// Form: increase value. Results: next column. Default: l/→
    MoveRight,
    /// History: copy query into the search input. Favorites: export. Default: Enter
    Activate,
    /// History/favorites: delete selected item. Default: d/Delete
    Delete,

    // Pagination
    /// Jump to the first page. Default: Home/{
    FirstPage,
    /// Previous page, clamped at the first. Default: PageUp/[
    PrevPage,
    /// Next page, clamped at the last. Default: PageDown/]
    NextPage,
    /// Jump to the last page. Default: End/}
    LastPage,

    // Capture and export
    /// Capture the selected results column (press + release). Default: c
    CaptureColumn,
    /// Export the capture buffer as `busqueda.csv`. Default: Ctrl+Shift+s
    ExportSession,
    /// Name and save the capture buffer as a favorite. Default: s
    SaveFavorite,

    // Application
    /// Refetch history and favorites. Default: r
    Refresh,
    /// Toggle the keyboard shortcut overlay. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether this action must win over every other key handler, including
    /// an open prompt and the search input.
    pub fn is_global_priority(&self) -> bool {
        matches!(self, KeyAction::ExportSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_export_has_global_priority() {
        assert!(KeyAction::ExportSession.is_global_priority());
        assert!(!KeyAction::FocusSearch.is_global_priority());
        assert!(!KeyAction::CaptureColumn.is_global_priority());
        assert!(!KeyAction::Quit.is_global_priority());
    }
}
