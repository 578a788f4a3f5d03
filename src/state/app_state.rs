//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. Transitions never
//! perform I/O: anything that needs the network or the filesystem is returned
//! as an [`Effect`] for the shell to carry out, and the outcome comes back
//! through [`AppState::apply_completion`] or one of the `on_*_exported`
//! methods.

use crate::client::{Completion, Request};
use crate::model::{
    sanitize_favorite_name, ExportError, Favorite, KeyAction, RequestError, ResultTable,
    SaveFavoriteRequest, SearchResponse,
};
use crate::state::capture::{CaptureBuffer, CaptureOutcome};
use crate::state::form::{FormFilterState, FormSnapshot};
use crate::state::mouse_handler::MouseTarget;
use crate::state::pagination::{PageControl, PaginationController};
use crate::state::prompt::{PromptOutcome, PromptPurpose, PromptState, PromptStep};
use crate::state::remote_list::{FavoritesPanel, HistoryPanel, ERROR_PLACEHOLDER};
use crate::state::table_events::{TableGeneration, TableReplaced, TableSubscriber};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

// ===== Effect =====

/// Side effect requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send a backend request.
    Request(Request),
    /// Write the capture buffer to `busqueda.csv`.
    ExportSession,
    /// Write a favorite's payload to `<nombre>.csv`.
    ExportFavorite(Favorite),
    /// Leave the application.
    Quit,
}

// ===== StatusMessage =====

/// Severity of a status bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Confirmation of something that worked.
    Info,
    /// Something failed.
    Error,
}

/// One-line message shown in the status bar until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Severity.
    pub kind: StatusKind,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// # Table replacement
///
/// A successful search bumps the [`TableGeneration`] and delivers a
/// [`TableReplaced`] event to the pagination controller and then the capture
/// buffer, after the history refresh for that search has been requested.
///
/// # Prompt
///
/// While [`AppState::prompt`] is `Some`, it owns keyboard input. Only the
/// export shortcut is handled before it.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Which pane currently has keyboard focus.
    pub focus: FocusPane,

    /// Search input and filter form.
    pub form: FormFilterState,

    /// Server history, most recent first as delivered.
    pub history: HistoryPanel,

    /// Saved favorites.
    pub favorites: FavoritesPanel,

    /// Table currently displayed, if any search has succeeded.
    table: Option<ResultTable>,

    /// Generation of `table`.
    generation: TableGeneration,

    /// Client-side pagination of `table`.
    pub pagination: PaginationController,

    /// Captured column values and queries.
    pub capture: CaptureBuffer,

    /// Column targeted by the keyboard capture key.
    pub selected_column: usize,

    /// Open prompt, if any.
    pub prompt: Option<PromptState>,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,

    /// Latest status bar message.
    pub status: Option<StatusMessage>,

    /// Whether a search is waiting for its response.
    pub search_pending: bool,

    /// `doc` parameter sent with every search.
    document: Option<String>,
}

impl AppState {
    /// Create new AppState with default UI state.
    pub fn new(page_size: usize, document: Option<String>) -> Self {
        Self {
            focus: FocusPane::Search,
            form: FormFilterState::new(),
            history: HistoryPanel::new(),
            favorites: FavoritesPanel::new(),
            table: None,
            generation: TableGeneration::initial(),
            pagination: PaginationController::new(page_size),
            capture: CaptureBuffer::new(),
            selected_column: 0,
            prompt: None,
            help_visible: false,
            status: None,
            search_pending: false,
            document,
        }
    }

    /// Requests issued once before the first frame.
    pub fn startup_effects(&self) -> Vec<Effect> {
        vec![
            Effect::Request(Request::FetchHistory),
            Effect::Request(Request::FetchFavorites),
        ]
    }

    /// Apply a `?query=..&strategy=..` initial state.
    ///
    /// Returns whether it was applied; a partial or invalid string leaves the
    /// form untouched.
    pub fn apply_params(&mut self, query_string: &str) -> bool {
        match FormSnapshot::from_query_string(query_string) {
            Some(snapshot) => {
                self.form.apply_snapshot(snapshot);
                true
            }
            None => {
                warn!(query_string, "ignoring incomplete initial parameters");
                false
            }
        }
    }

    /// Table currently displayed.
    pub fn table(&self) -> Option<&ResultTable> {
        self.table.as_ref()
    }

    /// Generation of the displayed table.
    pub fn generation(&self) -> TableGeneration {
        self.generation
    }

    // ===== Completions =====

    /// Fold a finished request into the state.
    pub fn apply_completion(&mut self, completion: Completion) -> Vec<Effect> {
        match completion {
            Completion::History(result) => {
                self.history.apply_fetch(result);
                Vec::new()
            }
            Completion::HistoryDeleted { query, result } => {
                match result {
                    Ok(()) => {
                        let removed = self.history.remove_key(&query);
                        debug!(%query, removed, "history entry deleted");
                    }
                    Err(error) => warn!(%query, %error, "history delete failed"),
                }
                Vec::new()
            }
            Completion::Favorites(result) => {
                self.favorites.apply_fetch(result);
                Vec::new()
            }
            Completion::FavoriteSaved(result) => self.on_favorite_saved(result),
            Completion::FavoriteDeleted { nombre, result } => {
                match result {
                    Ok(()) => {
                        self.favorites.remove_key(&nombre);
                        self.status = Some(StatusMessage::info(format!(
                            "Favorito \"{nombre}\" eliminado"
                        )));
                    }
                    Err(error) => warn!(%nombre, %error, "favorite delete failed"),
                }
                Vec::new()
            }
            Completion::Search(result) => self.on_search_finished(result),
        }
    }

    fn on_search_finished(&mut self, result: Result<SearchResponse, RequestError>) -> Vec<Effect> {
        self.search_pending = false;
        match result {
            Ok(response) => {
                // The refresh goes out before subscribers see the new table.
                let effects = vec![Effect::Request(Request::FetchHistory)];
                self.replace_table(response.table);
                effects
            }
            Err(error) => {
                warn!(%error, "search failed");
                self.status = Some(StatusMessage::error(ERROR_PLACEHOLDER));
                vec![Effect::Request(Request::FetchHistory)]
            }
        }
    }

    fn on_favorite_saved(&mut self, result: Result<(), RequestError>) -> Vec<Effect> {
        match result {
            Ok(()) => {
                self.capture.clear_queries();
                self.status = Some(StatusMessage::info("Favorito guardado"));
                vec![Effect::Request(Request::FetchFavorites)]
            }
            Err(error) => {
                error!(%error, "Error al guardar");
                self.status = Some(StatusMessage::error("Error al guardar"));
                Vec::new()
            }
        }
    }

    /// Display `table`, notifying pagination and then capture.
    ///
    /// A table without columns carries no results marker: its message is
    /// shown and both subscribers detach.
    pub fn replace_table(&mut self, table: ResultTable) {
        self.generation = self.generation.next();
        self.selected_column = 0;
        self.table = Some(table);

        let event = TableReplaced {
            generation: self.generation,
            table: self.table.as_ref().filter(|t| t.has_results_marker()),
        };
        self.pagination.on_table_replaced(&event);
        self.capture.on_table_replaced(&event);

        info!(
            generation = self.generation.get(),
            rows = self.table.as_ref().map_or(0, ResultTable::row_count),
            "table replaced"
        );
    }

    // ===== Search =====

    /// Submit the form. Blank queries are not sent.
    pub fn submit_search(&mut self) -> Vec<Effect> {
        if !self.form.search.has_content() {
            self.status = Some(StatusMessage::error("Escribe una búsqueda"));
            return Vec::new();
        }
        self.search_pending = true;
        self.status = None;
        let params = self.form.search_params(self.document.as_deref());
        vec![Effect::Request(Request::Search(params))]
    }

    /// Edit the search input. Returns whether the key was consumed.
    pub fn edit_search(&mut self, key: KeyEvent) -> bool {
        let input = &mut self.form.search;
        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                input.insert(ch);
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Left => input.cursor_left(),
            KeyCode::Right => input.cursor_right(),
            KeyCode::Home => input.cursor_home(),
            KeyCode::End => input.cursor_end(),
            _ => return false,
        }
        true
    }

    /// Type digits into the selected numeric form field. Returns whether the
    /// key was consumed.
    pub fn edit_form(&mut self, key: KeyEvent) -> bool {
        if !key.modifiers.is_empty() && key.modifiers != KeyModifiers::SHIFT {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) => self.form.push_digit(ch),
            KeyCode::Backspace => self.form.pop_digit(),
            _ => false,
        }
    }

    // ===== History & favorites =====

    /// Copy history entry `index` into the search input.
    pub fn select_history(&mut self, index: usize) {
        self.history.select(index);
        if let Some(entry) = self.history.get(index) {
            self.form.search.set_text(entry.query.trim());
        }
    }

    /// Request deletion of history entry `index`.
    pub fn delete_history(&mut self, index: usize) -> Vec<Effect> {
        match self.history.get(index) {
            Some(entry) => vec![Effect::Request(Request::DeleteHistory {
                query: entry.query.clone(),
            })],
            None => Vec::new(),
        }
    }

    /// Export favorite `index`.
    pub fn export_favorite(&mut self, index: usize) -> Vec<Effect> {
        self.favorites.select(index);
        match self.favorites.get(index) {
            Some(favorite) => vec![Effect::ExportFavorite(favorite.clone())],
            None => Vec::new(),
        }
    }

    /// Request deletion of favorite `index`.
    pub fn delete_favorite(&mut self, index: usize) -> Vec<Effect> {
        match self.favorites.get(index) {
            Some(favorite) => vec![Effect::Request(Request::DeleteFavorite {
                nombre: favorite.nombre.clone(),
            })],
            None => Vec::new(),
        }
    }

    // ===== Capture & pagination =====

    /// Pointer pressed on header `column` of the current table.
    pub fn press_header(&mut self, column: usize) -> CaptureOutcome {
        self.press_header_at(column, self.generation)
    }

    /// Pointer pressed on header `column` of the table drawn as `generation`.
    ///
    /// A press aimed at a table that has since been replaced captures nothing.
    pub fn press_header_at(&mut self, column: usize, generation: TableGeneration) -> CaptureOutcome {
        let Some(table) = self.table.as_ref() else {
            return CaptureOutcome::Detached;
        };
        if generation == self.generation {
            self.selected_column = column;
        }
        self.capture
            .press(table, generation, column, self.form.search.text())
    }

    /// Pointer released, anywhere.
    pub fn release_pointer(&mut self) -> bool {
        self.capture.release()
    }

    /// Keyboard capture of the selected column: press and release in one step.
    pub fn capture_selected_column(&mut self) -> CaptureOutcome {
        let outcome = self.press_header(self.selected_column);
        self.release_pointer();
        outcome
    }

    fn column_count(&self) -> usize {
        self.table
            .as_ref()
            .filter(|t| t.has_results_marker())
            .map_or(0, |t| t.columns.len())
    }

    fn move_column(&mut self, forward: bool) {
        let count = self.column_count();
        if count == 0 {
            return;
        }
        self.selected_column = if forward {
            (self.selected_column + 1).min(count - 1)
        } else {
            self.selected_column.saturating_sub(1)
        };
    }

    /// Apply a pagination control. No-op without a results table.
    pub fn page(&mut self, control: PageControl) -> bool {
        self.pagination.apply(control)
    }

    // ===== Export =====

    /// Record the outcome of a session export.
    pub fn on_session_exported(&mut self, result: Result<Option<PathBuf>, ExportError>) {
        self.status = Some(match result {
            Ok(Some(path)) => StatusMessage::info(format!("Exportado a {}", path.display())),
            Ok(None) => StatusMessage::info("No hay datos capturados"),
            Err(error) => {
                error!(%error, "session export failed");
                StatusMessage::error(error.to_string())
            }
        });
    }

    /// Record the outcome of a favorite export.
    pub fn on_favorite_exported(&mut self, result: Result<Option<PathBuf>, ExportError>) {
        match result {
            Ok(Some(path)) => {
                self.status = Some(StatusMessage::info(format!(
                    "Exportado a {}",
                    path.display()
                )));
            }
            Ok(None) => {}
            Err(error) => {
                error!(%error, "favorite export failed");
                self.status = Some(StatusMessage::error(error.to_string()));
            }
        }
    }

    // ===== Save favorite =====

    /// Open the naming prompt when there is something worth saving.
    ///
    /// Requires captured values and at least one recorded query. Rejected
    /// while a prompt is already open.
    pub fn begin_save_favorite(&mut self) -> bool {
        if self.prompt.is_some() {
            return false;
        }
        if self.capture.is_empty() || self.capture.queries().is_empty() {
            self.status = Some(StatusMessage::error("Nada que guardar"));
            return false;
        }
        self.prompt = Some(PromptState::new(PromptPurpose::NameFavorite));
        true
    }

    /// Feed a key to the open prompt.
    pub fn handle_prompt_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let Some(prompt) = self.prompt.as_mut() else {
            return Vec::new();
        };
        match prompt.handle_key(key) {
            PromptStep::Pending => Vec::new(),
            PromptStep::Resolved(outcome) => self.resolve_prompt(outcome),
        }
    }

    fn resolve_prompt(&mut self, outcome: PromptOutcome) -> Vec<Effect> {
        let Some(prompt) = self.prompt.take() else {
            return Vec::new();
        };
        match (prompt.purpose(), outcome) {
            (_, PromptOutcome::Cancelled) => Vec::new(),
            (PromptPurpose::NameFavorite, PromptOutcome::Confirmed(name)) => {
                // The buffer may have been exported while the prompt was open
                if self.capture.is_empty() || self.capture.queries().is_empty() {
                    self.status = Some(StatusMessage::error("Nada que guardar"));
                    return Vec::new();
                }
                let nombre = sanitize_favorite_name(&name);
                let request = SaveFavoriteRequest::new(
                    nombre,
                    &self.capture.flat_values(),
                    self.capture.queries(),
                );
                vec![Effect::Request(Request::SaveFavorite(request))]
            }
        }
    }

    // ===== Input routing =====

    /// Run a bound action.
    pub fn handle_action(&mut self, action: KeyAction) -> Vec<Effect> {
        match action {
            KeyAction::FocusSearch => {
                self.focus = FocusPane::Search;
                self.form.search.cursor_end();
            }
            KeyAction::CycleFocus => self.focus = self.focus.next(),
            KeyAction::CycleFocusBack => self.focus = self.focus.prev(),
            KeyAction::MoveUp => match self.focus {
                FocusPane::Form => self.form.select_prev(),
                FocusPane::History => self.history.select_prev(),
                FocusPane::Favorites => self.favorites.select_prev(),
                FocusPane::Search | FocusPane::Results => {}
            },
            KeyAction::MoveDown => match self.focus {
                FocusPane::Form => self.form.select_next(),
                FocusPane::History => self.history.select_next(),
                FocusPane::Favorites => self.favorites.select_next(),
                FocusPane::Search | FocusPane::Results => {}
            },
            KeyAction::MoveLeft => match self.focus {
                FocusPane::Form => self.form.adjust_selected(-1),
                FocusPane::Results => self.move_column(false),
                _ => {}
            },
            KeyAction::MoveRight => match self.focus {
                FocusPane::Form => self.form.adjust_selected(1),
                FocusPane::Results => self.move_column(true),
                _ => {}
            },
            KeyAction::Activate => match self.focus {
                FocusPane::Search | FocusPane::Form => return self.submit_search(),
                FocusPane::History => {
                    if let Some(index) = self.history.selected_index() {
                        self.select_history(index);
                        self.focus = FocusPane::Search;
                    }
                }
                FocusPane::Favorites => {
                    if let Some(index) = self.favorites.selected_index() {
                        return self.export_favorite(index);
                    }
                }
                FocusPane::Results => {}
            },
            KeyAction::Delete => match self.focus {
                FocusPane::History => {
                    if let Some(index) = self.history.selected_index() {
                        return self.delete_history(index);
                    }
                }
                FocusPane::Favorites => {
                    if let Some(index) = self.favorites.selected_index() {
                        return self.delete_favorite(index);
                    }
                }
                _ => {}
            },
            KeyAction::FirstPage => {
                self.page(PageControl::First);
            }
            KeyAction::PrevPage => {
                self.page(PageControl::Previous);
            }
            KeyAction::NextPage => {
                self.page(PageControl::Next);
            }
            KeyAction::LastPage => {
                self.page(PageControl::Last);
            }
            KeyAction::CaptureColumn => {
                self.capture_selected_column();
            }
            KeyAction::ExportSession => return vec![Effect::ExportSession],
            KeyAction::SaveFavorite => {
                self.begin_save_favorite();
            }
            KeyAction::Refresh => return self.startup_effects(),
            KeyAction::Help => self.help_visible = !self.help_visible,
            KeyAction::Quit => return vec![Effect::Quit],
        }
        Vec::new()
    }

    /// Pointer pressed on `target`.
    pub fn handle_mouse_down(&mut self, target: MouseTarget) -> Vec<Effect> {
        match target {
            MouseTarget::Header { column, generation } => {
                self.focus = FocusPane::Results;
                self.press_header_at(column, generation);
            }
            MouseTarget::Page(control) => {
                self.page(control);
            }
            MouseTarget::HistoryItem(index) => {
                self.focus = FocusPane::History;
                self.select_history(index);
            }
            MouseTarget::HistoryDelete(index) => {
                self.focus = FocusPane::History;
                return self.delete_history(index);
            }
            MouseTarget::FavoriteItem(index) => {
                self.focus = FocusPane::Favorites;
                return self.export_favorite(index);
            }
            MouseTarget::FavoriteDelete(index) => {
                self.focus = FocusPane::Favorites;
                return self.delete_favorite(index);
            }
            MouseTarget::Field(field) => {
                self.focus = FocusPane::Form;
                self.form.select(field);
            }
            MouseTarget::Pane(pane) => self.focus = pane,
            MouseTarget::Nothing => {}
        }
        Vec::new()
    }
}

// ===== FocusPane =====

/// Which pane has focus. Sum type - exactly one.
///
/// Tab cycles Search → Form → History → Favorites → Results → Search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    /// Search input; printable keys are typed into it.
    Search,
    /// Filter form.
    Form,
    /// History list.
    History,
    /// Favorites list.
    Favorites,
    /// Results table.
    Results,
}

impl FocusPane {
    /// Cycle order.
    pub const ORDER: [FocusPane; 5] = [
        FocusPane::Search,
        FocusPane::Form,
        FocusPane::History,
        FocusPane::Favorites,
        FocusPane::Results,
    ];

    fn position(self) -> usize {
        FocusPane::ORDER
            .iter()
            .position(|p| *p == self)
            .unwrap_or(0)
    }

    /// Next pane in the cycle.
    pub fn next(self) -> Self {
        FocusPane::ORDER[(self.position() + 1) % FocusPane::ORDER.len()]
    }

    /// Previous pane in the cycle.
    pub fn prev(self) -> Self {
        let len = FocusPane::ORDER.len();
        FocusPane::ORDER[(self.position() + len - 1) % len]
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
