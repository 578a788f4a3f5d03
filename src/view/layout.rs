//! Screen layout.
//!
//! Search bar on top, the filter form with history and favorites on the
//! left, results on the right, status bar at the bottom. Overlays (prompt,
//! help) are drawn last.

use crate::state::{AppState, FocusPane, HitMap, StatusKind};
use crate::view::constants::{SEARCH_INPUT_HEIGHT, SIDEBAR_WIDTH_PERCENT, STATUS_BAR_HEIGHT};
use crate::view::form::{form_height, render_form};
use crate::view::help::render_help_overlay;
use crate::view::lists::render_list;
use crate::view::prompt::render_prompt;
use crate::view::results::render_results;
use crate::view::search_input::SearchBar;
use crate::view::styles::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Top-level screen areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Search bar.
    pub search: Rect,
    /// Filter form.
    pub form: Rect,
    /// History list.
    pub history: Rect,
    /// Favorites list.
    pub favorites: Rect,
    /// Results table.
    pub results: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split `area` for the current state.
///
/// The form is exactly as tall as its visible fields; history and favorites
/// share what remains of the left column.
pub fn calculate_areas(area: Rect, state: &AppState) -> ScreenAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(SIDEBAR_WIDTH_PERCENT),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form_height(&state.form)),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(horizontal[0]);

    ScreenAreas {
        search: vertical[0],
        form: sidebar[0],
        history: sidebar[1],
        favorites: sidebar[2],
        results: horizontal[1],
        status: vertical[2],
    }
}

/// Render every pane and overlay, returning where clickable things went.
pub fn render_layout(frame: &mut Frame, state: &AppState, palette: Palette) -> HitMap {
    let areas = calculate_areas(frame.area(), state);
    let focus = state.focus;

    frame.render_widget(
        SearchBar::new(&state.form.search, palette).focused(focus == FocusPane::Search),
        areas.search,
    );

    let form_rows = render_form(
        frame,
        areas.form,
        &state.form,
        focus == FocusPane::Form,
        palette,
    );
    let history_list = render_list(
        frame,
        areas.history,
        "Historial",
        &state.history,
        focus == FocusPane::History,
        palette,
    );
    let favorites_list = render_list(
        frame,
        areas.favorites,
        "Favoritos",
        &state.favorites,
        focus == FocusPane::Favorites,
        palette,
    );
    let results = render_results(
        frame,
        areas.results,
        state,
        focus == FocusPane::Results,
        palette,
    );

    render_status_bar(frame, areas.status, state, palette);

    if state.help_visible {
        render_help_overlay(frame, palette);
    }
    if let Some(prompt) = &state.prompt {
        render_prompt(frame, prompt, palette);
    }

    HitMap {
        search: areas.search,
        form: areas.form,
        form_rows,
        history: areas.history,
        history_list,
        favorites: areas.favorites,
        favorites_list,
        results: areas.results,
        header_cells: results.header_cells,
        page_buttons: results.page_buttons,
        generation: state.generation(),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: Palette) {
    let line = match &state.status {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Info => palette.info(),
                StatusKind::Error => palette.error(),
            };
            Line::from(Span::styled(status.text.clone(), style))
        }
        None => Line::from(vec![
            Span::styled("?", palette.key()),
            Span::styled(" ayuda  ", palette.muted()),
            Span::styled("Tab", palette.key()),
            Span::styled(" cambiar panel  ", palette.muted()),
            Span::styled("q", palette.key()),
            Span::styled(" salir", palette.muted()),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
