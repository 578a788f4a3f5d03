//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut groups: category, then (keys, description) pairs.
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Panes",
        &[
            ("Ctrl+b", "Focus search input"),
            ("Tab / Shift+Tab", "Cycle focus"),
            ("j/↓  k/↑", "Move selection"),
            ("h/←  l/→", "Change field / choose column"),
            ("Enter", "Search, or use selected item"),
        ],
    ),
    (
        "History & favorites",
        &[
            ("click", "Copy query / export favorite"),
            ("d / Delete / ✕", "Delete item"),
            ("r", "Refresh both lists"),
        ],
    ),
    (
        "Results",
        &[
            ("hold header", "Capture column"),
            ("c", "Capture selected column"),
            ("Home/{  End/}", "First / last page"),
            ("PgUp/[  PgDn/]", "Previous / next page"),
        ],
    ),
    (
        "Export",
        &[
            ("Ctrl+Shift+S", "Export captured values (busqueda.csv)"),
            ("s", "Save capture as favorite"),
        ],
    ),
    (
        "Application",
        &[("?", "Show help overlay"), ("q / Ctrl+c", "Quit")],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, palette: Palette) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    // Clear the background for the overlay
    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(palette))
        .block(
            Block::default()
                .title(" Atajos de teclado ")
                .borders(Borders::ALL)
                .border_style(palette.border(true)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1.min(popup_area.height),
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Esc o ? para cerrar ",
        palette.muted().add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content(palette: Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (category, entries)) in SHORTCUTS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, palette.section())));
        for (keys, description) in entries.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<18}"), palette.key()),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
