//! Results pane: header cells, the visible page, pagination and the capture
//! summary.
//!
//! Cells are placed by hand rather than through a table widget so that the
//! rectangles handed to mouse hit-testing are exactly where text was drawn.

use crate::model::ResultTable;
use crate::state::{AppState, HoldState, PageControl, PaginationState};
use crate::view::constants::{
    COLUMN_MAX_WIDTH, COLUMN_MIN_WIDTH, COLUMN_SPACING, RESULTS_FOOTER_HEIGHT,
};
use crate::view::styles::Palette;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

/// Shown before the first search.
pub const NO_SEARCH_MESSAGE: &str = "Escribe una búsqueda y pulsa Enter.";
/// Shown while a search is in flight.
pub const SEARCHING_MESSAGE: &str = "Buscando...";

/// Clickable rectangles drawn by [`render_results`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsGeometry {
    /// Header cell per column.
    pub header_cells: Vec<Rect>,
    /// Pagination buttons.
    pub page_buttons: Vec<(PageControl, Rect)>,
}

/// Width of each column, fitted to `available` columns.
///
/// Natural width is the widest of the header and the cells of `rows`, within
/// [`COLUMN_MIN_WIDTH`]..=[`COLUMN_MAX_WIDTH`]. Columns past the edge get
/// whatever is left, possibly zero.
pub fn column_widths(table: &ResultTable, rows: Range<usize>, available: u16) -> Vec<u16> {
    let mut used: u16 = 0;
    table
        .columns
        .iter()
        .enumerate()
        .map(|(column, header)| {
            let natural = rows
                .clone()
                .map(|row| table.cell(row, column).width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
                .clamp(usize::from(COLUMN_MIN_WIDTH), usize::from(COLUMN_MAX_WIDTH))
                as u16;

            let spacing = if column == 0 { 0 } else { COLUMN_SPACING };
            let width = natural.min(available.saturating_sub(used.saturating_add(spacing)));
            used = used.saturating_add(spacing).saturating_add(width);
            width
        })
        .collect()
}

/// Cell rectangles for one row at `row.y`, left to right.
pub fn cell_rects(row: Rect, widths: &[u16]) -> Vec<Rect> {
    let mut x = row.x;
    widths
        .iter()
        .enumerate()
        .map(|(column, width)| {
            if column > 0 {
                x = x.saturating_add(COLUMN_SPACING);
            }
            let cell = Rect::new(x, row.y, *width, 1);
            x = x.saturating_add(*width);
            cell
        })
        .collect()
}

/// Layout of `<< < Página X de Y > >>` on `bar`.
///
/// Returns the four buttons and the indicator rectangle.
pub fn pagination_layout(bar: Rect, indicator: &str) -> (Vec<(PageControl, Rect)>, Rect) {
    let mut x = bar.x;
    let mut place = |width: u16| {
        let area = Rect::new(x, bar.y, width, 1).intersection(bar);
        x = x.saturating_add(width + 1);
        area
    };

    let first = place(2);
    let previous = place(1);
    let indicator_area = place(indicator.width() as u16);
    let next = place(1);
    let last = place(2);

    (
        vec![
            (PageControl::First, first),
            (PageControl::Previous, previous),
            (PageControl::Next, next),
            (PageControl::Last, last),
        ],
        indicator_area,
    )
}

fn control_enabled(state: &PaginationState, control: PageControl) -> bool {
    let last = state.total_pages().saturating_sub(1);
    match control {
        PageControl::First | PageControl::Previous => state.current_page() > 0,
        PageControl::Next | PageControl::Last => state.current_page() < last,
    }
}

fn header_style(state: &AppState, column: usize, focused: bool, palette: Palette) -> Style {
    match state.capture.hold_state() {
        HoldState::Holding { column: held } if held == column => palette.held_header(),
        _ if focused && state.selected_column == column => palette.selected_header(),
        _ => palette.header(),
    }
}

/// Render the results pane.
pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    focused: bool,
    palette: Palette,
) -> ResultsGeometry {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Resultados ")
        .border_style(palette.border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let footer_height = RESULTS_FOOTER_HEIGHT.min(inner.height);
    let body = Rect {
        height: inner.height - footer_height,
        ..inner
    };
    let pagination_bar = Rect::new(inner.x, body.y + body.height, inner.width, 1).intersection(inner);
    let summary = Rect::new(inner.x, body.y + body.height + 1, inner.width, 1).intersection(inner);

    render_capture_summary(frame, summary, state, palette);

    let table = state.table();
    let message = match table {
        _ if state.search_pending => Some(SEARCHING_MESSAGE.to_string()),
        None => Some(NO_SEARCH_MESSAGE.to_string()),
        Some(t) if !t.has_results_marker() => Some(if t.msg.is_empty() {
            "Sin resultados.".to_string()
        } else {
            t.msg.clone()
        }),
        Some(_) => None,
    };
    if let Some(message) = message {
        frame.render_widget(Paragraph::new(Line::styled(message, palette.muted())), body);
        return ResultsGeometry::default();
    }
    let Some(table) = table else {
        return ResultsGeometry::default();
    };

    let rows = state.pagination.visible_rows();
    let widths = column_widths(table, rows.clone(), body.width);
    let header_row = Rect { height: 1, ..body };
    let header_cells = cell_rects(header_row, &widths);

    let buf = frame.buffer_mut();
    for (column, (label, cell)) in table.columns.iter().zip(&header_cells).enumerate() {
        if cell.width == 0 || body.height == 0 {
            continue;
        }
        let style = header_style(state, column, focused, palette);
        buf.set_style(*cell, style);
        buf.set_stringn(cell.x, cell.y, label, usize::from(cell.width), style);
    }

    let body_rows = body.height.saturating_sub(1);
    for (line, row) in rows.take(usize::from(body_rows)).enumerate() {
        let y = body.y + 1 + line as u16;
        let row_rect = Rect { y, height: 1, ..body };
        for (column, cell) in cell_rects(row_rect, &widths).into_iter().enumerate() {
            if cell.width == 0 {
                continue;
            }
            buf.set_stringn(
                cell.x,
                cell.y,
                table.cell(row, column),
                usize::from(cell.width),
                Style::default(),
            );
        }
    }

    let page_buttons = match state.pagination.state() {
        Some(pagination) => render_pagination(frame, pagination_bar, pagination, palette),
        None => Vec::new(),
    };

    ResultsGeometry {
        header_cells: if body.height == 0 { Vec::new() } else { header_cells },
        page_buttons,
    }
}

fn render_pagination(
    frame: &mut Frame,
    bar: Rect,
    pagination: &PaginationState,
    palette: Palette,
) -> Vec<(PageControl, Rect)> {
    if bar.height == 0 {
        return Vec::new();
    }
    let indicator = pagination.indicator();
    let (buttons, indicator_area) = pagination_layout(bar, &indicator);

    let buf = frame.buffer_mut();
    for (control, area) in &buttons {
        let style = if control_enabled(pagination, *control) {
            palette.key()
        } else {
            palette.muted()
        };
        buf.set_stringn(area.x, area.y, control.label(), usize::from(area.width), style);
    }
    buf.set_stringn(
        indicator_area.x,
        indicator_area.y,
        &indicator,
        usize::from(indicator_area.width),
        Style::default(),
    );

    buttons
}

fn render_capture_summary(frame: &mut Frame, area: Rect, state: &AppState, palette: Palette) {
    if area.height == 0 {
        return;
    }
    let capture = &state.capture;
    let export_style = if capture.export_enabled() {
        palette.key()
    } else {
        palette.muted()
    };
    let line = Line::from(vec![
        Span::raw(format!("Capturados: {}", capture.item_count())),
        Span::styled(" · ", palette.muted()),
        Span::raw(capture.size_display()),
        Span::styled(" · ", palette.muted()),
        Span::styled("Ctrl+Shift+S exportar", export_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
