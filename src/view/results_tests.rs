//! Tests for results pane geometry and rendering.

use super::*;
use crate::view::styles::ColorConfig;
use ratatui::{backend::TestBackend, Terminal};

fn table(rows: usize) -> ResultTable {
    ResultTable::new(
        vec!["id".into(), "nombre".into()],
        (0..rows).map(|i| vec![i.to_string(), format!("p{i}")]).collect(),
    )
}

fn draw(state: &AppState) -> (Vec<String>, ResultsGeometry) {
    let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();
    let mut geometry = ResultsGeometry::default();
    terminal
        .draw(|frame| {
            geometry = render_results(
                frame,
                frame.area(),
                state,
                true,
                Palette::new(ColorConfig::enabled()),
            );
        })
        .unwrap();
    let buf = terminal.backend().buffer();
    let rows: Vec<String> = (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect();
    (rows, geometry)
}

// ===== Geometry =====

#[test]
fn widths_fit_header_and_cells() {
    let t = ResultTable::new(
        vec!["a".into(), "descripcion".into()],
        vec![vec!["12345".into(), "x".into()]],
    );
    assert_eq!(column_widths(&t, 0..1, 80), vec![5, 11]);
}

#[test]
fn widths_are_clamped() {
    let t = ResultTable::new(vec!["a".into()], vec![vec!["x".repeat(100)]]);
    assert_eq!(column_widths(&t, 0..1, 80), vec![COLUMN_MAX_WIDTH]);
    assert_eq!(column_widths(&t, 0..0, 80), vec![COLUMN_MIN_WIDTH]);
}

#[test]
fn columns_past_the_edge_shrink_to_zero() {
    let t = ResultTable::new(
        vec!["aaaaa".into(), "bbbbb".into(), "ccccc".into()],
        Vec::new(),
    );
    assert_eq!(column_widths(&t, 0..0, 8), vec![5, 2, 0]);
}

#[test]
fn cell_rects_include_spacing() {
    let cells = cell_rects(Rect::new(10, 2, 40, 1), &[3, 4]);
    assert_eq!(cells, vec![Rect::new(10, 2, 3, 1), Rect::new(14, 2, 4, 1)]);
}

#[test]
fn pagination_layout_places_buttons_around_indicator() {
    let (buttons, indicator) = pagination_layout(Rect::new(0, 5, 40, 1), "Página 1 de 3");
    assert_eq!(buttons[0], (PageControl::First, Rect::new(0, 5, 2, 1)));
    assert_eq!(buttons[1], (PageControl::Previous, Rect::new(3, 5, 1, 1)));
    assert_eq!(indicator, Rect::new(5, 5, 13, 1));
    assert_eq!(buttons[2], (PageControl::Next, Rect::new(19, 5, 1, 1)));
    assert_eq!(buttons[3], (PageControl::Last, Rect::new(21, 5, 2, 1)));
}

// ===== Rendering =====

#[test]
fn no_table_shows_hint_and_no_hit_areas() {
    let state = AppState::new(10, None);
    let (rows, geometry) = draw(&state);
    assert!(rows.iter().any(|r| r.contains("Escribe una búsqueda")));
    assert_eq!(geometry, ResultsGeometry::default());
    assert!(rows.iter().any(|r| r.contains("Capturados: 0")));
}

#[test]
fn table_without_columns_shows_server_message() {
    let mut state = AppState::new(10, None);
    state.replace_table(ResultTable {
        msg: "No se encontraron ningun registro.".into(),
        ..Default::default()
    });
    let (rows, geometry) = draw(&state);
    assert!(rows.iter().any(|r| r.contains("No se encontraron")));
    assert!(geometry.page_buttons.is_empty());
}

#[test]
fn last_page_of_23_rows_shows_rows_20_to_22() {
    let mut state = AppState::new(10, None);
    state.replace_table(table(23));
    state.page(PageControl::Last);

    let (rows, geometry) = draw(&state);
    let text = rows.join("\n");

    assert!(text.contains("p20"));
    assert!(text.contains("p22"));
    assert!(!text.contains("p19"));
    assert!(text.contains("Página 3 de 3"));
    assert_eq!(geometry.header_cells.len(), 2);
    assert_eq!(geometry.page_buttons.len(), 4);
}

#[test]
fn header_cells_hit_the_drawn_labels() {
    let mut state = AppState::new(10, None);
    state.replace_table(table(3));

    let (rows, geometry) = draw(&state);
    let cell = geometry.header_cells[1];
    let drawn: String = rows[usize::from(cell.y)]
        .chars()
        .skip(usize::from(cell.x))
        .take(usize::from(cell.width))
        .collect();
    assert_eq!(drawn, "nombre");
}

#[test]
fn capture_summary_reflects_buffer() {
    let mut state = AppState::new(10, None);
    state.replace_table(table(3));
    state.press_header(0);
    state.release_pointer();

    let (rows, _) = draw(&state);
    assert!(rows.iter().any(|r| r.contains("Capturados: 3")));
    assert!(rows.iter().any(|r| r.contains("KB")));
}
