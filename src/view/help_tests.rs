//! Tests for help overlay widget

use super::*;
use crate::view::styles::ColorConfig;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

fn render(width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|frame| {
            render_help_overlay(frame, Palette::new(ColorConfig::enabled()));
        })
        .unwrap();

    buffer_to_string(terminal.backend().buffer())
}

#[test]
fn render_help_overlay_shows_centered_modal() {
    let rendered = render(80, 24);
    assert!(
        rendered.contains('┌') && rendered.contains('┐'),
        "Help overlay should render a bordered box"
    );
    assert!(rendered.contains("Atajos de teclado"));
}

#[test]
fn render_help_overlay_lists_export_shortcut() {
    let rendered = render(100, 40);
    assert!(
        rendered.contains("Ctrl+Shift+S"),
        "Should show the session export shortcut"
    );
    assert!(rendered.contains("busqueda.csv"));
}

#[test]
fn render_help_overlay_lists_focus_and_capture() {
    let rendered = render(100, 40);
    assert!(rendered.contains("Ctrl+b"));
    assert!(rendered.contains("Capture column"));
}

#[test]
fn render_help_overlay_shows_dismiss_hint() {
    let rendered = render(80, 30);
    assert!(rendered.contains("para cerrar"));
}

#[test]
fn render_help_overlay_survives_tiny_terminal() {
    let rendered = render(5, 2);
    assert!(rendered.len() >= 10);
}

#[test]
fn centered_rect_is_centered() {
    let area = Rect::new(0, 0, 100, 50);
    let popup = centered_rect(70, 80, area);
    assert_eq!(popup, Rect::new(15, 5, 70, 40));
}
