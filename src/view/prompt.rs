//! Naming prompt overlay.

use crate::state::PromptState;
use crate::view::constants::{PROMPT_HEIGHT, PROMPT_WIDTH};
use crate::view::search_input::SearchBar;
use crate::view::styles::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Shown under the input while it is flagged.
pub const BLANK_NAME_HINT: &str = "El nombre no puede estar vacío";

/// Fixed-size rectangle centered in `area`, shrunk to fit.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render `prompt` centered over whatever is below it.
///
/// A flagged (blank) input gets a red border and a hint line.
pub fn render_prompt(frame: &mut Frame, prompt: &PromptState, palette: Palette) {
    let popup = centered_fixed(PROMPT_WIDTH, PROMPT_HEIGHT, frame.area());
    frame.render_widget(Clear, popup);

    let border_style = if prompt.is_invalid() {
        palette.error()
    } else {
        palette.border(true)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", prompt.purpose().title()))
        .border_style(border_style);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.height == 0 {
        return;
    }

    let input_area = Rect { height: 1, ..inner };
    frame.render_widget(
        SearchBar::new(prompt.input(), palette)
            .focused(true)
            .borderless(),
        input_area,
    );

    if prompt.is_invalid() && inner.height > 2 {
        let hint_area = Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        };
        frame.render_widget(
            Paragraph::new(Line::styled(BLANK_NAME_HINT, palette.error())),
            hint_area,
        );
    }

    let buttons_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };
    let buttons = Line::from(vec![
        Span::styled("Enter", palette.key()),
        Span::raw(" Aceptar   "),
        Span::styled("Esc", palette.key()),
        Span::raw(" Cancelar"),
    ]);
    frame.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        buttons_area,
    );
}
