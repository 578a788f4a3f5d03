//! Search input widget for rendering the search bar.

use crate::state::SearchInput;
use crate::view::styles::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered single-line text input.
///
/// Also used inside the naming prompt, with a one-line area and no border.
pub struct SearchBar<'a> {
    input: &'a SearchInput,
    title: &'a str,
    focused: bool,
    palette: Palette,
    borderless: bool,
}

impl<'a> SearchBar<'a> {
    /// Create new bar over `input`.
    pub fn new(input: &'a SearchInput, palette: Palette) -> Self {
        Self {
            input,
            title: " Búsqueda (Ctrl+B) ",
            focused: false,
            palette,
            borderless: false,
        }
    }

    /// Set the block title.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Show the cursor and the focused border.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Render without a block.
    pub fn borderless(mut self) -> Self {
        self.borderless = true;
        self
    }

    fn line(&self) -> Line<'static> {
        let text = self.input.text();
        if !self.focused {
            return Line::from(text.to_string());
        }

        let cursor = self.input.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut after = text.chars().skip(cursor);
        let cursor_char = after.next().map(String::from).unwrap_or_else(|| " ".into());
        let rest: String = after.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(cursor_char, self.palette.cursor()),
            Span::raw(rest),
        ])
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = self.line();
        let mut paragraph = Paragraph::new(line);
        if !self.borderless {
            paragraph = paragraph.block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title)
                    .border_style(self.palette.border(self.focused)),
            );
        }
        paragraph.render(area, buf);
    }
}
