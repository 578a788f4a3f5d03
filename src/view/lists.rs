//! History and favorites panes.

use crate::state::mouse_handler::{ListGeometry, DELETE_CELL_WIDTH};
use crate::state::remote_list::{Keyed, RemoteList};
use crate::view::styles::Palette;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Index of the first row drawn so that `selected` stays visible.
pub fn scroll_offset(selected: Option<usize>, visible_rows: u16) -> usize {
    let visible = usize::from(visible_rows.max(1));
    selected.map_or(0, |s| (s + 1).saturating_sub(visible))
}

/// Render `list` under `title` and return where its rows went.
///
/// Each row is the item label followed by a `✕` delete cell. A list with a
/// placeholder (loading, error, empty) draws that instead and has no rows.
pub fn render_list<T: Keyed>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    list: &RemoteList<T>,
    focused: bool,
    palette: Palette,
) -> ListGeometry {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(palette.border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(placeholder) = list.placeholder() {
        frame.render_widget(
            Paragraph::new(Line::styled(placeholder, palette.muted())),
            inner,
        );
        return ListGeometry {
            rows: inner,
            offset: 0,
            len: 0,
        };
    }

    let offset = scroll_offset(list.selected_index(), inner.height);
    let label_width = inner.width.saturating_sub(DELETE_CELL_WIDTH);
    let buf = frame.buffer_mut();

    for (row, (index, item)) in list
        .items()
        .iter()
        .enumerate()
        .skip(offset)
        .take(usize::from(inner.height))
        .enumerate()
    {
        let y = inner.y + row as u16;
        let style = if focused && list.selected_index() == Some(index) {
            palette.selection()
        } else {
            Style::default()
        };
        buf.set_style(Rect::new(inner.x, y, label_width, 1), style);
        buf.set_stringn(
            inner.x,
            y,
            item.key().trim(),
            usize::from(label_width.saturating_sub(1)),
            style,
        );
        if inner.width >= DELETE_CELL_WIDTH {
            buf.set_stringn(
                inner.x + label_width,
                y,
                " ✕ ",
                usize::from(DELETE_CELL_WIDTH),
                palette.error(),
            );
        }
    }

    ListGeometry {
        rows: inner,
        offset,
        len: list.items().len(),
    }
}
