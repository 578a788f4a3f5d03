//! Filter form pane.

use crate::state::{FormField, FormFilterState};
use crate::view::styles::Palette;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Lines the form needs for its current visible fields, borders included.
pub fn form_height(form: &FormFilterState) -> u16 {
    form.visible_fields().len() as u16 + 2
}

fn field_value(form: &FormFilterState, field: FormField) -> String {
    match field {
        FormField::Strategy => format!("< {} >", form.strategy()),
        FormField::Sex => form.sex().label().to_string(),
        FormField::AgeMin => form.age_min().to_string(),
        FormField::AgeMax => form.age_max().to_string(),
        FormField::Neighbors => form.neighbors().to_string(),
        FormField::Weights => {
            let slider = form.slider();
            format!("FTS {} / {} Semántica", slider.value1(), slider.value2())
        }
    }
}

/// Render the form and return the row of each drawn field.
///
/// Hidden fields take no row.
pub fn render_form(
    frame: &mut Frame,
    area: Rect,
    form: &FormFilterState,
    focused: bool,
    palette: Palette,
) -> Vec<(FormField, Rect)> {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filtros ")
        .border_style(palette.border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut rows = Vec::new();
    for (i, field) in form.visible_fields().into_iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let row = Rect::new(inner.x, y, inner.width, 1);

        let style = if focused && form.selected() == field {
            palette.selection()
        } else {
            ratatui::style::Style::default()
        };
        let line = Line::from(vec![
            Span::styled(format!("{}: ", field.label()), palette.muted()),
            Span::raw(field_value(form, field)),
        ])
        .style(style);
        frame.render_widget(Paragraph::new(line), row);
        rows.push((field, row));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SearchStrategy;
    use crate::view::styles::ColorConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(form: &FormFilterState) -> (String, Vec<(FormField, Rect)>) {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let mut rows = Vec::new();
        terminal
            .draw(|frame| {
                rows = render_form(
                    frame,
                    frame.area(),
                    form,
                    true,
                    Palette::new(ColorConfig::enabled()),
                );
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        let text = buf.content().iter().map(|c| c.symbol()).collect();
        (text, rows)
    }

    #[test]
    fn fts_hides_neighbors_and_slider() {
        let form = FormFilterState::new();
        let (text, rows) = draw(&form);
        assert!(text.contains("Estrategia"));
        assert!(!text.contains("Vecinos"));
        assert!(!text.contains("Balance"));
        assert_eq!(rows.len(), 4);
        assert_eq!(form_height(&form), 6);
    }

    #[test]
    fn rrf_shows_linked_weights() {
        let mut form = FormFilterState::new();
        form.set_strategy(SearchStrategy::ReciprocalRankFusion);
        form.set_slider(30);
        let (text, rows) = draw(&form);
        assert!(text.contains("FTS 30 / 70"));
        assert!(text.contains("Vecinos"));
        assert_eq!(rows.last().map(|(f, _)| *f), Some(FormField::Weights));
    }
}
