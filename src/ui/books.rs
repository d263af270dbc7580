//! Book picker component

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::BookPickerState;
use crate::bible::BookIndex;
use crate::theme::Theme;

/// Books matching the picker's filter
pub fn visible_books(catalog: &BookIndex, picker: &BookPickerState) -> Vec<&'static str> {
    catalog.filter(&picker.filter)
}

/// Draw the book picker
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    picker: &mut BookPickerState,
    catalog: &BookIndex,
    current: Option<&str>,
    theme: &Theme,
    focused: bool,
) {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let block = Block::default()
        .title(" Books ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut list_area = inner;
    if !picker.filter.is_empty() {
        let filter = Paragraph::new(Line::from(vec![
            Span::styled("/", Style::default().fg(theme.info)),
            Span::styled(picker.filter.clone(), Style::default().fg(theme.fg_secondary)),
        ]));
        frame.render_widget(filter, Rect { height: 1, ..inner });
        list_area = Rect { y: inner.y + 1, height: inner.height.saturating_sub(1), ..inner };
    }

    // Update visible height for scroll calculations
    picker.visible_height = list_area.height as usize;

    let books = visible_books(catalog, picker);
    if books.is_empty() {
        let msg = Paragraph::new(format!("No book matches \"{}\"", picker.filter))
            .style(Style::default().fg(theme.fg_muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, list_area);
        return;
    }
    picker.selected_index = picker.selected_index.min(books.len() - 1);

    let lines: Vec<Line> = books
        .iter()
        .enumerate()
        .skip(picker.scroll_offset)
        .take(list_area.height as usize)
        .map(|(i, name)| {
            let style = if i == picker.selected_index && focused {
                Style::default()
                    .fg(theme.bg_primary)
                    .bg(theme.accent_primary)
                    .add_modifier(Modifier::BOLD)
            } else if current == Some(*name) {
                // Currently open book (but not selected)
                Style::default().fg(theme.accent_secondary)
            } else {
                Style::default().fg(theme.fg_primary)
            };
            Line::from(Span::styled(format!(" {name}"), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), list_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_lists_every_book() {
        let picker = BookPickerState::default();
        assert_eq!(visible_books(&BookIndex::canonical(), &picker).len(), 66);
    }

    #[test]
    fn filter_narrows_list() {
        let picker = BookPickerState { filter: "john".into(), ..Default::default() };
        assert_eq!(
            visible_books(&BookIndex::canonical(), &picker),
            vec!["John", "1 John", "2 John", "3 John"]
        );
    }
}
