//! Main reading screen: book picker, chapter strip and reading panel

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use super::{books, command_line, content, navigator};
use crate::app::state::{AppState, Panel};
use crate::reader::Reader;
use crate::theme::Theme;

/// Width of the book picker
const BOOKS_WIDTH: u16 = 24;

/// Draw the main reading screen
pub fn draw(frame: &mut Frame, state: &mut AppState, reader: &mut Reader, theme: &Theme) {
    let area = frame.area();

    // Split vertically: chapter strip, main area and command line
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let strip_area = vertical_chunks[0];
    let main_area = vertical_chunks[1];
    let command_area = vertical_chunks[2];

    navigator::draw(frame, strip_area, reader, theme);

    let chunks = create_layout(main_area, state);
    let mut panel_index = 0;

    if state.books.visible {
        let current = reader.position().map(|p| p.book.clone());
        books::draw(
            frame,
            chunks[panel_index],
            &mut state.books,
            reader.catalog(),
            current.as_deref(),
            theme,
            state.focused_panel == Panel::Books,
        );
        panel_index += 1;
    }

    let focused = state.focused_panel == Panel::Content;
    content::draw(frame, chunks[panel_index], state, reader, theme, focused);

    // Draw command line at bottom
    let book = reader.position().map(|p| p.book.as_str());
    command_line::draw(frame, command_area, &state.command_line, book, theme);
}

/// Create the layout constraints based on visible panels
fn create_layout(area: Rect, state: &AppState) -> Vec<Rect> {
    let mut constraints = Vec::new();

    if state.books.visible {
        constraints.push(Constraint::Length(BOOKS_WIDTH.min(area.width / 2)));
    }

    // Content panel: flexible
    constraints.push(Constraint::Min(30));

    Layout::default().direction(Direction::Horizontal).constraints(constraints).split(area).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::BookPickerState;

    #[test]
    fn layout_with_book_picker() {
        let area = Rect::new(0, 0, 120, 40);
        let state = AppState {
            books: BookPickerState { visible: true, ..Default::default() },
            ..Default::default()
        };

        let chunks = create_layout(area, &state);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].width, BOOKS_WIDTH);
    }

    #[test]
    fn layout_with_content_only() {
        let area = Rect::new(0, 0, 80, 40);
        let chunks = create_layout(area, &AppState::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].width, 80);
    }
}
