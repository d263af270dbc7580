//! Chapter strip shown above the reading panel

use std::ops::RangeInclusive;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::reader::Reader;
use crate::theme::Theme;

/// Chapters shown either side of the current one
pub const CHAPTER_RADIUS: u32 = 10;

/// Chapters to offer around `current`, clamped to `1..=count`
pub fn chapter_window(current: u32, count: u32) -> RangeInclusive<u32> {
    if count == 0 {
        return 1..=0;
    }
    let current = current.clamp(1, count);
    let start = current.saturating_sub(CHAPTER_RADIUS).max(1);
    let end = current.saturating_add(CHAPTER_RADIUS).min(count);
    start..=end
}

/// Draw the book name and nearby chapters
pub fn draw(frame: &mut Frame, area: Rect, reader: &Reader, theme: &Theme) {
    let Some(position) = reader.position() else {
        let hint = Paragraph::new(" Press b to choose a book")
            .style(Style::default().fg(theme.fg_muted).bg(theme.bg_secondary));
        frame.render_widget(hint, area);
        return;
    };

    let count = reader.chapter_count() as u32;
    let window = chapter_window(position.chapter, count);

    let mut spans = vec![Span::styled(
        format!(" {} ", position.book),
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
    )];
    if *window.start() > 1 {
        spans.push(Span::styled("‹ ", Style::default().fg(theme.fg_muted)));
    }
    for chapter in window.clone() {
        let style = if chapter == position.chapter {
            Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };
        spans.push(Span::styled(format!(" {chapter} "), style));
    }
    if *window.end() < count {
        spans.push(Span::styled(" ›", Style::default().fg(theme.fg_muted)));
    }

    let mode = reader.view().view_mode.label();
    let scroll = if reader.view().continuous_scroll { " · continuous" } else { "" };
    spans.push(Span::styled(format!("   {mode}{scroll}"), Style::default().fg(theme.fg_muted)));

    let strip = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg_secondary));
    frame.render_widget(strip, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centred_on_current() {
        assert_eq!(chapter_window(25, 50), 15..=35);
    }

    #[test]
    fn window_is_clamped_at_both_ends() {
        assert_eq!(chapter_window(3, 50), 1..=13);
        assert_eq!(chapter_window(48, 50), 38..=50);
        assert_eq!(chapter_window(1, 4), 1..=4);
    }

    #[test]
    fn empty_book_has_no_chapters() {
        assert!(chapter_window(1, 0).is_empty());
    }
}
