//! Reading panel: the chapter document or search results

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::verses::{fragment_lines, highlighted_lines};
use crate::app::state::AppState;
use crate::bible::SearchHit;
use crate::reader::Reader;
use crate::scroll::{BlockExtent, Document};
use crate::theme::Theme;

/// Footer shown while chapters are being preloaded
pub const LOADING_MESSAGE: &str = "Loading more content...";

/// Draw the content panel
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    reader: &mut Reader,
    theme: &Theme,
    focused: bool,
) {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let title = match (&state.search.results, reader.position()) {
        (Some(_), _) => format!(" Search: {} ", state.search.query),
        (None, Some(position)) => format!(" {} ", position),
        (None, None) => " Lectio ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Reserve 1 column for scrollbar
    let content_width = inner.width.saturating_sub(2) as usize;
    let content_area =
        Rect { x: inner.x, y: inner.y, width: inner.width.saturating_sub(1), height: inner.height };
    let scrollbar_x = inner.x + inner.width.saturating_sub(1);
    let visible_height = inner.height as usize;

    if let Some(hits) = &state.search.results {
        let lines = search_result_lines(hits, &state.search.query, theme, content_width);
        let max = lines.len().saturating_sub(visible_height / 2);
        state.search.scroll_offset = state.search.scroll_offset.min(max);
        let offset = state.search.scroll_offset;
        let total = lines.len();
        let visible: Vec<Line> = lines.into_iter().skip(offset).take(visible_height).collect();
        frame.render_widget(Paragraph::new(visible), content_area);
        draw_scrollbar(frame, scrollbar_x, inner.y, inner.height, offset, total, theme);
        return;
    }

    if reader.document().is_empty() {
        match &state.load_error {
            Some(error) => draw_error(frame, inner, error, theme),
            None => draw_welcome(frame, inner, theme),
        }
        return;
    }

    let (mut lines, extents) = document_lines(reader.document(), theme, content_width);
    reader.document_mut().set_extents(extents);

    if reader.is_loading() {
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                LOADING_MESSAGE,
                Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC),
            ))
            .centered(),
        );
    }

    // Update state with content metrics for scroll clamping
    let total_lines = lines.len();
    state.content.total_lines = total_lines;
    state.content.visible_height = visible_height;

    // Clamp scroll offset
    state.content.clamp_scroll();
    let scroll_offset = state.content.scroll_offset;
    let visible_lines: Vec<Line> =
        lines.into_iter().skip(scroll_offset).take(visible_height).collect();

    frame.render_widget(Paragraph::new(visible_lines), content_area);

    // Draw scrollbar
    draw_scrollbar(frame, scrollbar_x, inner.y, inner.height, scroll_offset, total_lines, theme);
}

/// Lay out every block of the document, recording where each one lands
pub fn document_lines(
    document: &Document,
    theme: &Theme,
    width: usize,
) -> (Vec<Line<'static>>, Vec<BlockExtent>) {
    let mut lines = Vec::new();
    let mut extents = Vec::with_capacity(document.len());

    for block in document.blocks() {
        let block_lines = fragment_lines(&block.fragment, theme, width);
        extents.push(BlockExtent { top: lines.len(), height: block_lines.len() });
        lines.extend(block_lines);
    }

    (lines, extents)
}

/// Lines for a list of search hits
pub fn search_result_lines(
    hits: &[SearchHit],
    query: &str,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    if hits.is_empty() {
        return vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No results found for \"{}\"", query),
                Style::default().fg(theme.fg_muted),
            ))
            .centered(),
        ];
    }

    let mut lines = vec![Line::from(Span::styled(
        format!(" {} result{}", hits.len(), if hits.len() == 1 { "" } else { "s" }),
        Style::default().fg(theme.fg_muted),
    ))];

    for hit in hits {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" Chapter {}, Verse {}", hit.chapter, hit.verse),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )));
        for line in highlighted_lines(&hit.text, query, theme, width.saturating_sub(2)) {
            let mut spans = vec![Span::raw(" ")];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
    }

    lines
}

/// Draw a scrollbar indicator
fn draw_scrollbar(
    frame: &mut Frame,
    x: u16,
    y: u16,
    height: u16,
    scroll_offset: usize,
    total_lines: usize,
    theme: &Theme,
) {
    if total_lines == 0 || height == 0 {
        return;
    }

    let height = height as usize;

    // Calculate thumb size and position
    let visible_ratio = (height as f64 / total_lines as f64).min(1.0);
    let thumb_height = ((height as f64 * visible_ratio).ceil() as usize).max(1);

    // Calculate max scroll position to avoid division by zero
    let max_scroll = total_lines.saturating_sub(height / 2);
    let scroll_ratio = if total_lines <= height || max_scroll == 0 {
        0.0
    } else {
        (scroll_offset as f64 / max_scroll as f64).min(1.0)
    };
    let thumb_top = ((height - thumb_height) as f64 * scroll_ratio).round() as usize;

    // Draw track and thumb
    for i in 0..height {
        let on_thumb = i >= thumb_top && i < thumb_top + thumb_height;
        let (ch, style) = if on_thumb {
            ("█", Style::default().fg(theme.accent_secondary))
        } else {
            ("░", Style::default().fg(theme.bg_tertiary))
        };

        frame.render_widget(
            Paragraph::new(ch).style(style),
            Rect { x, y: y.saturating_add(i as u16), width: 1, height: 1 },
        );
    }
}

/// Draw why the last load failed
fn draw_error(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Could not load this book",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Style::default().fg(theme.fg_muted))),
        Line::from(""),
        Line::from(Span::styled(
            "Check the source in config.json, or press b to pick another book",
            Style::default().fg(theme.fg_muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

/// Draw the welcome message when no book is loaded
fn draw_welcome(frame: &mut Frame, area: Rect, theme: &Theme) {
    let muted = Style::default().fg(theme.fg_muted);
    let welcome = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to Lectio",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Getting Started:", Style::default().fg(theme.fg_primary))),
        Line::from(""),
        Line::from(Span::styled("  1. Press b and pick a book", muted)),
        Line::from(Span::styled("  2. Scroll with j/k, change chapter with h/l", muted)),
        Line::from(Span::styled("  3. Press c for continuous scrolling", muted)),
        Line::from(Span::styled("  4. Press ? for help", muted)),
    ];

    let content = Paragraph::new(welcome).wrap(Wrap { trim: true });
    frame.render_widget(content, area);
}
