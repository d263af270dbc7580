//! Fragment to terminal lines
//!
//! Applies the palette, the font override and word wrapping to a rendered
//! [`Fragment`]. Font size narrows the reading column, font family maps to a
//! text modifier.

use std::ops::Range;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use textwrap::Options;

use crate::bible::highlight_ranges;
use crate::theme::Theme;
use crate::view::{Fragment, Header, HeaderKind, Row, TextStyle, VerseRun};

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Verse number as superscript digits
pub fn superscript(number: u32) -> String {
    number
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| SUPERSCRIPT_DIGITS[d as usize]))
        .collect()
}

/// Lay a fragment out in `width` columns
pub fn fragment_lines(fragment: &Fragment, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for row in &fragment.rows {
        match row {
            Row::Header(header) => render_header(&mut lines, header, theme, width),
            Row::Boxed(run) => render_boxed(&mut lines, run, theme, width),
            Row::Plain(run) => render_plain(&mut lines, run, theme, width),
            Row::Paragraph(runs) => render_paragraph(&mut lines, runs, theme, width),
        }
    }

    lines
}

/// Reading column for a style: its width and the left margin centring it
fn column(style: TextStyle, width: usize) -> (usize, String) {
    let text_width = style.font_size.text_width(width);
    (text_width, " ".repeat((width - text_width) / 2))
}

fn text_style(style: TextStyle, theme: &Theme) -> Style {
    Style::default().fg(theme.fg_primary).add_modifier(style.font_family.modifier())
}

fn number_style(theme: &Theme) -> Style {
    Style::default().fg(theme.verse_number).add_modifier(Modifier::BOLD)
}

fn render_header(lines: &mut Vec<Line<'static>>, header: &Header, theme: &Theme, width: usize) {
    let title_style = Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD);
    let chapter = format!("Chapter {}", header.chapter);

    if header.kind == HeaderKind::NewBook {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "─".repeat(width.min(48)),
            Style::default().fg(theme.border),
        ))
        .centered());
    }

    lines.push(Line::from(""));
    if header.shows_book() {
        lines.push(Line::from(Span::styled(header.book.to_uppercase(), title_style)).centered());
    }

    let chapter_style = match header.kind {
        HeaderKind::Chapter => title_style,
        HeaderKind::Continuation => Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
        HeaderKind::Book | HeaderKind::NewBook => Style::default().fg(theme.fg_secondary),
    };
    lines.push(Line::from(Span::styled(chapter, chapter_style)).centered());
    lines.push(Line::from(""));
}

/// Wrap `text` after a styled verse-number prefix; continuation lines are
/// indented to line up with the text
fn numbered_lines(
    run: &VerseRun,
    theme: &Theme,
    width: usize,
) -> Vec<Vec<Span<'static>>> {
    let prefix = format!("{} ", run.number);
    let indent = " ".repeat(prefix.chars().count());
    let options = Options::new(width.max(prefix.len() + 1))
        .initial_indent(&prefix)
        .subsequent_indent(&indent);
    let style = text_style(run.style, theme);

    textwrap::wrap(&run.text, options)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let (lead, lead_style) =
                if i == 0 { (&prefix, number_style(theme)) } else { (&indent, Style::default()) };
            let rest = line.strip_prefix(lead.as_str()).unwrap_or(line.as_ref()).to_string();
            vec![Span::styled(lead.clone(), lead_style), Span::styled(rest, style)]
        })
        .collect()
}

fn render_boxed(lines: &mut Vec<Line<'static>>, run: &VerseRun, theme: &Theme, width: usize) {
    let (text_width, margin) = column(run.style, width);
    let inner = text_width.saturating_sub(4);
    let border = Style::default().fg(theme.border);

    lines.push(Line::from(vec![
        Span::raw(margin.clone()),
        Span::styled(format!("┌{}┐", "─".repeat(inner + 2)), border),
    ]));
    for spans in numbered_lines(run, theme, inner) {
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let mut line = vec![Span::raw(margin.clone()), Span::styled("│ ", border)];
        line.extend(spans);
        line.push(Span::raw(" ".repeat(inner.saturating_sub(used))));
        line.push(Span::styled(" │", border));
        lines.push(Line::from(line));
    }
    lines.push(Line::from(vec![
        Span::raw(margin),
        Span::styled(format!("└{}┘", "─".repeat(inner + 2)), border),
    ]));
}

fn render_plain(lines: &mut Vec<Line<'static>>, run: &VerseRun, theme: &Theme, width: usize) {
    let (text_width, margin) = column(run.style, width);
    for spans in numbered_lines(run, theme, text_width) {
        let mut line = vec![Span::raw(margin.clone())];
        line.extend(spans);
        lines.push(Line::from(line));
    }
}

fn render_paragraph(lines: &mut Vec<Line<'static>>, runs: &[VerseRun], theme: &Theme, width: usize) {
    let Some(first) = runs.first() else {
        return;
    };
    let (text_width, margin) = column(first.style, width);

    let mut spans = Vec::with_capacity(runs.len() * 2);
    for (i, run) in runs.iter().enumerate() {
        let lead = if i == 0 { "" } else { " " };
        spans.push(Span::styled(format!("{lead}{}", superscript(run.number)), number_style(theme)));
        spans.push(Span::styled(run.text.clone(), text_style(run.style, theme)));
    }

    for line in wrap_spans(spans, text_width) {
        let mut with_margin = vec![Span::raw(margin.clone())];
        with_margin.extend(line.spans);
        lines.push(Line::from(with_margin));
    }
    lines.push(Line::from(""));
}

/// Split `text` into spans, styling the `ranges` with `highlight`
pub fn highlight_spans(
    text: &str,
    ranges: &[Range<usize>],
    base: Style,
    highlight: Style,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for range in ranges {
        if range.start > cursor {
            spans.push(Span::styled(text[cursor..range.start].to_string(), base));
        }
        spans.push(Span::styled(text[range.clone()].to_string(), highlight));
        cursor = range.end;
    }
    if cursor < text.len() {
        spans.push(Span::styled(text[cursor..].to_string(), base));
    }

    spans
}

/// A verse text with every occurrence of `query` highlighted, wrapped
pub fn highlighted_lines(
    text: &str,
    query: &str,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let base = Style::default().fg(theme.fg_primary);
    let highlight = Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg);
    let spans = highlight_spans(text, &highlight_ranges(text, query), base, highlight);
    wrap_spans(spans, width)
}

/// Wrap styled spans into lines while preserving formatting
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![Line::from(spans)];
    }

    let mut lines = Vec::new();
    let mut current_line: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for span in spans {
        let style = span.style;

        for word in span.content.split_inclusive(char::is_whitespace) {
            let word_len = word.chars().count();

            if current_width + word_len > width && current_width > 0 {
                // Start new line
                lines.push(Line::from(std::mem::take(&mut current_line)));
                current_width = 0;
            }

            current_line.push(Span::styled(word.to_string(), style));
            current_width += word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(Line::from(current_line));
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::Verse;
    use crate::view::{FontSize, ViewMode, render, render_with_header};
    use pretty_assertions::assert_eq;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn verses() -> Vec<Verse> {
        vec![
            Verse::new(1, "In the beginning God created the heaven and the earth."),
            Verse::new(2, "And the earth was without form, and void."),
        ]
    }

    #[test]
    fn superscript_digits() {
        assert_eq!(superscript(1), "¹");
        assert_eq!(superscript(150), "¹⁵⁰");
    }

    #[test]
    fn plain_lines_start_with_verse_number() {
        let fragment = render(&verses(), ViewMode::Plain, TextStyle::default());
        let lines = fragment_lines(&fragment, &Theme::default(), 80);
        assert_eq!(lines.len(), 2);
        assert!(text_of(&lines[0]).trim_start().starts_with("1 In the beginning"));
        assert!(text_of(&lines[1]).trim_start().starts_with("2 And the earth"));
    }

    #[test]
    fn plain_wraps_with_hanging_indent() {
        let fragment = render(&verses(), ViewMode::Plain, TextStyle::default());
        let lines = fragment_lines(&fragment, &Theme::default(), 24);
        assert!(lines.len() > 2);
        assert!(text_of(&lines[1]).starts_with("  "));
        for line in &lines {
            assert!(line.width() <= 24, "{:?} is too wide", text_of(line));
        }
    }

    #[test]
    fn boxed_verses_are_framed() {
        let fragment = render(&verses()[..1], ViewMode::Boxed, TextStyle::default());
        let lines = fragment_lines(&fragment, &Theme::default(), 40);
        assert!(text_of(&lines[0]).contains('┌'));
        assert!(text_of(lines.last().unwrap()).contains('└'));
        let widths: Vec<_> = lines.iter().map(Line::width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "ragged box: {widths:?}");
    }

    #[test]
    fn continuous_runs_verses_together() {
        let fragment = render(&verses(), ViewMode::Continuous, TextStyle::default());
        let lines = fragment_lines(&fragment, &Theme::default(), 200);
        let first = text_of(&lines[0]);
        assert!(first.contains("¹In the beginning"));
        assert!(first.contains("earth. ²And the earth"));
    }

    #[test]
    fn larger_font_narrows_column() {
        let small = TextStyle { font_size: FontSize::Small, ..TextStyle::default() };
        let large = TextStyle { font_size: FontSize::ExtraLarge, ..TextStyle::default() };
        let lines_small = fragment_lines(&render(&verses(), ViewMode::Plain, small), &Theme::default(), 40);
        let lines_large = fragment_lines(&render(&verses(), ViewMode::Plain, large), &Theme::default(), 40);
        assert!(lines_large.len() > lines_small.len());
    }

    #[test]
    fn new_book_header_has_divider_and_title() {
        let fragment = render_with_header(
            Header::new_book("Exodus", 1),
            &verses(),
            ViewMode::Plain,
            TextStyle::default(),
        );
        let texts: Vec<_> = fragment_lines(&fragment, &Theme::default(), 60).iter().map(text_of).collect();
        assert!(texts.iter().any(|t| t.contains('─')));
        assert!(texts.iter().any(|t| t == "EXODUS"));
        assert!(texts.iter().any(|t| t == "Chapter 1"));
    }

    #[test]
    fn continuation_header_omits_book() {
        let fragment = render_with_header(
            Header::continuation("Ruth", 2),
            &verses(),
            ViewMode::Plain,
            TextStyle::default(),
        );
        let texts: Vec<_> = fragment_lines(&fragment, &Theme::default(), 60).iter().map(text_of).collect();
        assert!(!texts.iter().any(|t| t == "RUTH"));
        assert!(texts.iter().any(|t| t == "Chapter 2"));
    }

    #[test]
    fn highlights_every_occurrence() {
        let theme = Theme::default();
        let lines = highlighted_lines("Light, and more light", "light", &theme, 80);
        let highlighted: Vec<_> = lines[0]
            .spans
            .iter()
            .filter(|s| s.style.bg == Some(theme.highlight_bg))
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(highlighted, vec!["Light", "light"]);
    }
}
