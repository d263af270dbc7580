//! Help overlay listing keys and commands

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::Theme;

const KEYS: &[(&str, &str)] = &[
    ("j/k", "Scroll down/up"),
    ("d/u", "Page down/up"),
    ("g/G", "Top/bottom"),
    ("h/l", "Previous/next chapter"),
    ("v", "Cycle view mode"),
    ("+/-", "Font size"),
    ("f", "Cycle font"),
    ("t", "Cycle theme"),
    ("c", "Toggle continuous scrolling"),
    ("b", "Book picker"),
    ("/", "Search this book (filters the picker when it has focus)"),
    ("Esc", "Close search or picker"),
];

const COMMANDS: &[(&str, &str)] = &[
    (":book <name>", "Open a book"),
    (":chapter <n>", "Go to a chapter"),
    (":view <boxed|plain|continuous>", "Layout"),
    (":font-size <rem>", "0.9, 1.0, 1.2 or 1.4"),
    (":font <serif|sans|mono|custom>", "Verse face"),
    (":theme <name>", "light, sepia, dark, black, tan, gray"),
    (":scroll <on|off>", "Continuous scrolling"),
    (":books", "Book picker"),
    (":q", "Quit"),
];

/// Draw the help overlay centred in the frame
pub fn draw(frame: &mut Frame, theme: &Theme) {
    let area = centered(frame.area(), 64, (KEYS.len() + COMMANDS.len() + 7) as u16);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let heading = Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled("Keys", heading))];
    lines.extend(KEYS.iter().map(|(key, what)| entry(key, what, 8, theme)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Commands", heading)));
    lines.extend(COMMANDS.iter().map(|(cmd, what)| entry(cmd, what, 32, theme)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press any key to close", Style::default().fg(theme.fg_muted))));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn entry(key: &str, what: &str, width: usize, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<width$}"), Style::default().fg(theme.info)),
        Span::styled(what.to_string(), Style::default().fg(theme.fg_primary)),
    ])
}

/// A `width` x `height` rect centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
