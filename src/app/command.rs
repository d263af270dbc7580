//! Command parsing for the command line

use crate::view::{FontFamily, FontSize, ViewMode};

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a book: :book <name>
    Book(String),
    /// Jump to a chapter of the current book: :chapter <n>
    Chapter(u32),
    /// Switch layout: :view <boxed|plain|continuous>
    View(ViewMode),
    /// Set reading size: :font-size <rem>
    FontSize(FontSize),
    /// Set verse face: :font <serif|sans|mono|custom>
    Font(FontFamily),
    /// Select a palette: :theme <name>
    Theme(String),
    /// Continuous scrolling: :scroll <on|off>
    Scroll(bool),
    /// Open the book picker: :books
    Books,
    /// Quit the application: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument present but not understood
    InvalidArgument { command: String, argument: String },
}

fn invalid(command: &str, argument: &str) -> ParseResult {
    ParseResult::InvalidArgument { command: command.to_string(), argument: argument.to_string() }
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    // Split into command and arguments
    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    let name = cmd.to_lowercase();
    let takes_argument = matches!(
        name.as_str(),
        "book" | "b" | "chapter" | "c" | "view" | "v" | "font-size" | "fs" | "font" | "f"
            | "theme" | "t" | "scroll" | "s"
    );
    if takes_argument && args.is_empty() {
        return ParseResult::MissingArgument(name);
    }

    match name.as_str() {
        "book" | "b" => ParseResult::Ok(Command::Book(args.to_string())),
        "chapter" | "c" => match args.parse::<u32>() {
            Ok(n) if n > 0 => ParseResult::Ok(Command::Chapter(n)),
            _ => invalid("chapter", args),
        },
        "view" | "v" => {
            let mode = match args.to_lowercase().as_str() {
                "box" => Some(ViewMode::Boxed),
                "book" => Some(ViewMode::Continuous),
                other => ViewMode::from_key(other),
            };
            mode.map_or_else(|| invalid("view", args), |m| ParseResult::Ok(Command::View(m)))
        }
        "font-size" | "fs" => match args.trim_end_matches("rem").parse::<f64>() {
            Ok(rem) if rem.is_finite() && rem > 0.0 => {
                ParseResult::Ok(Command::FontSize(FontSize::nearest(rem)))
            }
            _ => invalid("font-size", args),
        },
        "font" | "f" => FontFamily::from_key(args)
            .map_or_else(|| invalid("font", args), |f| ParseResult::Ok(Command::Font(f))),
        "theme" | "t" => ParseResult::Ok(Command::Theme(args.to_string())),
        "scroll" | "s" => match args.to_lowercase().as_str() {
            "on" | "true" | "yes" => ParseResult::Ok(Command::Scroll(true)),
            "off" | "false" | "no" => ParseResult::Ok(Command::Scroll(false)),
            _ => invalid("scroll", args),
        },
        "books" | "ls" => ParseResult::Ok(Command::Books),
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert!(matches!(parse_command("q"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_command("quit"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_command("Q"), ParseResult::Ok(Command::Quit)));
    }

    #[test]
    fn parse_help_command() {
        assert!(matches!(parse_command("help"), ParseResult::Ok(Command::Help)));
        assert!(matches!(parse_command("?"), ParseResult::Ok(Command::Help)));
    }

    #[test]
    fn parse_book_keeps_spaces() {
        match parse_command("book Song of Solomon") {
            ParseResult::Ok(Command::Book(name)) => assert_eq!(name, "Song of Solomon"),
            other => panic!("Expected Book command, got {other:?}"),
        }
    }

    #[test]
    fn parse_book_missing_arg() {
        assert!(matches!(parse_command("book"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_chapter_number() {
        assert!(matches!(parse_command("chapter 12"), ParseResult::Ok(Command::Chapter(12))));
        assert!(matches!(parse_command("chapter 0"), ParseResult::InvalidArgument { .. }));
        assert!(matches!(parse_command("c twelve"), ParseResult::InvalidArgument { .. }));
    }

    #[test]
    fn parse_view_accepts_labels() {
        assert!(matches!(parse_command("view plain"), ParseResult::Ok(Command::View(ViewMode::Plain))));
        assert!(matches!(parse_command("view box"), ParseResult::Ok(Command::View(ViewMode::Boxed))));
        assert!(matches!(
            parse_command("view book"),
            ParseResult::Ok(Command::View(ViewMode::Continuous))
        ));
        assert!(matches!(parse_command("view grid"), ParseResult::InvalidArgument { .. }));
    }

    #[test]
    fn parse_font_size_snaps() {
        assert!(matches!(
            parse_command("font-size 1.15"),
            ParseResult::Ok(Command::FontSize(FontSize::Large))
        ));
        assert!(matches!(
            parse_command("fs 0.9rem"),
            ParseResult::Ok(Command::FontSize(FontSize::Small))
        ));
        assert!(matches!(parse_command("fs huge"), ParseResult::InvalidArgument { .. }));
    }

    #[test]
    fn parse_font_family() {
        assert!(matches!(parse_command("font mono"), ParseResult::Ok(Command::Font(FontFamily::Mono))));
        assert!(matches!(parse_command("font comic"), ParseResult::InvalidArgument { .. }));
    }

    #[test]
    fn parse_scroll_toggle() {
        assert!(matches!(parse_command("scroll on"), ParseResult::Ok(Command::Scroll(true))));
        assert!(matches!(parse_command("scroll OFF"), ParseResult::Ok(Command::Scroll(false))));
        assert!(matches!(parse_command("scroll"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(parse_command("unknown"), ParseResult::UnknownCommand(_)));
    }

    #[test]
    fn parse_empty_is_nop() {
        assert!(matches!(parse_command(""), ParseResult::Ok(Command::Nop)));
        assert!(matches!(parse_command("   "), ParseResult::Ok(Command::Nop)));
    }
}
