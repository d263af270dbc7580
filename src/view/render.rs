//! Verse renderer
//!
//! Rendering is a pure mapping from a verse list, a [`ViewMode`] and a
//! [`TextStyle`] to a [`Fragment`]: a layout-level description of what to
//! draw. Colors and wrapping are applied later by the terminal view, so a
//! fragment stays valid across resizes and theme changes, and font changes
//! only need [`Fragment::restyle`].

use crate::bible::Verse;

use super::style::{TextStyle, ViewMode};

/// What a header announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// Book title plus chapter (first chapter of a book)
    Book,
    /// Chapter number only
    Chapter,
    /// Lightweight sub-header for an appended chapter of the same book
    Continuation,
    /// Divider, book title and chapter for an appended chapter of a new book
    NewBook,
}

/// Header shown above a chapter's verses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub kind: HeaderKind,
    pub book: String,
    pub chapter: u32,
}

impl Header {
    /// Header for a directly selected chapter: the book title is only
    /// repeated on chapter 1
    pub fn for_chapter(book: impl Into<String>, chapter: u32) -> Self {
        let kind = if chapter == 1 { HeaderKind::Book } else { HeaderKind::Chapter };
        Self { kind, book: book.into(), chapter }
    }

    /// Header for a chapter appended after another chapter of the same book
    pub fn continuation(book: impl Into<String>, chapter: u32) -> Self {
        Self { kind: HeaderKind::Continuation, book: book.into(), chapter }
    }

    /// Header for a chapter that starts a new book mid-scroll
    pub fn new_book(book: impl Into<String>, chapter: u32) -> Self {
        Self { kind: HeaderKind::NewBook, book: book.into(), chapter }
    }

    /// Whether the book title is shown
    pub fn shows_book(&self) -> bool {
        matches!(self.kind, HeaderKind::Book | HeaderKind::NewBook)
    }
}

/// A verse with its inline style override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRun {
    pub number: u32,
    pub text: String,
    pub style: TextStyle,
}

/// One layout row of a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Header(Header),
    /// A verse in its own box
    Boxed(VerseRun),
    /// A verse on its own line
    Plain(VerseRun),
    /// Verses run together, numbers as superscript markers
    Paragraph(Vec<VerseRun>),
}

/// Rendered chapter content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Layout the fragment was rendered with
    pub mode: ViewMode,
    /// Rows in display order
    pub rows: Vec<Row>,
}

impl Fragment {
    /// The header row, if the fragment has one
    pub fn header(&self) -> Option<&Header> {
        self.rows.iter().find_map(|row| match row {
            Row::Header(header) => Some(header),
            _ => None,
        })
    }

    /// Every verse in the fragment, in order
    pub fn verses(&self) -> impl Iterator<Item = &VerseRun> {
        self.rows.iter().flat_map(|row| match row {
            Row::Header(_) => (&[] as &[VerseRun]).iter(),
            Row::Boxed(run) | Row::Plain(run) => std::slice::from_ref(run).iter(),
            Row::Paragraph(runs) => runs.iter(),
        })
    }

    /// Apply a new font override to already-rendered verses
    pub fn restyle(&mut self, style: TextStyle) {
        for row in &mut self.rows {
            match row {
                Row::Header(_) => {}
                Row::Boxed(run) | Row::Plain(run) => run.style = style,
                Row::Paragraph(runs) => runs.iter_mut().for_each(|run| run.style = style),
            }
        }
    }
}

/// Render verses without a header
pub fn render(verses: &[Verse], mode: ViewMode, style: TextStyle) -> Fragment {
    let runs = verses.iter().map(|v| VerseRun { number: v.number, text: v.text.clone(), style });

    let rows = match mode {
        ViewMode::Boxed => runs.map(Row::Boxed).collect(),
        ViewMode::Plain => runs.map(Row::Plain).collect(),
        ViewMode::Continuous => {
            let runs: Vec<_> = runs.collect();
            if runs.is_empty() { Vec::new() } else { vec![Row::Paragraph(runs)] }
        }
    };

    Fragment { mode, rows }
}

/// Render verses below `header`
pub fn render_with_header(
    header: Header,
    verses: &[Verse],
    mode: ViewMode,
    style: TextStyle,
) -> Fragment {
    let mut fragment = render(verses, mode, style);
    fragment.rows.insert(0, Row::Header(header));
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::style::{FontFamily, FontSize};
    use pretty_assertions::assert_eq;

    fn verses() -> Vec<Verse> {
        vec![
            Verse::new(1, "In the beginning God created the heaven and the earth."),
            Verse::new(2, "And the earth was without form, and void;"),
            Verse::new(3, "And God said, Let there be light: and there was light."),
        ]
    }

    #[test]
    fn boxed_wraps_each_verse() {
        let fragment = render(&verses(), ViewMode::Boxed, TextStyle::default());
        assert_eq!(fragment.rows.len(), 3);
        assert!(fragment.rows.iter().all(|r| matches!(r, Row::Boxed(_))));
    }

    #[test]
    fn plain_has_one_row_per_verse() {
        let fragment = render(&verses(), ViewMode::Plain, TextStyle::default());
        assert_eq!(fragment.rows.len(), 3);
        assert!(matches!(&fragment.rows[1], Row::Plain(run) if run.number == 2));
    }

    #[test]
    fn continuous_runs_verses_together() {
        let fragment = render(&verses(), ViewMode::Continuous, TextStyle::default());
        assert_eq!(fragment.rows.len(), 1);
        assert!(matches!(&fragment.rows[0], Row::Paragraph(runs) if runs.len() == 3));
    }

    /// Verse numbers and texts, independent of layout
    fn verse_content(fragment: &Fragment) -> Vec<(u32, &str)> {
        fragment.verses().map(|run| (run.number, run.text.as_str())).collect()
    }

    #[test]
    fn continuous_with_no_verses_is_empty() {
        let fragment = render(&[], ViewMode::Continuous, TextStyle::default());
        assert!(fragment.rows.is_empty());
    }

    #[test]
    fn switching_mode_and_back_is_idempotent() {
        let style = TextStyle::default();
        let original = render(&verses(), ViewMode::Boxed, style);
        for other in [ViewMode::Plain, ViewMode::Continuous] {
            let switched = render(&verses(), other, style);
            assert_eq!(verse_content(&switched), verse_content(&original));
            assert_eq!(render(&verses(), ViewMode::Boxed, style), original);
        }
    }

    #[test]
    fn chapter_one_header_shows_book() {
        let header = Header::for_chapter("Genesis", 1);
        assert_eq!(header.kind, HeaderKind::Book);
        assert!(header.shows_book());

        let header = Header::for_chapter("Genesis", 2);
        assert_eq!(header.kind, HeaderKind::Chapter);
        assert!(!header.shows_book());
    }

    #[test]
    fn header_comes_first() {
        let fragment = render_with_header(
            Header::continuation("Genesis", 2),
            &verses(),
            ViewMode::Plain,
            TextStyle::default(),
        );
        assert!(matches!(fragment.rows[0], Row::Header(_)));
        assert_eq!(fragment.header().map(|h| h.chapter), Some(2));
        assert_eq!(fragment.verses().count(), 3);
    }

    #[test]
    fn restyle_updates_every_verse_in_place() {
        let mut fragment = render(&verses(), ViewMode::Continuous, TextStyle::default());
        let style = TextStyle { font_size: FontSize::ExtraLarge, font_family: FontFamily::Mono };
        fragment.restyle(style);
        assert!(fragment.verses().all(|run| run.style == style));
        assert_eq!(verse_content(&fragment).len(), 3);
    }
}
