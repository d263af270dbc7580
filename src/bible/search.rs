//! Verse search within a single book

use std::ops::Range;

use regex::RegexBuilder;
use serde::Serialize;

use super::model::Book;

/// A verse that matched a search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Chapter number
    pub chapter: u32,
    /// Verse number
    pub verse: u32,
    /// Full verse text
    pub text: String,
}

/// Case-insensitive substring search over every verse of `book`.
///
/// Results are in document order; an empty query matches nothing. A query of
/// only spaces is still a query.
pub fn search_book(book: &Book, query: &str) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    book.chapters
        .iter()
        .flat_map(|chapter| {
            chapter.verses.iter().map(move |verse| (chapter.number, verse))
        })
        .filter(|(_, verse)| verse.text.to_lowercase().contains(&needle))
        .map(|(chapter, verse)| SearchHit { chapter, verse: verse.number, text: verse.text.clone() })
        .collect()
}

/// Byte ranges of every case-insensitive occurrence of `query` in `text`.
///
/// The query is matched literally, never as a pattern.
pub fn highlight_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }

    match RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() {
        Ok(re) => re.find_iter(text).map(|m| m.range()).collect(),
        Err(e) => {
            tracing::warn!("Could not build highlight pattern for {:?}: {}", query, e);
            Vec::new()
        }
    }
}
