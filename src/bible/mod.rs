//! Scripture content: model, catalog, sources and the content store

pub mod catalog;
pub mod error;
pub mod model;
pub mod search;
pub mod source;
pub mod store;

pub use catalog::{BOOKS, BookIndex, file_stem};
pub use error::ContentError;
pub use model::{Book, Chapter, Verse};
pub use search::{SearchHit, highlight_ranges, search_book};
pub use source::BookSource;
pub use store::ContentStore;

/// Shared fixtures for tests across the crate
#[cfg(test)]
pub(crate) mod testing {
    use super::{Book, BookSource, Chapter, Verse};

    /// A book with `chapters` chapters of `verses` verses each; every verse
    /// text mentions the book name and its reference
    pub fn sample_book(name: &str, chapters: u32, verses: u32) -> Book {
        let chapters = (1..=chapters)
            .map(|c| {
                Chapter::new(
                    c,
                    (1..=verses).map(|v| Verse::new(v, format!("{name} {c}:{v} text"))).collect(),
                )
            })
            .collect();
        Book::new(name, chapters)
    }

    /// The same book in its wire format
    pub fn sample_book_json(name: &str, chapters: u32, verses: u32) -> String {
        let chapters: Vec<_> = (1..=chapters)
            .map(|c| {
                let verses: Vec<_> = (1..=verses)
                    .map(|v| {
                        serde_json::json!({ "verse": v.to_string(), "text": format!("{name} {c}:{v} text") })
                    })
                    .collect();
                serde_json::json!({ "chapter": c.to_string(), "verses": verses })
            })
            .collect();
        serde_json::json!({ "book": name, "chapters": chapters }).to_string()
    }

    /// In-memory source holding `(name, chapter count)` books of 3 verses each
    pub fn memory_source(books: &[(&str, u32)]) -> BookSource {
        BookSource::memory(books.iter().map(|(name, chapters)| (*name, sample_book_json(name, *chapters, 3))))
    }
}
