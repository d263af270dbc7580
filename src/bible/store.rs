//! The content store: the one book currently open for reading

use std::sync::Arc;

use super::error::ContentError;
use super::model::{Book, Verse};
use super::search::{SearchHit, search_book};
use super::source::BookSource;

/// Holds the loaded book and the chapter last looked up in it
#[derive(Debug)]
pub struct ContentStore {
    source: BookSource,
    book: Option<Arc<Book>>,
    current_chapter: Option<u32>,
}

impl ContentStore {
    /// Create an empty store reading from `source`
    pub fn new(source: BookSource) -> Self {
        Self { source, book: None, current_chapter: None }
    }

    /// The source books are fetched from
    pub fn source(&self) -> &BookSource {
        &self.source
    }

    /// Fetch `name` and make it the loaded book.
    ///
    /// On failure the previously loaded book stays in place.
    pub async fn load_book(&mut self, name: &str) -> Result<&Book, ContentError> {
        let book = self.source.fetch(name).await?;
        tracing::info!("Loaded {} ({} chapters)", book.name, book.chapter_count());
        self.current_chapter = None;
        let book = self.book.insert(Arc::new(book));
        Ok(&**book)
    }

    /// Make an already fetched book the loaded one
    pub fn adopt(&mut self, book: Arc<Book>) {
        tracing::debug!("Switched to {}", book.name);
        self.current_chapter = None;
        self.book = Some(book);
    }

    /// The loaded book, if any
    pub fn book(&self) -> Option<&Book> {
        self.book.as_deref()
    }

    /// Shared handle to the loaded book, for work that outlives a borrow
    pub fn snapshot(&self) -> Option<Arc<Book>> {
        self.book.clone()
    }

    /// Name of the loaded book
    pub fn book_name(&self) -> Option<&str> {
        self.book.as_ref().map(|b| b.name.as_str())
    }

    /// Chapter count of the loaded book, 0 if none
    pub fn chapter_count(&self) -> usize {
        self.book.as_ref().map_or(0, |b| b.chapter_count())
    }

    /// Verses of chapter `number`; records it as the current chapter
    pub fn verses_of(&mut self, number: u32) -> Option<&[Verse]> {
        let book = self.book.as_ref()?;
        let chapter = book.chapter(number)?;
        self.current_chapter = Some(number);
        Some(&chapter.verses)
    }

    /// Chapter last returned by [`ContentStore::verses_of`]
    pub fn current_chapter(&self) -> Option<u32> {
        self.current_chapter
    }

    /// Search the loaded book
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.book.as_ref().map(|b| search_book(b, query)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::testing::{memory_source, sample_book_json};

    fn store() -> ContentStore {
        ContentStore::new(memory_source(&[("Genesis", 5), ("Exodus", 3)]))
    }

    #[tokio::test]
    async fn empty_store_has_no_chapters() {
        let mut store = store();
        assert_eq!(store.chapter_count(), 0);
        assert!(store.verses_of(1).is_none());
        assert!(store.search("genesis").is_empty());
    }

    #[tokio::test]
    async fn verses_exist_for_every_valid_chapter() {
        let mut store = store();
        store.load_book("Genesis").await.unwrap();
        let count = store.chapter_count() as u32;
        assert_eq!(count, 5);

        for n in 1..=count {
            let verses = store.verses_of(n).unwrap();
            assert!(!verses.is_empty());
        }
        assert!(store.verses_of(0).is_none());
        assert!(store.verses_of(count + 1).is_none());
    }

    #[tokio::test]
    async fn verses_of_records_current_chapter() {
        let mut store = store();
        store.load_book("Genesis").await.unwrap();
        assert_eq!(store.current_chapter(), None);

        store.verses_of(3);
        assert_eq!(store.current_chapter(), Some(3));

        // Out of range lookups leave the pointer alone
        store.verses_of(42);
        assert_eq!(store.current_chapter(), Some(3));
    }

    #[tokio::test]
    async fn loading_a_book_clears_current_chapter() {
        let mut store = store();
        store.load_book("Genesis").await.unwrap();
        store.verses_of(2);
        store.load_book("Exodus").await.unwrap();
        assert_eq!(store.current_chapter(), None);
        assert_eq!(store.book_name(), Some("Exodus"));
        assert_eq!(store.chapter_count(), 3);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_book() {
        let mut store = store();
        store.load_book("Genesis").await.unwrap();
        let err = store.load_book("Leviticus").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.book_name(), Some("Genesis"));
    }

    #[tokio::test]
    async fn malformed_book_is_not_found() {
        let mut store = ContentStore::new(BookSource::memory([
            ("Ruth", "[]".to_string()),
            ("Esther", sample_book_json("Esther", 1, 1)),
        ]));
        assert!(store.load_book("Ruth").await.unwrap_err().is_not_found());
        assert!(store.load_book("Esther").await.is_ok());
    }

    #[tokio::test]
    async fn search_scans_loaded_book_only() {
        let mut store = store();
        store.load_book("Exodus").await.unwrap();
        assert!(store.search("genesis").is_empty());
        let verses: usize = store.book().unwrap().chapters.iter().map(|c| c.verses.len()).sum();
        assert_eq!(store.search("EXODUS").len(), verses);
    }
}
