//! The fixed book catalog
//!
//! Book order defines adjacency: continuous reading flows from the last
//! chapter of one book into the first chapter of the next.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// All 66 books in canonical order
pub const BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Lowercased name -> position in [`BOOKS`]
static CANONICAL_POSITIONS: Lazy<HashMap<String, usize>> =
    Lazy::new(|| BOOKS.iter().enumerate().map(|(i, name)| (name.to_lowercase(), i)).collect());

/// Ordered catalog of book names
#[derive(Debug, Clone, Copy)]
pub struct BookIndex {
    names: &'static [&'static str],
    canonical: bool,
}

impl Default for BookIndex {
    fn default() -> Self {
        Self::canonical()
    }
}

impl BookIndex {
    /// The full 66-book catalog
    pub fn canonical() -> Self {
        Self { names: &BOOKS, canonical: true }
    }

    /// A custom catalog (used for partial corpora and tests)
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names, canonical: false }
    }

    /// All names in order
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    /// Number of books
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a book (case-insensitive)
    pub fn position(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        if self.canonical {
            return CANONICAL_POSITIONS.get(&wanted).copied();
        }
        self.names.iter().position(|n| n.to_lowercase() == wanted)
    }

    /// Resolve user input to the catalog spelling
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        self.position(name).map(|i| self.names[i])
    }

    /// The book that follows `name`, `None` at the end of the corpus
    pub fn next(&self, name: &str) -> Option<&'static str> {
        let i = self.position(name)?;
        self.names.get(i + 1).copied()
    }

    /// Books whose name contains `query` (case-insensitive), in catalog order
    pub fn filter(&self, query: &str) -> Vec<&'static str> {
        let query = query.trim().to_lowercase();
        self.names.iter().copied().filter(|n| n.to_lowercase().contains(&query)).collect()
    }
}

/// File stem for a book resource: lowercase, spaces to underscores, and
/// anything outside `[a-z0-9_]` dropped
pub fn file_stem(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn catalog_has_66_books() {
        let index = BookIndex::canonical();
        assert_eq!(index.len(), 66);
        assert_eq!(index.names()[0], "Genesis");
        assert_eq!(index.names()[65], "Revelation");
    }

    #[test]
    fn next_crosses_testaments() {
        let index = BookIndex::canonical();
        assert_eq!(index.next("Malachi"), Some("Matthew"));
        assert_eq!(index.next("genesis"), Some("Exodus"));
    }

    #[test]
    fn next_is_none_at_end_of_corpus() {
        assert_eq!(BookIndex::canonical().next("Revelation"), None);
    }

    #[test]
    fn next_is_none_for_unknown_book() {
        assert_eq!(BookIndex::canonical().next("Enoch"), None);
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let index = BookIndex::canonical();
        assert_eq!(index.resolve("song of solomon"), Some("Song of Solomon"));
        assert_eq!(index.resolve("  1 JOHN "), Some("1 John"));
        assert_eq!(index.resolve("Hezekiah"), None);
    }

    #[test]
    fn custom_catalog_uses_its_own_order() {
        static SMALL: [&str; 2] = ["Ruth", "Esther"];
        let index = BookIndex::new(&SMALL);
        assert_eq!(index.next("ruth"), Some("Esther"));
        assert_eq!(index.next("Esther"), None);
        assert_eq!(index.position("Genesis"), None);
    }

    #[test]
    fn filter_matches_substrings() {
        let index = BookIndex::canonical();
        assert_eq!(index.filter("john"), vec!["John", "1 John", "2 John", "3 John"]);
        assert_eq!(index.filter("").len(), 66);
        assert!(index.filter("zzz").is_empty());
    }

    #[test]
    fn file_stem_normalizes_names() {
        assert_eq!(file_stem("Genesis"), "genesis");
        assert_eq!(file_stem("1 Samuel"), "1_samuel");
        assert_eq!(file_stem("Song of Solomon"), "song_of_solomon");
        assert_eq!(file_stem("St. John's"), "st_johns");
    }

    proptest! {
        #[test]
        fn file_stem_only_contains_allowed_chars(name in "\\PC{0,40}") {
            let stem = file_stem(&name);
            prop_assert!(stem.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }
    }
}
