//! Scripture data model
//!
//! Books are delivered as static JSON where chapter and verse numbers are
//! stringified integers:
//!
//! ```json
//! { "book": "Ruth", "chapters": [ { "chapter": "1", "verses": [ { "verse": "1", "text": "..." } ] } ] }
//! ```
//!
//! The wire shape is parsed privately and converted into the typed [`Book`]
//! the rest of the reader works with.

use serde::{Deserialize, Deserializer, Serialize, de};

/// A single verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Verse number (1-indexed)
    pub number: u32,
    /// Verse text
    pub text: String,
}

impl Verse {
    /// Create a new verse
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self { number, text: text.into() }
    }
}

/// A chapter within a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter number (1-indexed, contiguous within a book)
    pub number: u32,
    /// Verses in order
    pub verses: Vec<Verse>,
}

impl Chapter {
    /// Create a new chapter
    pub fn new(number: u32, verses: Vec<Verse>) -> Self {
        Self { number, verses }
    }
}

/// A complete book, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Display name, e.g. "1 Samuel"
    pub name: String,
    /// Chapters in order
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Create a new book
    pub fn new(name: impl Into<String>, chapters: Vec<Chapter>) -> Self {
        Self { name: name.into(), chapters }
    }

    /// Parse a book from its JSON resource
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let wire: WireBook = serde_json::from_str(json)?;
        Ok(wire.into())
    }

    /// Number of chapters
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Look up a chapter by its number
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }
}

#[derive(Deserialize)]
struct WireBook {
    book: String,
    chapters: Vec<WireChapter>,
}

#[derive(Deserialize)]
struct WireChapter {
    #[serde(deserialize_with = "positive_number")]
    chapter: u32,
    verses: Vec<WireVerse>,
}

#[derive(Deserialize)]
struct WireVerse {
    #[serde(deserialize_with = "positive_number")]
    verse: u32,
    text: String,
}

impl From<WireBook> for Book {
    fn from(wire: WireBook) -> Self {
        let chapters = wire
            .chapters
            .into_iter()
            .map(|c| Chapter {
                number: c.chapter,
                verses: c.verses.into_iter().map(|v| Verse::new(v.verse, v.text)).collect(),
            })
            .collect();
        Book::new(wire.book, chapters)
    }
}

/// Accept `"12"` as well as `12`; zero is rejected
fn positive_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        String(String),
    }

    let n = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| de::Error::custom(format!("expected a positive integer, got {s:?}")))?,
    };

    if n == 0 {
        return Err(de::Error::custom("numbers are 1-based"));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RUTH: &str = r#"{
        "book": "Ruth",
        "chapters": [
            { "chapter": "1", "verses": [
                { "verse": "1", "text": "Now it came to pass in the days when the judges ruled," },
                { "verse": "2", "text": "And the name of the man was Elimelech," }
            ] },
            { "chapter": "2", "verses": [
                { "verse": "1", "text": "And Naomi had a kinsman of her husband's," }
            ] }
        ]
    }"#;

    #[test]
    fn parses_stringified_numbers() {
        let book = Book::from_json(RUTH).unwrap();
        assert_eq!(book.name, "Ruth");
        assert_eq!(book.chapter_count(), 2);
        assert_eq!(book.chapters[0].verses[1], Verse::new(2, "And the name of the man was Elimelech,"));
    }

    #[test]
    fn accepts_plain_numbers() {
        let json = r#"{"book":"Jude","chapters":[{"chapter":1,"verses":[{"verse":1,"text":"Jude"}]}]}"#;
        let book = Book::from_json(json).unwrap();
        assert_eq!(book.chapters[0].number, 1);
    }

    #[test]
    fn rejects_non_numeric_chapter() {
        let json = r#"{"book":"Jude","chapters":[{"chapter":"one","verses":[]}]}"#;
        assert!(Book::from_json(json).is_err());
    }

    #[test]
    fn rejects_zero_verse_number() {
        let json = r#"{"book":"Jude","chapters":[{"chapter":"1","verses":[{"verse":"0","text":"x"}]}]}"#;
        assert!(Book::from_json(json).is_err());
    }

    #[test]
    fn chapter_lookup_is_by_number() {
        let book = Book::from_json(RUTH).unwrap();
        assert_eq!(book.chapter(2).map(|c| c.verses.len()), Some(1));
        assert!(book.chapter(3).is_none());
        assert!(book.chapter(0).is_none());
    }
}
