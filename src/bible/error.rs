//! Error types for loading scripture content

use thiserror::Error;

/// Errors that can occur while fetching or parsing a book
#[derive(Debug, Error)]
pub enum ContentError {
    /// The book is not part of the catalog
    #[error("Unknown book: {0}")]
    UnknownBook(String),

    /// The book resource does not exist
    #[error("Book not found: {book} ({resource})")]
    NotFound {
        /// Book name as requested
        book: String,
        /// URL or path that was tried
        resource: String,
    },

    /// The resource exists but is not a valid book
    #[error("Malformed book data for {book}: {source}")]
    Malformed {
        /// Book name as requested
        book: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Failed to load {book}: HTTP {status}")]
    Status {
        /// Book name as requested
        book: String,
        /// HTTP status code
        status: u16,
    },

    /// Filesystem error
    #[error("Failed to read {resource}: {source}")]
    Io {
        /// Path that was read
        resource: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Missing and malformed resources both mean "there is no such book"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::NotFound { .. }
                | ContentError::Malformed { .. }
                | ContentError::UnknownBook(_)
        )
    }

    /// Check if retrying the same load might succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            ContentError::Request(_) | ContentError::Io { .. } => true,
            ContentError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
