//! Where book JSON comes from
//!
//! A source is either an HTTP base URL, a local directory or an in-memory
//! corpus. Every variant resolves `{base}/{file_stem}.json` the same way.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use super::catalog::file_stem;
use super::error::ContentError;
use super::model::Book;

/// Source of book resources
#[derive(Debug, Clone)]
pub enum BookSource {
    /// Static files served over HTTP(S)
    Http {
        /// Base URL without trailing slash
        base: String,
        /// Shared HTTP client
        client: Client,
    },
    /// Directory of `<stem>.json` files
    Directory(PathBuf),
    /// Raw JSON documents keyed by file stem
    Memory(Arc<HashMap<String, String>>),
}

impl BookSource {
    /// Build a source from a location: URLs become HTTP sources, anything else
    /// is treated as a directory path
    pub fn from_location(location: &str, timeout: Duration) -> Result<Self, ContentError> {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            let client = Client::builder().timeout(timeout).build()?;
            Ok(BookSource::Http { base: location.trim_end_matches('/').to_string(), client })
        } else {
            Ok(BookSource::Directory(PathBuf::from(location)))
        }
    }

    /// In-memory source from `(book name, json)` pairs
    pub fn memory<I, N, J>(books: I) -> Self
    where
        I: IntoIterator<Item = (N, J)>,
        N: AsRef<str>,
        J: Into<String>,
    {
        let map = books.into_iter().map(|(name, json)| (file_stem(name.as_ref()), json.into()));
        BookSource::Memory(Arc::new(map.collect()))
    }

    /// URL or path the book would be loaded from
    pub fn resource_for(&self, name: &str) -> String {
        let stem = file_stem(name);
        match self {
            BookSource::Http { base, .. } => format!("{base}/{stem}.json"),
            BookSource::Directory(dir) => dir.join(format!("{stem}.json")).display().to_string(),
            BookSource::Memory(_) => format!("memory:{stem}.json"),
        }
    }

    /// Fetch and parse a book
    pub async fn fetch(&self, name: &str) -> Result<Book, ContentError> {
        let resource = self.resource_for(name);
        tracing::debug!("Fetching {} from {}", name, resource);

        let body = match self {
            BookSource::Http { client, .. } => {
                let response = client.get(&resource).send().await?;
                let status = response.status();
                if status == StatusCode::NOT_FOUND {
                    return Err(ContentError::NotFound { book: name.to_string(), resource });
                }
                if !status.is_success() {
                    return Err(ContentError::Status {
                        book: name.to_string(),
                        status: status.as_u16(),
                    });
                }
                response.text().await?
            }
            BookSource::Directory(_) => match tokio::fs::read_to_string(&resource).await {
                Ok(body) => body,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(ContentError::NotFound { book: name.to_string(), resource });
                }
                Err(source) => return Err(ContentError::Io { resource, source }),
            },
            BookSource::Memory(books) => match books.get(&file_stem(name)) {
                Some(body) => body.clone(),
                None => return Err(ContentError::NotFound { book: name.to_string(), resource }),
            },
        };

        Book::from_json(&body).map_err(|source| ContentError::Malformed { book: name.to_string(), source })
    }
}
