//! Index store traits and error types
//!
//! This module defines the trait interface for index backends and
//! associated error types.

use crate::crawler::PageDocument;
use crate::storage::SearchResult;
use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index lock poisoned")]
    Poisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for full-text index implementations
///
/// Implementations are shared between a running crawl (writing through
/// [`upsert`](IndexStore::upsert)) and independent search callers, so every
/// method takes `&self` and each call is atomic on its own.
pub trait IndexStore: Send + Sync {
    /// Replaces any existing entry for `document.url` with this document
    ///
    /// Repeating the same upsert leaves exactly one entry for the URL.
    fn upsert(&self, document: &PageDocument) -> StorageResult<()>;

    /// Runs a full-text query and returns up to `limit` results, best first
    ///
    /// The query uses the engine's match syntax unchanged; callers reject
    /// empty queries before calling.
    fn search(&self, query: &str, limit: usize) -> StorageResult<Vec<SearchResult>>;

    /// Counts the documents currently in the index
    fn count_documents(&self) -> StorageResult<u64>;

    /// Fetches the stored document for a URL, if any
    fn get_document(&self, url: &str) -> StorageResult<Option<PageDocument>>;
}
