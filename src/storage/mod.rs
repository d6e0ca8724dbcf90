//! Storage module for the full-text page index
//!
//! This module handles everything persisted by Haze-Search:
//! - SQLite database initialization and the FTS5 schema
//! - Upserting crawled documents keyed by URL
//! - Ranked keyword search with highlighted snippets

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteIndex;
pub use traits::{IndexStore, StorageError, StorageResult};

use crate::crawler::PageDocument;
use crate::HazeError;
use serde::Serialize;
use std::path::Path;

/// Initializes or opens the index database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
pub fn open_index(path: &Path) -> crate::Result<SqliteIndex> {
    Ok(SqliteIndex::open(path)?)
}

/// A single ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    /// Excerpt of the content with matches wrapped in `<b>`/`</b>`
    pub snippet: String,
    /// Engine relevance score; lower is better
    pub rank: f64,
}

/// Builds a crawl document callback that upserts into `store`
///
/// A failed upsert ends the crawl run, since every later document would fail
/// the same way.
pub fn index_sink<S>(store: &S) -> impl FnMut(PageDocument) -> Result<(), HazeError> + '_
where
    S: IndexStore + ?Sized,
{
    move |document| {
        store.upsert(&document)?;
        Ok(())
    }
}
