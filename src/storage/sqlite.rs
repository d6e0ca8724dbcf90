//! SQLite storage implementation
//!
//! This module provides an FTS5-backed implementation of the IndexStore trait.

use crate::crawler::PageDocument;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{IndexStore, StorageError, StorageResult};
use crate::storage::SearchResult;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite full-text index
pub struct SqliteIndex {
    conn: Mutex<Connection>,
}

impl SqliteIndex {
    /// Opens or creates the index database at `path`
    ///
    /// Missing parent directories are created first.
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteIndex)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to create the directory or open the database
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory index
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}

fn parse_fetched_at(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))
}

impl IndexStore for SqliteIndex {
    fn upsert(&self, document: &PageDocument) -> StorageResult<()> {
        let mut conn = self.lock()?;

        // FTS5 tables have no unique constraint, so replace by hand
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM pages WHERE url = ?1", params![document.url])?;
        tx.execute(
            "INSERT INTO pages (url, title, content, fetched_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                document.url,
                document.title,
                document.content,
                document.fetched_at.to_rfc3339()
            ],
        )?;
        tx.commit()?;

        tracing::debug!("Indexed {}", document.url);
        Ok(())
    }

    fn search(&self, query: &str, limit: usize) -> StorageResult<Vec<SearchResult>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT url, title, snippet(pages, 2, '<b>', '</b>', '…', 10) AS snippet, rank
             FROM pages
             WHERE pages MATCH ?1
             ORDER BY rank
             LIMIT ?2",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let results = stmt
            .query_map(params![query, limit], |row| {
                Ok(SearchResult {
                    url: row.get(0)?,
                    title: row.get(1)?,
                    snippet: row.get(2)?,
                    rank: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }

    fn count_documents(&self) -> StorageResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn get_document(&self, url: &str) -> StorageResult<Option<PageDocument>> {
        let conn = self.lock()?;
        let document = conn
            .query_row(
                "SELECT url, title, content, fetched_at FROM pages WHERE url = ?1",
                params![url],
                |row| {
                    let fetched_at: String = row.get(3)?;
                    Ok(PageDocument {
                        url: row.get(0)?,
                        title: row.get(1)?,
                        content: row.get(2)?,
                        fetched_at: parse_fetched_at(&fetched_at)?,
                    })
                },
            )
            .optional()?;

        Ok(document)
    }
}
