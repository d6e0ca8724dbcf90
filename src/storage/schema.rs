//! Database schema definitions
//!
//! This module contains the SQL schema for the Haze-Search index.

use rusqlite::Connection;

/// SQL schema for the database
///
/// `url` and `fetched_at` are stored but not tokenized; `title` and `content`
/// feed the full-text index. Column 2 (`content`) is the snippet source.
pub const SCHEMA_SQL: &str = r#"
CREATE VIRTUAL TABLE IF NOT EXISTS pages USING fts5(
    url UNINDEXED,
    title,
    content,
    fetched_at UNINDEXED
);
"#;

/// Initializes the database schema
///
/// Safe to run against an existing database.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
