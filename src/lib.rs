//! Haze-Search: bounded, polite crawling into a full-text index
//!
//! This crate crawls a bounded neighbourhood of seed URLs, extracts the visible
//! text of every page it fetches, and stores the result in a SQLite FTS5 table
//! that serves ranked keyword queries with highlighted snippets.

pub mod config;
pub mod crawler;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Haze-Search operations
///
/// Per-URL failures never surface here; they are folded into the crawl
/// [`Progress`](crawler::Progress) counters. This type is reserved for
/// run-level failures.
#[derive(Debug, Error)]
pub enum HazeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid host pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Haze-Search operations
pub type Result<T> = std::result::Result<T, HazeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlEngine, CrawlOptions, PageDocument, Progress};
pub use storage::{IndexStore, SearchResult, SqliteIndex};
pub use crate::url::{is_host_allowed, normalize_url, resolve_url};
