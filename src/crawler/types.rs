use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// URLs the crawl starts from
    pub seed_urls: Vec<String>,

    /// Host allow-list; empty admits every host
    pub allow_hosts: Vec<String>,

    /// Stop once this many documents have been indexed
    pub max_pages: usize,

    /// Maximum link hops from a seed
    pub max_depth: u32,

    /// Delay before every request, in milliseconds
    pub rate_limit_ms: u64,

    /// Identification string sent with every request
    pub user_agent: String,

    /// Maximum fetches in flight at once
    pub concurrency: usize,

    /// Maximum targets taken from the frontier per batch
    pub batch_size: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            seed_urls: Vec::new(),
            allow_hosts: Vec::new(),
            max_pages: 100,
            max_depth: 1,
            rate_limit_ms: 250,
            user_agent: "haze-search/0.1".to_string(),
            concurrency: 3,
            batch_size: 3,
        }
    }
}

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: Url,

    /// Link hops from the seed this URL was reached from
    pub depth: u32,
}

/// A fetched page ready for indexing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub url: String,
    pub title: String,
    pub content: String,
    pub fetched_at: DateTime<Utc>,
}

/// Counters describing a crawl in progress
///
/// Every field except `queued` only ever grows during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Targets currently waiting in the frontier
    pub queued: usize,

    /// Pages fetched with a success status
    pub fetched: usize,

    /// Documents handed to the sink
    pub indexed: usize,

    /// Fetches that failed at the transport level
    pub errors: usize,
}
