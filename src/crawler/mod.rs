//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching under a caller-supplied user agent
//! - HTML text and link extraction
//! - The bounded, concurrency-limited crawl loop and its progress accounting

mod engine;
mod extract;
mod fetcher;
mod types;

pub use engine::{crawl, CrawlEngine};
pub use extract::{extract_content, extract_links, parse_page, ExtractedContent, ParsedPage};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use types::{CrawlOptions, CrawlTarget, PageDocument, Progress};
