//! URL handling module for Haze-Search
//!
//! This module provides URL normalization, link resolution against a page's
//! base URL, and the host allow-list used to keep a crawl in bounds.

mod filter;
mod normalize;

// Re-export main functions
pub use filter::{host_allowed, host_matches, is_host_allowed};
pub use normalize::{normalize_url, resolve_url};
