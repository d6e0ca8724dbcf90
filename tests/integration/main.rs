//! Integration tests for Haze-Search
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! crawl engine and the search index end-to-end.

mod search_tests;
