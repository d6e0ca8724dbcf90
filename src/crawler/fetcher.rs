//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients that identify themselves with a user agent string
//! - GET requests to fetch page content
//! - Classifying outcomes into success, non-success status, and transport failure
//!
//! There are no retries. A URL gets exactly one attempt per crawl run.

use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered with a 2xx status and the body was read
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered, but not with a 2xx status
    NonSuccess {
        /// The HTTP status code
        status_code: u16,
    },

    /// Connection, timeout, TLS or body-read failure
    TransportError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client that sends `user_agent` with every request
///
/// # Example
///
/// ```no_run
/// use haze_search::crawler::build_http_client;
///
/// let client = build_http_client("haze-search/0.1").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx, body read | `Success` |
/// | any other status | `NonSuccess` |
/// | connect/timeout/TLS failure | `TransportError` |
/// | body could not be read | `TransportError` |
///
/// Redirects are followed by the client.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::TransportError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::NonSuccess {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::TransportError {
            error: e.to_string(),
        },
    }
}
