use crate::crawler::CrawlOptions;
use serde::Deserialize;

/// Main configuration structure for Haze-Search
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URLs the crawl starts from (depth 0)
    pub seeds: Vec<String>,

    /// Hosts the crawl may visit; subdomains are included, empty means all
    #[serde(rename = "allow-hosts", default)]
    pub allow_hosts: Vec<String>,

    /// Maximum number of documents indexed in one run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Maximum number of link hops from a seed
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Delay applied before every request (milliseconds)
    #[serde(rename = "rate-limit-ms", default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Maximum number of fetches in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite index database
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

fn default_max_pages() -> u32 {
    100
}

fn default_max_depth() -> u32 {
    1
}

fn default_rate_limit_ms() -> u64 {
    250
}

fn default_concurrency() -> u32 {
    3
}

fn default_crawler_name() -> String {
    "haze-search".to_string()
}

fn default_crawler_version() -> String {
    "0.1".to_string()
}

fn default_database_path() -> String {
    "./data/search.db".to_string()
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the identification string sent with every request
    ///
    /// Format: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Config {
    /// Builds the crawl invocation described by this configuration
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            seed_urls: self.crawler.seeds.clone(),
            allow_hosts: self.crawler.allow_hosts.clone(),
            max_pages: self.crawler.max_pages as usize,
            max_depth: self.crawler.max_depth,
            rate_limit_ms: self.crawler.rate_limit_ms,
            user_agent: self.user_agent.header_value(),
            concurrency: self.crawler.concurrency as usize,
            batch_size: self.crawler.concurrency as usize,
        }
    }
}
