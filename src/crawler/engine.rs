//! Crawl engine - frontier management and the batch crawl loop
//!
//! The engine owns the frontier, the seen-set and the progress counters for a
//! single run. Fetch units run concurrently but only return outcomes; the
//! engine folds each outcome back into its own state one at a time, so none
//! of that state is ever shared between tasks.

use crate::crawler::extract::{parse_page, ParsedPage};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::types::{CrawlOptions, CrawlTarget, PageDocument, Progress};
use crate::url::{host_allowed, normalize_url};
use crate::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// What a single fetch unit produced
#[derive(Debug)]
enum UnitResult {
    Fetched {
        page: ParsedPage,
        /// Where the page was served from after redirects
        final_url: Url,
        fetched_at: DateTime<Utc>,
    },
    NonSuccess {
        status_code: u16,
    },
    TransportError {
        error: String,
    },
}

#[derive(Debug)]
struct UnitOutcome {
    target: CrawlTarget,
    result: UnitResult,
}

/// Single-run crawl state machine
pub struct CrawlEngine {
    options: CrawlOptions,
    client: Client,
    frontier: VecDeque<CrawlTarget>,
    seen: HashSet<String>,
    progress: Progress,
    cancel: Option<CancellationToken>,
}

impl CrawlEngine {
    /// Creates an engine with its own HTTP client and a seeded frontier
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlEngine)` - Engine ready to [`run`](CrawlEngine::run)
    /// * `Err(HazeError)` - The HTTP client could not be built
    pub fn new(options: CrawlOptions) -> Result<Self> {
        let client = build_http_client(&options.user_agent)?;
        Ok(Self::with_client(options, client))
    }

    /// Creates an engine that fetches through an existing client
    ///
    /// Seeds are normalized and host-filtered; each one that passes enters the
    /// frontier at depth 0. Invalid or duplicate seeds are dropped.
    pub fn with_client(options: CrawlOptions, client: Client) -> Self {
        let mut engine = Self {
            options,
            client,
            frontier: VecDeque::new(),
            seen: HashSet::new(),
            progress: Progress::default(),
            cancel: None,
        };

        let seeds = engine.options.seed_urls.clone();
        for seed in &seeds {
            match normalize_url(seed) {
                Ok(url) => {
                    if !engine.enqueue(url, 0) {
                        tracing::debug!("Seed {} skipped (duplicate or host not allowed)", seed);
                    }
                }
                Err(e) => tracing::debug!("Seed {} dropped: {}", seed, e),
            }
        }

        engine.progress.queued = engine.frontier.len();
        engine
    }

    /// Stops the run at the next batch boundary once `token` is cancelled
    ///
    /// Units already in flight are allowed to finish.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Current progress counters
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Number of targets waiting in the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Targets waiting in the frontier, in dequeue order
    pub fn frontier(&self) -> impl Iterator<Item = &CrawlTarget> {
        self.frontier.iter()
    }

    /// Runs the crawl to completion
    ///
    /// Every indexable document is passed to `on_document`; a snapshot of the
    /// counters is passed to `on_progress` after each processed target. The
    /// run ends when the frontier is empty, when `max_pages` documents have
    /// been indexed, or at a batch boundary after cancellation.
    ///
    /// # Returns
    ///
    /// * `Ok(Progress)` - Final counters
    /// * `Err(HazeError)` - `on_document` failed; the run was abandoned
    pub async fn run<D, P>(
        &mut self,
        mut on_document: D,
        mut on_progress: P,
    ) -> Result<Progress>
    where
        D: FnMut(PageDocument) -> Result<()>,
        P: FnMut(Progress),
    {
        let concurrency = self.options.concurrency.max(1);
        let batch_size = self.options.batch_size.max(1);
        let delay = Duration::from_millis(self.options.rate_limit_ms);
        let max_depth = self.options.max_depth;
        let start_time = std::time::Instant::now();

        tracing::info!(
            "Starting crawl: {} seeds queued, max {} pages, max depth {}",
            self.frontier.len(),
            self.options.max_pages,
            max_depth
        );

        while !self.frontier.is_empty() && self.progress.indexed < self.options.max_pages {
            if self.is_cancelled() {
                tracing::info!("Crawl cancelled with {} targets queued", self.frontier.len());
                break;
            }

            // Never start more units than there are documents left to index
            let remaining = self.options.max_pages - self.progress.indexed;
            let take = batch_size.min(remaining).min(self.frontier.len());
            let batch: Vec<CrawlTarget> = self.frontier.drain(..take).collect();
            self.progress.queued = self.frontier.len();

            tracing::debug!("Dispatching batch of {} targets", batch.len());

            let client = &self.client;
            let mut outcomes = stream::iter(batch)
                .map(|target| {
                    let client = client.clone();
                    async move { process_target(client, target, delay, max_depth).await }
                })
                .buffer_unordered(concurrency);

            let mut settled = Vec::with_capacity(take);
            while let Some(outcome) = outcomes.next().await {
                settled.push(outcome);
            }
            drop(outcomes);

            for outcome in settled {
                self.fold(outcome, &mut on_document)?;
                self.progress.queued = self.frontier.len();
                on_progress(self.progress);
            }
        }

        tracing::info!(
            "Crawl finished in {:?}: {} fetched, {} indexed, {} errors, {} left in frontier",
            start_time.elapsed(),
            self.progress.fetched,
            self.progress.indexed,
            self.progress.errors,
            self.frontier.len()
        );

        Ok(self.progress)
    }

    /// Applies one unit's outcome to the counters and the frontier
    fn fold<D>(&mut self, outcome: UnitOutcome, on_document: &mut D) -> Result<()>
    where
        D: FnMut(PageDocument) -> Result<()>,
    {
        let UnitOutcome { target, result } = outcome;

        match result {
            UnitResult::TransportError { error } => {
                self.progress.errors += 1;
                tracing::warn!("Failed to fetch {}: {}", target.url, error);
            }

            UnitResult::NonSuccess { status_code } => {
                tracing::debug!("Skipping {}: HTTP {}", target.url, status_code);
            }

            UnitResult::Fetched {
                page,
                final_url,
                fetched_at,
            } => {
                self.progress.fetched += 1;

                // Redirect targets count as visited
                if final_url != target.url {
                    self.seen.insert(final_url.as_str().to_string());
                }

                if page.content.is_indexable() {
                    on_document(PageDocument {
                        url: target.url.to_string(),
                        title: page.content.title,
                        content: page.content.text,
                        fetched_at,
                    })?;
                    self.progress.indexed += 1;
                } else {
                    tracing::debug!("No text extracted from {}", target.url);
                }

                for link in page.links {
                    if self.progress.indexed + self.frontier.len() >= self.options.max_pages {
                        break;
                    }
                    self.enqueue(link, target.depth + 1);
                }
            }
        }

        Ok(())
    }

    /// Adds a URL to the frontier if it is new and its host is allowed
    ///
    /// Returns true if the URL was enqueued.
    fn enqueue(&mut self, url: Url, depth: u32) -> bool {
        if !host_allowed(&url, &self.options.allow_hosts) {
            return false;
        }

        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }

        self.frontier.push_back(CrawlTarget { url, depth });
        true
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Waits out the politeness delay, fetches one target and extracts it
async fn process_target(
    client: Client,
    target: CrawlTarget,
    delay: Duration,
    max_depth: u32,
) -> UnitOutcome {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    tracing::debug!("Fetching {} (depth {})", target.url, target.depth);

    let result = match fetch_page(&client, &target.url).await {
        FetchResult::Success {
            final_url, body, ..
        } => {
            let fetched_at = Utc::now();
            // Relative links resolve against where the page actually lives
            let final_url = normalize_url(&final_url).unwrap_or_else(|_| target.url.clone());
            let page = parse_page(&body, &final_url, target.depth < max_depth);
            UnitResult::Fetched {
                page,
                final_url,
                fetched_at,
            }
        }
        FetchResult::NonSuccess { status_code } => UnitResult::NonSuccess { status_code },
        FetchResult::TransportError { error } => UnitResult::TransportError { error },
    };

    UnitOutcome { target, result }
}

/// Runs a complete crawl with a fresh engine
///
/// # Example
///
/// ```no_run
/// use haze_search::crawler::{crawl, CrawlOptions};
///
/// # async fn example() -> Result<(), haze_search::HazeError> {
/// let options = CrawlOptions {
///     seed_urls: vec!["https://example.com/".to_string()],
///     ..CrawlOptions::default()
/// };
///
/// crawl(
///     options,
///     |doc| {
///         println!("{}: {}", doc.url, doc.title);
///         Ok(())
///     },
///     |progress| println!("{:?}", progress),
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn crawl<D, P>(
    options: CrawlOptions,
    on_document: D,
    on_progress: P,
) -> Result<Progress>
where
    D: FnMut(PageDocument) -> Result<()>,
    P: FnMut(Progress),
{
    let mut engine = CrawlEngine::new(options)?;
    engine.run(on_document, on_progress).await
}
