//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the frontier and the record buffer outright; fetch
//! tasks only fetch and extract, reporting back over the JoinSet. Each cycle
//! drains up to C URLs, runs them concurrently, then applies every result in
//! one place: mark visited, buffer the record, enqueue new outlinks.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::extract::extract_page;
use crate::records::{write_batch, PageRecord};
use crate::robots::RobotsCache;
use crate::url::{canonicalize_url, extract_host, sanitize_domain};
use crate::{LinkRankError, Result};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// Terminal state of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The pending queue emptied before the budget was reached
    Exhausted,

    /// The page budget was reached with URLs still pending
    BudgetReached,

    /// An external stop signal halted scheduling of new batches
    Stopped,
}

/// Summary of one completed crawl run
#[derive(Debug)]
pub struct CrawlSummary {
    /// Number of page records collected
    pub pages: usize,

    /// Batch files written
    pub batch_files: Vec<PathBuf>,

    /// Why the crawl stopped
    pub outcome: CrawlOutcome,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    robots: Arc<RobotsCache>,
    frontier: Frontier,
    seed: Url,
    domain: String,
    stop: Arc<AtomicBool>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Canonicalizes the seed URL, derives the restricting domain from its
    /// host, and builds the shared HTTP client used for both page and
    /// robots.txt fetches.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(LinkRankError)` - Invalid seed URL or client build failure
    pub fn new(config: Config) -> Result<Self> {
        let seed = canonicalize_url(&config.crawler.start_url)?;
        let domain = extract_host(&seed).ok_or(crate::UrlError::MissingHost)?;

        let timeout = Duration::from_millis(config.crawler.request_timeout_ms);
        let client = build_http_client(&config.user_agent, timeout)?;
        let robots = Arc::new(RobotsCache::new(client.clone()));

        let mut frontier = Frontier::new();
        frontier.enqueue(seed.clone());

        Ok(Self {
            config: Arc::new(config),
            client,
            robots,
            frontier,
            seed,
            domain,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns the flag that requests a prompt stop of scheduling
    ///
    /// In-flight fetches are allowed to drain; only new batches are halted.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// The restricting domain derived from the seed URL
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Runs the main crawl loop
    ///
    /// Each scheduling cycle drains up to `max-concurrent-fetches` URLs,
    /// fetches them concurrently, and applies the results sequentially.
    /// The crawl ends when the record buffer reaches the page budget, the
    /// frontier is exhausted, or a stop was requested. Buffered records are
    /// flushed to a timestamped JSON batch file.
    pub async fn run(&mut self) -> Result<CrawlSummary> {
        if !self.robots.allowed(&self.seed).await {
            return Err(LinkRankError::SeedDisallowed {
                url: self.seed.to_string(),
            });
        }

        let budget = self.config.crawler.page_budget;
        let concurrency = self.config.crawler.max_concurrent_fetches as usize;
        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let file_domain = sanitize_domain(&self.domain);
        let records_dir = PathBuf::from(&self.config.output.records_dir);

        tracing::info!(
            "Starting crawl of {} (budget {}, concurrency {})",
            self.domain,
            budget,
            concurrency
        );

        let mut buffer: Vec<PageRecord> = Vec::new();
        let mut batch_files = Vec::new();
        let start_time = std::time::Instant::now();

        let outcome = loop {
            if self.stop.load(Ordering::Relaxed) {
                tracing::info!("Stop requested, halting scheduling");
                break CrawlOutcome::Stopped;
            }

            if buffer.len() >= budget {
                tracing::info!("Page budget of {} reached", budget);
                break CrawlOutcome::BudgetReached;
            }

            let batch = self.frontier.drain_batch(concurrency);
            if batch.is_empty() {
                tracing::info!("Frontier is empty, crawl complete");
                break CrawlOutcome::Exhausted;
            }

            let results = self.run_batch(batch).await;

            // Single critical section per cycle: only the coordinator
            // mutates the frontier and the record buffer.
            for (url, record) in results {
                self.frontier.mark_visited(url.as_str());

                if let Some(record) = record {
                    for outlink in &record.outlinks {
                        match Url::parse(outlink) {
                            Ok(link) => {
                                self.frontier.enqueue(link);
                            }
                            Err(e) => {
                                tracing::debug!("Dropping unparseable outlink {}: {}", outlink, e);
                            }
                        }
                    }

                    buffer.push(record);
                    tracing::info!("Crawled page {}: {}", buffer.len(), url);
                }
            }

            if buffer.len() % 10 == 0 && !buffer.is_empty() {
                let rate = buffer.len() as f64 / start_time.elapsed().as_secs_f64();
                tracing::debug!(
                    "Progress: {} pages, {} pending, {:.2} pages/sec",
                    buffer.len(),
                    self.frontier.pending_len(),
                    rate
                );
            }
        };

        if let Some(path) = write_batch(&records_dir, &file_domain, &stamp, 1, &buffer)? {
            batch_files.push(path);
        }

        tracing::info!(
            "Crawl finished: {} pages in {:?}, {} visited, {} still pending ({:?})",
            buffer.len(),
            start_time.elapsed(),
            self.frontier.visited_len(),
            self.frontier.pending_len(),
            outcome
        );

        Ok(CrawlSummary {
            pages: buffer.len(),
            batch_files,
            outcome,
        })
    }

    /// Dispatches one batch of URLs and collects the (url, record) results
    ///
    /// Result order depends on fetch completion timing and is deliberately
    /// not deterministic.
    async fn run_batch(&self, batch: Vec<Url>) -> Vec<(Url, Option<PageRecord>)> {
        let mut tasks = JoinSet::new();

        for url in batch {
            let client = self.client.clone();
            let robots = Arc::clone(&self.robots);
            let domain = self.domain.clone();
            tasks.spawn(async move { fetch_and_extract(client, robots, domain, url).await });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => tracing::error!("Fetch task panicked: {}", e),
            }
        }

        results
    }
}

/// Fetches one URL and extracts its page record
///
/// Robots denial, non-200 status, and fetch errors all yield `None`; the
/// coordinator marks the URL visited either way so it is never retried.
async fn fetch_and_extract(
    client: Client,
    robots: Arc<RobotsCache>,
    domain: String,
    url: Url,
) -> (Url, Option<PageRecord>) {
    if !robots.allowed(&url).await {
        tracing::info!("URL {} disallowed by robots.txt", url);
        return (url, None);
    }

    match fetch_page(&client, &url).await {
        FetchOutcome::Success { body } => {
            let extracted = extract_page(&body, &url, &domain);
            let record = PageRecord {
                url: url.to_string(),
                title: extracted.title,
                content: extracted.content,
                anchor_texts: extracted.anchor_texts,
                outlinks: extracted.outlinks,
                raw_html: body,
            };
            (url, Some(record))
        }
        FetchOutcome::HttpStatus { status_code } => {
            tracing::warn!("Failed to access {}: status code {}", url, status_code);
            (url, None)
        }
        FetchOutcome::NetworkError { error } => {
            tracing::warn!("Error fetching {}: {}", url, error);
            (url, None)
        }
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed; outcome says why it stopped
/// * `Err(LinkRankError)` - Setup failed or the seed was disallowed
pub async fn run_crawl(config: Config) -> Result<CrawlSummary> {
    let mut coordinator = Coordinator::new(config)?;

    // Ctrl-c halts scheduling of new batches; in-flight fetches drain,
    // bounded by the request timeout.
    let stop = coordinator.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, requesting stop");
            stop.store(true, Ordering::Relaxed);
        }
    });

    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, OutputConfig, PageRankConfig, UserAgentConfig};

    fn create_test_config(start_url: &str) -> Config {
        Config {
            crawler: CrawlerConfig {
                start_url: start_url.to_string(),
                page_budget: 10,
                max_concurrent_fetches: 4,
                request_timeout_ms: 500,
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestBot".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
            },
            pagerank: PageRankConfig::default(),
            output: OutputConfig {
                records_dir: "./test-records".to_string(),
                scores_path: "./test-scores.json".to_string(),
            },
        }
    }

    #[test]
    fn test_coordinator_derives_domain() {
        let config = create_test_config("https://cs.example.edu/index.html");
        let coordinator = Coordinator::new(config).unwrap();
        assert_eq!(coordinator.domain(), "cs.example.edu");
    }

    #[test]
    fn test_coordinator_rejects_bad_seed() {
        let config = create_test_config("not a url");
        assert!(Coordinator::new(config).is_err());
    }
}
