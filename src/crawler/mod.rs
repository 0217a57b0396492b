//! Crawler module for web page fetching and orchestration
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeout-bounded, no-retry semantics
//! - The frontier (visited set and pending queue)
//! - Batch-concurrent crawl coordination

mod coordinator;
mod fetcher;
mod frontier;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome, CrawlSummary};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use frontier::Frontier;
