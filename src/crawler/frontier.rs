//! Crawl frontier: visited set and pending URL queue
//!
//! The frontier is owned exclusively by the coordinator; fetch tasks never
//! touch it. Two sets guard its invariants: `enqueued` records every URL
//! that has ever entered the queue (so a URL enters `pending` at most once),
//! and `visited` records URLs whose processing has finished (so a visited
//! URL is never re-enqueued).

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO-biased frontier drained in concurrent batches
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be fetched, in discovery order
    pending: VecDeque<Url>,

    /// Every URL that has ever been enqueued (never shrinks)
    enqueued: HashSet<String>,

    /// URLs whose processing has completed, successfully or not
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL unless it was already enqueued or visited
    ///
    /// # Returns
    ///
    /// `true` if the URL was added to the pending queue
    pub fn enqueue(&mut self, url: Url) -> bool {
        let key = url.as_str().to_string();

        if self.visited.contains(&key) || !self.enqueued.insert(key) {
            return false;
        }

        self.pending.push_back(url);
        true
    }

    /// Drains up to `max` URLs for one concurrent fetch batch
    ///
    /// Already-visited URLs are skipped and dropped. Because `enqueue`
    /// admits each URL at most once, a batch never contains duplicates and
    /// no URL can be in flight twice.
    pub fn drain_batch(&mut self, max: usize) -> Vec<Url> {
        let mut batch = Vec::with_capacity(max.min(self.pending.len()));

        while batch.len() < max {
            match self.pending.pop_front() {
                Some(url) if self.visited.contains(url.as_str()) => continue,
                Some(url) => batch.push(url),
                None => break,
            }
        }

        batch
    }

    /// Marks a URL as visited after its processing completed
    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    /// Returns true if the URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs waiting in the queue
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of visited URLs
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Returns true if no URLs remain to fetch
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}
