//! Per-host robots.txt politeness cache
//!
//! Rules are fetched once per host and cached for the lifetime of a crawl
//! run; entries are never invalidated mid-run.

use crate::robots::DisallowRules;
use reqwest::Client;
use std::collections::HashMap;
use tokio::sync::RwLock;
use url::Url;

/// Caches per-host disallow rules for one crawl run
///
/// The first query for a host fetches `scheme://host/robots.txt` with the
/// shared client (and therefore the shared request timeout). Any non-200
/// response or fetch error stores an empty rule set, treating the host as
/// fully allowed (fail-open).
///
/// Concurrent first accesses to the same host are not synchronized: two
/// tasks may both miss the cache and fetch robots.txt redundantly. The
/// second insert overwrites the first with identical rules, so this race
/// costs at most one extra request per host.
pub struct RobotsCache {
    client: Client,
    rules: RwLock<HashMap<String, DisallowRules>>,
}

impl RobotsCache {
    /// Creates a new cache backed by the given HTTP client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            rules: RwLock::new(HashMap::new()),
        }
    }

    /// Checks whether a URL may be fetched under its host's robots.txt
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to check; its host selects the cached rule set
    ///
    /// # Returns
    ///
    /// `true` iff no cached disallow prefix matches the URL's path
    pub async fn allowed(&self, url: &Url) -> bool {
        let authority = match authority_of(url) {
            Some(a) => a,
            // URLs without a host never reach the fetcher; allow by default
            None => return true,
        };

        {
            let cached = self.rules.read().await;
            if let Some(rules) = cached.get(&authority) {
                return rules.is_allowed(url.path());
            }
        }

        let rules = self.fetch_rules(url.scheme(), &authority).await;
        let allowed = rules.is_allowed(url.path());

        self.rules.write().await.insert(authority, rules);

        allowed
    }

    /// Fetches and parses robots.txt for a host, failing open on any error
    async fn fetch_rules(&self, scheme: &str, authority: &str) -> DisallowRules {
        let robots_url = format!("{}://{}/robots.txt", scheme, authority);
        tracing::debug!("Fetching robots.txt: {}", robots_url);

        match self.client.get(&robots_url).send().await {
            Ok(response) if response.status().as_u16() == 200 => match response.text().await {
                Ok(body) => {
                    let rules = DisallowRules::parse(&body);
                    tracing::debug!(
                        "Parsed {} disallow rules for {}",
                        rules.len(),
                        authority
                    );
                    rules
                }
                Err(e) => {
                    tracing::warn!("Failed to read robots.txt body for {}: {}", authority, e);
                    DisallowRules::unrestricted()
                }
            },
            Ok(response) => {
                tracing::debug!(
                    "robots.txt for {} returned HTTP {}, treating host as unrestricted",
                    authority,
                    response.status()
                );
                DisallowRules::unrestricted()
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch robots.txt for {}: {}, treating host as unrestricted",
                    authority,
                    e
                );
                DisallowRules::unrestricted()
            }
        }
    }

    /// Number of hosts with cached rules
    pub async fn cached_hosts(&self) -> usize {
        self.rules.read().await.len()
    }
}

/// Builds the host[:port] key used for cache lookups and the robots URL
fn authority_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}
