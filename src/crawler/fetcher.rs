//! HTTP fetcher implementation
//!
//! This module builds the shared HTTP client and performs timeout-bounded
//! page fetches. Failures are classified but never retried; the coordinator
//! treats every non-success outcome as a skip.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page returned HTTP 200 with a readable body
    Success {
        /// Page body content
        body: String,
    },

    /// The page returned a status other than 200
    HttpStatus {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request failed (timeout, connection refused, body read error)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by page and robots.txt fetches
///
/// The user agent string is formatted as `CrawlerName/Version (+ContactURL)`.
/// One timeout bounds every request; redirects follow reqwest's default
/// policy, so the fetched body belongs to the final URL of the chain.
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page with a single timeout-bounded GET
///
/// There is no retry logic: any failure is reported once and the caller
/// skips the URL. Only HTTP 200 counts as success; redirects are followed
/// transparently by the client before the status is inspected.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    match client.get(url.as_str()).send().await {
        Ok(response) => {
            let status = response.status();

            if status.as_u16() != 200 {
                return FetchOutcome::HttpStatus {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success { body },
                Err(e) => FetchOutcome::NetworkError {
                    error: format!("Failed to read body: {}", e),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            FetchOutcome::NetworkError { error }
        }
    }
}
