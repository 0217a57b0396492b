//! LinkRank: a domain-scoped crawler and PageRank scoring pipeline
//!
//! This crate crawls pages within a target domain while respecting robots.txt,
//! persists structured page records as JSON batches, and computes a normalized
//! PageRank score map over the crawled link graph for use as a ranking signal.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod graph;
pub mod rank;
pub mod records;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for LinkRank operations
#[derive(Debug, Error)]
pub enum LinkRankError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed URL {url} is disallowed by robots.txt")]
    SeedDisallowed { url: String },

    #[error("Link graph is empty: no page records produced any nodes")]
    EmptyGraph,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for LinkRank operations
pub type Result<T> = std::result::Result<T, LinkRankError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use records::PageRecord;
pub use url::{canonicalize_url, extract_host, same_domain};
