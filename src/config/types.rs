use serde::Deserialize;

/// Main configuration structure for LinkRank
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub pagerank: PageRankConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URL; its host defines the restricting domain for the crawl
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum number of page records to collect per crawl run
    #[serde(rename = "page-budget")]
    pub page_budget: usize,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Per-request timeout in milliseconds (also bounds robots.txt fetches)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// PageRank computation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PageRankConfig {
    /// Damping factor: probability mass following an actual link per step
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// L1 convergence tolerance for power iteration
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum number of power iterations
    #[serde(rename = "max-iterations", default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Multiplier applied to raw rank mass before log compression
    #[serde(rename = "scaling-factor", default = "default_scaling_factor")]
    pub scaling_factor: f64,
}

fn default_damping() -> f64 {
    0.85
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_iterations() -> u32 {
    100
}

fn default_scaling_factor() -> f64 {
    10_000.0
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            scaling_factor: default_scaling_factor(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory where page record batches are written
    #[serde(rename = "records-dir")]
    pub records_dir: String,

    /// Path of the normalized score map JSON file
    #[serde(rename = "scores-path")]
    pub scores_path: String,
}
