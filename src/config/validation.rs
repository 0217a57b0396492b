use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, PageRankConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_pagerank_config(&config.pagerank)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let start = Url::parse(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start-url: {}", e)))?;

    if start.scheme() != "http" && start.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "start-url must be http or https, got scheme '{}'",
            start.scheme()
        )));
    }

    if start.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "start-url has no host".to_string(),
        ));
    }

    if config.page_budget < 1 {
        return Err(ConfigError::Validation(format!(
            "page-budget must be >= 1, got {}",
            config.page_budget
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.request_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-ms must be >= 100ms, got {}ms",
            config.request_timeout_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

/// Validates PageRank parameters
fn validate_pagerank_config(config: &PageRankConfig) -> Result<(), ConfigError> {
    if !(config.damping > 0.0 && config.damping < 1.0) {
        return Err(ConfigError::Validation(format!(
            "damping must be strictly between 0 and 1, got {}",
            config.damping
        )));
    }

    if !(config.tolerance > 0.0) {
        return Err(ConfigError::Validation(format!(
            "tolerance must be > 0, got {}",
            config.tolerance
        )));
    }

    if config.max_iterations < 1 {
        return Err(ConfigError::Validation(format!(
            "max-iterations must be >= 1, got {}",
            config.max_iterations
        )));
    }

    if !(config.scaling_factor > 0.0) {
        return Err(ConfigError::Validation(format!(
            "scaling-factor must be > 0, got {}",
            config.scaling_factor
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.records_dir.is_empty() {
        return Err(ConfigError::Validation(
            "records-dir cannot be empty".to_string(),
        ));
    }

    if config.scores_path.is_empty() {
        return Err(ConfigError::Validation(
            "scores-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
