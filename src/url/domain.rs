use url::Url;

/// Extracts the host from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkrank::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a URL belongs to the restricting domain
///
/// A URL is in-domain when its host ends with the domain string, so
/// subdomains of the crawl's start host are included (`cs.example.edu`
/// is in-domain for `example.edu`).
///
/// # Arguments
///
/// * `url` - The URL to test
/// * `domain` - The restricting domain (lowercase host of the seed URL)
pub fn same_domain(url: &Url, domain: &str) -> bool {
    match extract_host(url) {
        Some(host) => host.ends_with(domain),
        None => false,
    }
}

/// Converts a domain to a filesystem-safe name for batch files
///
/// Every character that is not alphanumeric or an underscore becomes an
/// underscore, and leading/trailing underscores are trimmed.
///
/// # Examples
///
/// ```
/// use linkrank::url::sanitize_domain;
///
/// assert_eq!(sanitize_domain("grainger.illinois.edu"), "grainger_illinois_edu");
/// ```
pub fn sanitize_domain(domain: &str) -> String {
    let replaced: String = domain
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    replaced.trim_matches('_').to_string()
}
