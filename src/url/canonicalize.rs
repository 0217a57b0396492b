use crate::UrlError;
use url::Url;

/// Canonicalizes a URL string into the form used for dedup and graph identity
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an http or https scheme
/// 3. Require a host
/// 4. Strip the fragment (everything after #)
///
/// Scheme, host, path, and query are kept as parsed; the resulting string is
/// the identity key for the visited set and for link graph nodes.
///
/// # Arguments
///
/// * `url_str` - The URL string to canonicalize
///
/// # Returns
///
/// * `Ok(Url)` - Canonical URL
/// * `Err(UrlError)` - Failed to parse or an unsupported scheme
///
/// # Examples
///
/// ```
/// use linkrank::url::canonicalize_url;
///
/// let url = canonicalize_url("https://example.com/page#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn canonicalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fragment() {
        let result = canonicalize_url("https://example.com/page#section").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_keep_query() {
        let result = canonicalize_url("https://example.com/page?q=1").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page?q=1");
    }

    #[test]
    fn test_keep_query_strip_fragment() {
        let result = canonicalize_url("https://example.com/page?q=1#top").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page?q=1");
    }

    #[test]
    fn test_http_allowed() {
        let result = canonicalize_url("http://example.com/page").unwrap();
        assert_eq!(result.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = canonicalize_url("ftp://example.com/page");
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_malformed_url() {
        let result = canonicalize_url("not a url");
        assert!(matches!(result.unwrap_err(), UrlError::Parse(_)));
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let result = canonicalize_url("https://example.com").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }
}
