//! Page extractor: title, content excerpt, anchor texts, and outlinks
//!
//! Content selection walks an explicit ordered list of named container
//! strategies; the first container with non-empty text wins, and a bounded
//! whole-page excerpt is the final fallback. Outlinks are restricted to the
//! crawl's domain and have their fragments stripped.

use crate::url::{canonicalize_url, same_domain};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Ordered content extraction strategies; the first non-empty match wins
const CONTENT_STRATEGIES: &[(&str, &str)] = &[
    ("article", "article"),
    ("main", "main"),
    ("content-div", "div.content"),
    ("main-content-div", "div.main-content"),
    ("post-content-div", "div.post-content"),
];

/// Maximum excerpt length when falling back to whole-page text
const FALLBACK_EXCERPT_CHARS: usize = 2000;

/// Extracted information from one HTML page
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// Text of the first `<title>` element, or empty
    pub title: String,

    /// Bounded content excerpt
    pub content: String,

    /// Deduplicated anchor texts
    pub anchor_texts: BTreeSet<String>,

    /// Same-domain absolute outlinks, fragments stripped
    pub outlinks: BTreeSet<String>,
}

/// Extracts structured page data from fetched HTML
///
/// # Arguments
///
/// * `html` - The raw HTML body
/// * `base_url` - The page's URL, used to resolve relative links
/// * `domain` - The restricting domain; outlinks outside it are dropped
///
/// # Example
///
/// ```
/// use linkrank::extract::extract_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// let page = extract_page(html, &base, "example.com");
/// assert_eq!(page.title, "Test");
/// assert!(page.outlinks.contains("https://example.com/page"));
/// ```
pub fn extract_page(html: &str, base_url: &Url, domain: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        title: extract_title(&document),
        content: extract_content(&document),
        anchor_texts: extract_anchor_texts(&document),
        outlinks: extract_outlinks(&document, base_url, domain),
    }
}

/// Extracts the first `<title>` text, trimmed; empty when absent
fn extract_title(document: &Html) -> String {
    let selector = Selector::parse("title").expect("static selector");

    document
        .select(&selector)
        .next()
        .map(|element| collapsed_text(element.text()))
        .unwrap_or_default()
}

/// Picks content from the first matching strategy, else a bounded excerpt
fn extract_content(document: &Html) -> String {
    for (name, css) in CONTENT_STRATEGIES {
        let selector = Selector::parse(css).expect("static selector");
        if let Some(element) = document.select(&selector).next() {
            let text = collapsed_text(element.text());
            if !text.is_empty() {
                tracing::trace!("Content extracted via '{}' strategy", name);
                return text;
            }
        }
    }

    // No container matched: fall back to the start of the whole-page text
    let full = collapsed_text(document.root_element().text());
    full.chars().take(FALLBACK_EXCERPT_CHARS).collect()
}

/// Collects the deduplicated set of non-empty anchor texts
fn extract_anchor_texts(document: &Html) -> BTreeSet<String> {
    let selector = Selector::parse("a[href]").expect("static selector");

    document
        .select(&selector)
        .map(|element| collapsed_text(element.text()))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Resolves `<a href>` targets to absolute in-domain URLs
///
/// Links with non-HTTP(S) schemes (javascript:, mailto:, tel:, data:) fail
/// canonicalization and are dropped. Fragment-only links resolve to the page
/// itself; the graph builder excludes the resulting self-loop.
fn extract_outlinks(document: &Html, base_url: &Url, domain: &str) -> BTreeSet<String> {
    let selector = Selector::parse("a[href]").expect("static selector");
    let mut outlinks = BTreeSet::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h.trim(),
            None => continue,
        };

        if href.is_empty() {
            continue;
        }

        let resolved = match base_url.join(href) {
            Ok(url) => url,
            Err(_) => continue,
        };

        let canonical = match canonicalize_url(resolved.as_str()) {
            Ok(url) => url,
            Err(_) => continue,
        };

        if same_domain(&canonical, domain) {
            outlinks.insert(canonical.to_string());
        }
    }

    outlinks
}

/// Joins an element's text nodes, trimming each and collapsing whitespace runs
fn collapsed_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();

    for part in parts {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(trimmed);
    }

    out
}
