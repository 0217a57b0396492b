//! URL handling module for LinkRank
//!
//! This module provides URL canonicalization, host extraction, and the
//! same-domain test that restricts the crawl to the seed's domain.

mod canonicalize;
mod domain;

pub use canonicalize::canonicalize_url;
pub use domain::{extract_host, same_domain, sanitize_domain};
