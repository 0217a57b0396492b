//! Robots.txt handling module
//!
//! This module provides a deliberately minimal robots.txt implementation:
//! literal `Disallow:` path prefixes, cached per host for the life of one
//! crawl run, with fail-open behavior on any fetch problem.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::DisallowRules;
