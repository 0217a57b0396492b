//! Minimal robots.txt parser
//!
//! Only `Disallow:` lines are honored, and their values are treated as
//! literal path prefixes. `Allow:` lines, wildcards, and crawl-delay are
//! intentionally unsupported; widening this parser to RFC semantics would
//! change which URLs the crawler skips.

/// Per-host disallow rules parsed from a robots.txt body
///
/// An empty rule list means the host is unrestricted, which is also the
/// fail-open result when robots.txt could not be fetched.
#[derive(Debug, Clone, Default)]
pub struct DisallowRules {
    rules: Vec<String>,
}

impl DisallowRules {
    /// Parses robots.txt content line by line
    ///
    /// Any line whose trimmed, lowercased form begins with `disallow:`
    /// contributes the trimmed text after the first `:` as a rule. A bare
    /// `Disallow:` with no value yields an empty prefix, which matches every
    /// path (the strictest reading, kept from the reference behavior).
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt file content
    pub fn parse(content: &str) -> Self {
        let mut rules = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if !trimmed.to_lowercase().starts_with("disallow:") {
                continue;
            }
            if let Some((_, value)) = trimmed.split_once(':') {
                rules.push(value.trim().to_string());
            }
        }

        Self { rules }
    }

    /// Creates an empty rule set that allows every path
    ///
    /// Used as the fail-open default when robots.txt cannot be fetched.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Checks whether a URL path is allowed under these rules
    ///
    /// # Arguments
    ///
    /// * `path` - The URL path to check (e.g., "/private/x")
    ///
    /// # Returns
    ///
    /// `true` iff no rule is a prefix of the path
    pub fn is_allowed(&self, path: &str) -> bool {
        !self.rules.iter().any(|rule| path.starts_with(rule.as_str()))
    }

    /// Number of disallow rules for this host
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if this host has no restrictions
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
