//! Page record persistence
//!
//! A crawl run emits batches of page records as JSON arrays; the rank
//! pipeline later reads one or more directories of those batches back.
//! Records are immutable once written.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Structured result of fetching and extracting one page
///
/// Produced once per successfully fetched URL and never mutated afterward.
/// `anchor_texts` and `outlinks` are sets; `BTreeSet` keeps the serialized
/// form stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Canonical URL of the page (identity key)
    pub url: String,

    /// Page title, or empty if the page had no `<title>`
    #[serde(default)]
    pub title: String,

    /// Bounded content excerpt
    #[serde(default)]
    pub content: String,

    /// Deduplicated anchor texts found on the page
    #[serde(default)]
    pub anchor_texts: BTreeSet<String>,

    /// Same-domain absolute outlinks with fragments stripped
    #[serde(default)]
    pub outlinks: BTreeSet<String>,

    /// Raw HTML body as fetched
    #[serde(default)]
    pub raw_html: String,
}

/// Writes one batch of page records as a JSON array
///
/// The file is named `{domain}_{stamp}_round{round}.json` under `dir`,
/// which is created if missing. Empty batches are not written.
///
/// # Arguments
///
/// * `dir` - Directory for batch files
/// * `domain` - Sanitized domain used in the file name
/// * `stamp` - Timestamp string shared by all batches of one run
/// * `round` - 1-based batch number within the run
/// * `records` - The records to persist
///
/// # Returns
///
/// * `Ok(Some(path))` - Path of the written batch file
/// * `Ok(None)` - The batch was empty, nothing written
/// * `Err(LinkRankError)` - IO or serialization failure
pub fn write_batch(
    dir: &Path,
    domain: &str,
    stamp: &str,
    round: u32,
    records: &[PageRecord],
) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_{}_round{}.json", domain, stamp, round));
    let json = serde_json::to_string_pretty(records)?;
    fs::write(&path, json)?;

    tracing::info!("Saved {} page records to {}", records.len(), path.display());
    Ok(Some(path))
}

/// Loads page records from one or more directories, searched recursively
///
/// Every `*.json` file found is expected to hold a PageRecord array.
/// Unreadable or corrupt files are logged and skipped; they never abort
/// the load. A missing input directory is an error.
///
/// # Arguments
///
/// * `dirs` - Directories to search
///
/// # Returns
///
/// All records from every parseable batch file, in directory-walk order
pub fn load_records(dirs: &[PathBuf]) -> Result<Vec<PageRecord>> {
    let mut records = Vec::new();

    for dir in dirs {
        let mut files = Vec::new();
        collect_json_files(dir, &mut files)?;
        // Stable input order regardless of filesystem enumeration order
        files.sort();

        for file in files {
            match read_batch(&file) {
                Ok(batch) => {
                    tracing::debug!("Loaded {} records from {}", batch.len(), file.display());
                    records.extend(batch);
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable batch file {}: {}", file.display(), e);
                }
            }
        }
    }

    Ok(records)
}

/// Recursively collects `*.json` files under a directory
fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.extension().map(|e| e == "json").unwrap_or(false) {
            out.push(path);
        }
    }

    Ok(())
}

/// Reads and parses a single batch file
fn read_batch(path: &Path) -> Result<Vec<PageRecord>> {
    let content = fs::read_to_string(path)?;
    let batch: Vec<PageRecord> = serde_json::from_str(&content)?;
    Ok(batch)
}
