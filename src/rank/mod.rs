//! Offline ranking pipeline
//!
//! Reads crawl record batches from disk, builds the link graph, runs the
//! power iteration, normalizes the result, and writes a URL-to-score map
//! as pretty-printed JSON. Each stage is logged so long runs can be
//! followed from the console.

pub mod normalize;
pub mod pagerank;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::PageRankConfig;
use crate::graph::build_graph;
use crate::records::load_records;
use crate::Result;

pub use normalize::normalize_scores;
pub use pagerank::{power_iteration, RankResult};

/// Summary of a completed ranking run
#[derive(Debug)]
pub struct RankReport {
    /// Number of pages in the graph
    pub pages: usize,

    /// Number of deduplicated links in the graph
    pub links: usize,

    /// Iterations the power iteration performed
    pub iterations: u32,

    /// Whether the iteration converged before hitting its cap
    pub converged: bool,

    /// Where the score map was written
    pub scores_path: PathBuf,
}

/// Runs the full ranking pipeline over one or more record directories
///
/// Record files from all directories are merged before graph construction,
/// so a domain crawled across several sessions ranks as one corpus.
///
/// # Arguments
///
/// * `record_dirs` - Directories holding crawl record batch files
/// * `params` - PageRank damping, tolerance, iteration cap, and scaling
/// * `scores_path` - Destination for the JSON score map
pub fn run_ranking(
    record_dirs: &[PathBuf],
    params: &PageRankConfig,
    scores_path: &Path,
) -> Result<RankReport> {
    let records = load_records(record_dirs)?;
    info!("Loaded {} crawl records", records.len());

    let graph = build_graph(&records)?;

    info!(
        "Running power iteration (damping {}, tolerance {})",
        params.damping, params.tolerance
    );
    let result = power_iteration(&graph, params);
    if result.converged {
        info!("Converged after {} iterations", result.iterations);
    } else {
        info!(
            "Stopped at the {}-iteration cap without converging",
            result.iterations
        );
    }

    info!("Normalizing scores (scaling factor {})", params.scaling_factor);
    let normalized = normalize_scores(&result.ranks, params.scaling_factor);

    let scores: BTreeMap<&str, f64> = graph
        .nodes()
        .iter()
        .map(String::as_str)
        .zip(normalized)
        .collect();
    write_scores(scores_path, &scores)?;
    info!("Wrote {} scores to {}", scores.len(), scores_path.display());

    Ok(RankReport {
        pages: graph.node_count(),
        links: graph.edge_count(),
        iterations: result.iterations,
        converged: result.converged,
        scores_path: scores_path.to_path_buf(),
    })
}

/// Writes a score map as pretty-printed JSON, creating parent directories
fn write_scores(path: &Path, scores: &BTreeMap<&str, f64>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(scores)?;
    fs::write(path, json)?;
    Ok(())
}
