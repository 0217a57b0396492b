//! Integration tests for the ranking pipeline
//!
//! These tests write record batch files to a temp directory and run the
//! full load-build-iterate-normalize-write pipeline against them.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use linkrank::config::PageRankConfig;
use linkrank::rank::run_ranking;
use linkrank::records::PageRecord;
use linkrank::LinkRankError;
use tempfile::TempDir;

fn record(url: &str, outlinks: &[&str]) -> PageRecord {
    PageRecord {
        url: url.to_string(),
        title: format!("Title of {url}"),
        content: "body text".to_string(),
        anchor_texts: BTreeSet::new(),
        outlinks: outlinks.iter().map(|s| s.to_string()).collect(),
        raw_html: String::new(),
    }
}

fn write_batch_file(dir: &TempDir, name: &str, records: &[PageRecord]) {
    let body = serde_json::to_string_pretty(records).unwrap();
    std::fs::write(dir.path().join(name), body).unwrap();
}

fn read_scores(path: &std::path::Path) -> BTreeMap<String, f64> {
    let body = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&body).unwrap()
}

#[test]
fn test_pipeline_ranks_hub_highest() {
    let dir = TempDir::new().unwrap();
    // Three pages all link to the hub; the hub links to one of them
    write_batch_file(
        &dir,
        "site_batch.json",
        &[
            record("https://x.com/hub", &["https://x.com/a"]),
            record("https://x.com/a", &["https://x.com/hub"]),
            record("https://x.com/b", &["https://x.com/hub"]),
            record("https://x.com/c", &["https://x.com/hub"]),
        ],
    );

    let scores_path = dir.path().join("scores.json");
    let report = run_ranking(
        &[dir.path().to_path_buf()],
        &PageRankConfig::default(),
        &scores_path,
    )
    .unwrap();

    assert_eq!(report.pages, 4);
    assert_eq!(report.links, 4);
    assert!(report.converged);

    let scores = read_scores(&scores_path);
    assert_eq!(scores.len(), 4);
    // Hub takes the top normalized score
    assert_eq!(scores["https://x.com/hub"], 1.0);
    assert!(scores["https://x.com/a"] > scores["https://x.com/b"]);
    for value in scores.values() {
        assert!(*value >= 0.0 && *value <= 1.0);
    }
}

#[test]
fn test_pipeline_merges_multiple_directories() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_batch_file(
        &first,
        "run1.json",
        &[record("https://x.com/a", &["https://x.com/b"])],
    );
    write_batch_file(
        &second,
        "run2.json",
        &[record("https://x.com/b", &["https://x.com/a"])],
    );

    let scores_path = first.path().join("scores.json");
    let report = run_ranking(
        &[first.path().to_path_buf(), second.path().to_path_buf()],
        &PageRankConfig::default(),
        &scores_path,
    )
    .unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.links, 2);
}

#[test]
fn test_pipeline_skips_corrupt_batch_file() {
    let dir = TempDir::new().unwrap();
    write_batch_file(
        &dir,
        "good.json",
        &[
            record("https://x.com/a", &["https://x.com/b"]),
            record("https://x.com/b", &[]),
        ],
    );
    std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

    let scores_path = dir.path().join("scores.json");
    let report = run_ranking(
        &[dir.path().to_path_buf()],
        &PageRankConfig::default(),
        &scores_path,
    )
    .unwrap();

    assert_eq!(report.pages, 2);
}

#[test]
fn test_pipeline_fails_on_empty_graph() {
    let dir = TempDir::new().unwrap();
    write_batch_file(&dir, "empty.json", &[]);

    let result = run_ranking(
        &[dir.path().to_path_buf()],
        &PageRankConfig::default(),
        &dir.path().join("scores.json"),
    );

    assert!(matches!(result, Err(LinkRankError::EmptyGraph)));
}

#[test]
fn test_pipeline_fails_on_missing_directory() {
    let missing = PathBuf::from("/nonexistent/linkrank-records");
    let result = run_ranking(
        &[missing],
        &PageRankConfig::default(),
        &PathBuf::from("/tmp/linkrank-scores.json"),
    );

    assert!(result.is_err());
}

#[test]
fn test_outlinks_to_uncrawled_pages_become_nodes() {
    let dir = TempDir::new().unwrap();
    // b was never crawled but is linked; it still appears in the score map
    write_batch_file(
        &dir,
        "partial.json",
        &[record("https://x.com/a", &["https://x.com/b"])],
    );

    let scores_path = dir.path().join("scores.json");
    let report = run_ranking(
        &[dir.path().to_path_buf()],
        &PageRankConfig::default(),
        &scores_path,
    )
    .unwrap();

    assert_eq!(report.pages, 2);
    let scores = read_scores(&scores_path);
    assert!(scores.contains_key("https://x.com/b"));
}
