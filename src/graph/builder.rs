//! Link graph construction from page record batches

use crate::graph::LinkGraph;
use crate::records::PageRecord;
use crate::{LinkRankError, Result};

/// Builds a directed link graph from page records
///
/// Each record with a non-empty `url` becomes a node; every outlink other
/// than the page itself contributes an edge. Records missing a URL are
/// skipped without aborting the batch. Repeated edges collapse to one and
/// self-loops never appear.
///
/// # Arguments
///
/// * `records` - Page records from one or more crawl batches
///
/// # Returns
///
/// * `Ok(LinkGraph)` - The constructed graph with at least one node
/// * `Err(LinkRankError::EmptyGraph)` - No record produced any node
pub fn build_graph(records: &[PageRecord]) -> Result<LinkGraph> {
    let mut graph = LinkGraph::new();
    let mut skipped = 0usize;

    for record in records {
        if record.url.is_empty() {
            skipped += 1;
            continue;
        }

        graph.add_node(&record.url);

        for outlink in &record.outlinks {
            if outlink != &record.url {
                graph.add_edge(&record.url, outlink);
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} records with missing URLs", skipped);
    }

    if graph.node_count() == 0 {
        return Err(LinkRankError::EmptyGraph);
    }

    tracing::info!(
        "Built link graph: {} pages, {} links",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}
