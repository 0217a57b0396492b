//! Directed link graph built from crawled page records

mod builder;

pub use builder::build_graph;

use std::collections::{HashMap, HashSet};

/// Directed graph of page URLs connected by hyperlinks
///
/// Nodes are stored in first-seen insertion order, which fixes the node
/// indexing used by the rank engine and keeps results deterministic across
/// runs for identical input. Edges are deduplicated and self-loops are
/// rejected at insertion.
#[derive(Debug, Default)]
pub struct LinkGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    out_edges: Vec<Vec<usize>>,
    edges: HashSet<(usize, usize)>,
}

impl LinkGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a URL as a node, returning its index
    ///
    /// Idempotent: a URL that is already a node keeps its index.
    pub fn add_node(&mut self, url: &str) -> usize {
        if let Some(&idx) = self.index.get(url) {
            return idx;
        }

        let idx = self.nodes.len();
        self.nodes.push(url.to_string());
        self.index.insert(url.to_string(), idx);
        self.out_edges.push(Vec::new());
        idx
    }

    /// Adds the directed edge `src -> dst`
    ///
    /// Self-loops are excluded and repeated identical edges have no effect.
    ///
    /// # Returns
    ///
    /// `true` if a new edge was inserted
    pub fn add_edge(&mut self, src: &str, dst: &str) -> bool {
        if src == dst {
            return false;
        }

        let src_idx = self.add_node(src);
        let dst_idx = self.add_node(dst);

        if !self.edges.insert((src_idx, dst_idx)) {
            return false;
        }

        self.out_edges[src_idx].push(dst_idx);
        true
    }

    /// Total number of unique nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of unique edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node URLs in insertion order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Outgoing edge targets of a node, in insertion order
    pub fn out_edges(&self, node: usize) -> &[usize] {
        &self.out_edges[node]
    }

    /// Out-degree of a node; dangling nodes have out-degree 0
    pub fn out_degree(&self, node: usize) -> usize {
        self.out_edges[node].len()
    }

    /// Looks up a node index by URL
    pub fn index_of(&self, url: &str) -> Option<usize> {
        self.index.get(url).copied()
    }
}
