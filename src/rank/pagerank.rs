//! Damped power iteration over the link graph
//!
//! The transition matrix is never materialized: each step scatters rank
//! mass along out-edges weighted 1/out_degree. Dangling nodes spread their
//! whole mass uniformly over all nodes in the same step, before damping is
//! applied, so the rank vector keeps summing to 1.0 whether or not the
//! iteration converges.

use crate::config::PageRankConfig;
use crate::graph::LinkGraph;

/// Result of a power iteration run
#[derive(Debug)]
pub struct RankResult {
    /// Rank value per node, indexed like `LinkGraph::nodes()`
    pub ranks: Vec<f64>,

    /// Number of iterations performed
    pub iterations: u32,

    /// Whether the L1 delta fell below tolerance before max iterations
    pub converged: bool,
}

/// Computes the stationary rank vector of a graph
///
/// Starts from the uniform vector `1/N` and applies
/// `r' = damping * M^T * r + (1 - damping) / N` until the L1 difference
/// between successive vectors drops below `tolerance` or `max_iterations`
/// is reached, whichever comes first.
///
/// The loop is sequential and node order is fixed by the graph, so results
/// are bit-for-bit reproducible for identical input.
///
/// # Arguments
///
/// * `graph` - The link graph; must have at least one node
/// * `params` - Damping factor, tolerance, and iteration cap
pub fn power_iteration(graph: &LinkGraph, params: &PageRankConfig) -> RankResult {
    let n = graph.node_count();
    if n == 0 {
        return RankResult {
            ranks: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let mut ranks = vec![1.0 / n as f64; n];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..params.max_iterations {
        let next = step(graph, &ranks, params.damping);
        iterations += 1;

        let delta: f64 = next
            .iter()
            .zip(ranks.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        ranks = next;

        if delta < params.tolerance {
            converged = true;
            break;
        }
    }

    RankResult {
        ranks,
        iterations,
        converged,
    }
}

/// Applies one damped transition step to a rank vector
///
/// Dangling mass is redistributed uniformly before damping, which keeps
/// the output summing to 1.0 when the input does.
pub(crate) fn step(graph: &LinkGraph, ranks: &[f64], damping: f64) -> Vec<f64> {
    let n = graph.node_count();
    let uniform = 1.0 / n as f64;
    let mut next = vec![(1.0 - damping) * uniform; n];

    let mut dangling_mass = 0.0;
    for (node, &rank) in ranks.iter().enumerate() {
        let degree = graph.out_degree(node);
        if degree == 0 {
            dangling_mass += rank;
            continue;
        }

        let share = damping * rank / degree as f64;
        for &target in graph.out_edges(node) {
            next[target] += share;
        }
    }

    // Dangling nodes link uniformly to every node, themselves included
    let dangling_share = damping * dangling_mass * uniform;
    for value in next.iter_mut() {
        *value += dangling_share;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn params() -> PageRankConfig {
        PageRankConfig::default()
    }

    fn sum(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    fn mutual_pair() -> LinkGraph {
        let mut graph = LinkGraph::new();
        graph.add_edge("https://a.com/", "https://a.com/b");
        graph.add_edge("https://a.com/b", "https://a.com/");
        graph
    }

    fn dangling_chain() -> LinkGraph {
        // A -> B -> C, C has no outlinks
        let mut graph = LinkGraph::new();
        graph.add_edge("https://x.com/a", "https://x.com/b");
        graph.add_edge("https://x.com/b", "https://x.com/c");
        graph
    }

    #[test]
    fn test_two_node_mutual_graph_splits_evenly() {
        let result = power_iteration(&mutual_pair(), &params());

        assert!(result.converged);
        assert!((result.ranks[0] - 0.5).abs() < 1e-6);
        assert!((result.ranks[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mass_conserved_with_dangling_node() {
        let graph = dangling_chain();
        let result = power_iteration(&graph, &params());

        assert!((sum(&result.ranks) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mass_conserved_every_step() {
        let graph = dangling_chain();
        let mut ranks = vec![1.0 / 3.0; 3];

        for _ in 0..10 {
            ranks = step(&graph, &ranks, 0.85);
            assert!((sum(&ranks) - 1.0).abs() < TOL);
        }
    }

    #[test]
    fn test_dangling_mass_spread_uniformly() {
        let graph = dangling_chain();
        // Start with all mass on the dangling node C
        let ranks = vec![0.0, 0.0, 1.0];
        let next = step(&graph, &ranks, 0.85);

        // C's mass splits evenly across all three nodes (after damping)
        let expected = 0.85 / 3.0 + 0.15 / 3.0;
        for value in &next {
            assert!((value - expected).abs() < TOL);
        }
    }

    #[test]
    fn test_fixed_point_is_stable() {
        let graph = dangling_chain();
        let converged = power_iteration(&graph, &params());
        assert!(converged.converged);

        let again = step(&graph, &converged.ranks, params().damping);
        let delta: f64 = again
            .iter()
            .zip(converged.ranks.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        assert!(delta < params().tolerance);
    }

    #[test]
    fn test_outgoing_weights_are_stochastic() {
        // Push a unit of mass through one hub node and check its out-edge
        // shares plus the jump term account for everything.
        let mut graph = LinkGraph::new();
        graph.add_edge("https://x.com/hub", "https://x.com/a");
        graph.add_edge("https://x.com/hub", "https://x.com/b");
        graph.add_edge("https://x.com/hub", "https://x.com/c");
        graph.add_edge("https://x.com/a", "https://x.com/hub");
        graph.add_edge("https://x.com/b", "https://x.com/hub");
        graph.add_edge("https://x.com/c", "https://x.com/hub");

        let hub = graph.index_of("https://x.com/hub").unwrap();
        let mut ranks = vec![0.0; graph.node_count()];
        ranks[hub] = 1.0;

        let next = step(&graph, &ranks, 0.85);
        // Hub's damped mass went somewhere; jump term supplies the rest
        assert!((sum(&next) - 1.0).abs() < TOL);

        // Each of hub's three targets received an equal 1/3 share
        for url in ["https://x.com/a", "https://x.com/b", "https://x.com/c"] {
            let idx = graph.index_of(url).unwrap();
            assert!((next[idx] - (0.85 / 3.0 + 0.15 / 4.0)).abs() < TOL);
        }
    }

    #[test]
    fn test_single_node_graph() {
        let mut graph = LinkGraph::new();
        graph.add_node("https://only.com/");

        let result = power_iteration(&graph, &params());
        assert!(result.converged);
        assert_eq!(result.ranks.len(), 1);
        assert!((result.ranks[0] - 1.0).abs() < TOL);
    }

    #[test]
    fn test_max_iterations_respected() {
        let mut tight = params();
        tight.max_iterations = 2;
        tight.tolerance = 1e-15;

        // Asymmetric graph that needs more than two iterations
        let mut graph = LinkGraph::new();
        graph.add_edge("https://x.com/a", "https://x.com/b");
        graph.add_edge("https://x.com/b", "https://x.com/c");
        graph.add_edge("https://x.com/c", "https://x.com/a");
        graph.add_edge("https://x.com/a", "https://x.com/c");

        let result = power_iteration(&graph, &tight);
        assert_eq!(result.iterations, 2);
        assert!(!result.converged);
        // Sum invariant holds regardless of convergence
        assert!((sum(&result.ranks) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let graph = dangling_chain();
        let first = power_iteration(&graph, &params());
        let second = power_iteration(&graph, &params());
        assert_eq!(first.ranks, second.ranks);
    }
}
