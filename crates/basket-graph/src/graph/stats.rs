//! Summary statistics for the co-purchase graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Number of items in the graph.
//! - **edge_count**: Number of co-purchased pairs.
//! - **density**: `2 · edge_count / (node_count · (node_count − 1))` for an
//!   undirected graph. Zero for graphs with fewer than two nodes.
//! - **component_count**: Number of connected components. Items in different
//!   components were never bought together, directly or transitively.
//! - **isolated_node_count**: Items never bought alongside another retained
//!   item.
//! - **max_degree**: Most distinct co-purchase partners of any single item.
//! - **total_co_purchases**: Sum of raw edge counts.

use petgraph::algo::connected_components;
use serde::Serialize;

use super::build::BasketGraph;

/// Summary statistics for a [`BasketGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    pub total_co_purchases: usize,
}

impl GraphStats {
    /// Compute statistics from a [`BasketGraph`].
    #[must_use]
    pub fn from_graph(bg: &BasketGraph) -> Self {
        let node_count = bg.node_count();
        let edge_count = bg.edge_count();

        let degrees: Vec<usize> = bg
            .graph
            .node_indices()
            .map(|idx| bg.graph.neighbors(idx).count())
            .collect();

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            component_count: connected_components(&bg.graph),
            isolated_node_count: degrees.iter().filter(|&&d| d == 0).count(),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            total_co_purchases: bg.graph.edge_weights().map(|e| e.count).sum(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64 / 2.0;
    edge_count as f64 / max_edges
}
