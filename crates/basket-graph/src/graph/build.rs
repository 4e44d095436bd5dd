//! Graph construction from basket statistics.
//!
//! # Overview
//!
//! [`build_graph`] adds one node per retained item and one undirected edge
//! per pair with a non-zero co-occurrence count. Each edge carries the raw
//! count and a weight computed by the chosen [`WeightMetric`]:
//!
//! ```text
//! count    count(A,B)
//! lift     count(A,B) · n / (count(A) · count(B))
//! jaccard  count(A,B) / (count(A) + count(B) − count(A,B))
//! ```
//!
//! Nodes are inserted in item order and edges in pair order, so two graphs
//! built from equal stats are structurally identical (same node indices,
//! same edge indices).
//!
//! ## No Self-Loops
//!
//! Pairs are canonical (`a < b`), so an item can never be linked to itself.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use basket_core::{Item, WeightMetric};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::stats::{ItemStats, PairStats, pair_fits, ratio};

// ---------------------------------------------------------------------------
// Node / edge payloads
// ---------------------------------------------------------------------------

/// Node payload: the item and its support count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub item: Item,
    pub count: usize,
}

/// Edge payload: raw co-purchase count and metric weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeData {
    pub count: usize,
    pub weight: f64,
}

/// A node as plain data, for rendering layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub item: Item,
    pub count: usize,
    pub support: f64,
    pub degree: usize,
}

/// An edge as plain data, with `a < b`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub a: Item,
    pub b: Item,
    pub count: usize,
    pub weight: f64,
}

/// One neighbour of an item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbour {
    pub item: Item,
    pub count: usize,
    pub weight: f64,
}

// ---------------------------------------------------------------------------
// BasketGraph
// ---------------------------------------------------------------------------

/// An undirected co-purchase graph.
#[derive(Debug, Clone)]
pub struct BasketGraph {
    /// Undirected graph: nodes = items, edges = co-purchased pairs.
    pub graph: UnGraph<NodeData, EdgeData>,
    /// Mapping from item to petgraph `NodeIndex`.
    pub node_map: HashMap<Item, NodeIndex>,
    /// Metric used to compute [`EdgeData::weight`].
    pub metric: WeightMetric,
    /// Number of transactions behind the stats.
    pub transaction_count: usize,
    /// BLAKE3 content hash of the weighted edge set.
    pub content_hash: String,
}

/// Build the co-purchase graph from item and pair statistics.
///
/// Nodes come from `items` only. Pairs naming an item absent from `items`, or
/// whose count exceeds either item's support count, are dropped.
///
/// Metric names coming from user input are parsed with
/// `str::parse::<WeightMetric>()`, which rejects unknown names with
/// [`basket_core::BasketError::InvalidInput`].
#[instrument(skip(items, pairs), fields(items = items.len(), pairs = pairs.len()))]
pub fn build_graph(items: &ItemStats, pairs: &PairStats, metric: WeightMetric) -> BasketGraph {
    let n = items.transaction_count();
    let mut graph = UnGraph::<NodeData, EdgeData>::with_capacity(items.len(), pairs.len());
    let mut node_map: HashMap<Item, NodeIndex> = HashMap::with_capacity(items.len());

    for (item, count) in items.iter() {
        let idx = graph.add_node(NodeData {
            item: item.clone(),
            count,
        });
        node_map.insert(item.clone(), idx);
    }

    let mut edge_list: Vec<(Item, Item, EdgeData)> = Vec::with_capacity(pairs.len());
    for (pair, count) in pairs.iter() {
        // Edges only join existing nodes, so every node keeps a positive count.
        if !pair_fits(items, &pair, count) {
            continue;
        }
        let (Some(&a_idx), Some(&b_idx)) = (node_map.get(&pair.a), node_map.get(&pair.b)) else {
            continue;
        };

        let data = EdgeData {
            count,
            weight: metric_weight(metric, count, items.count(&pair.a), items.count(&pair.b), n),
        };
        graph.add_edge(a_idx, b_idx, data);
        edge_list.push((pair.a, pair.b, data));
    }

    let content_hash = compute_edge_hash(metric, &edge_list);
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        %metric,
        "built co-purchase graph"
    );

    BasketGraph {
        graph,
        node_map,
        metric,
        transaction_count: n,
        content_hash,
    }
}

/// Weight of an edge under `metric`.
///
/// `count_a`/`count_b` are the items' support counts and `n` the number of
/// transactions. Degenerate denominators yield 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn metric_weight(
    metric: WeightMetric,
    pair_count: usize,
    count_a: usize,
    count_b: usize,
    n: usize,
) -> f64 {
    match metric {
        WeightMetric::Count => pair_count as f64,
        WeightMetric::Lift => {
            if count_a == 0 || count_b == 0 {
                return 0.0;
            }
            (pair_count as f64 * n as f64) / (count_a as f64 * count_b as f64)
        }
        WeightMetric::Jaccard => {
            let union = (count_a + count_b).saturating_sub(pair_count);
            ratio(pair_count, union)
        }
    }
}

impl BasketGraph {
    /// Return the number of nodes (items) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (co-purchased pairs) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for an item.
    #[must_use]
    pub fn node_index(&self, item: &str) -> Option<NodeIndex> {
        self.node_map.get(item).copied()
    }

    /// Return the item label for a node.
    #[must_use]
    pub fn item(&self, idx: NodeIndex) -> Option<&Item> {
        self.graph.node_weight(idx).map(|node| &node.item)
    }

    #[must_use]
    pub fn has_item(&self, item: &str) -> bool {
        self.node_map.contains_key(item)
    }

    #[must_use]
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edge(a, b).is_some()
    }

    /// Edge payload between two items, if they were co-purchased.
    #[must_use]
    pub fn edge(&self, a: &str, b: &str) -> Option<EdgeData> {
        let (ia, ib) = (self.node_index(a)?, self.node_index(b)?);
        let edge = self.graph.find_edge(ia, ib)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Co-purchase count between two items; 0 when there is no edge.
    #[must_use]
    pub fn co_purchase_count(&self, a: &str, b: &str) -> usize {
        self.edge(a, b).map_or(0, |e| e.count)
    }

    /// Number of distinct items co-purchased with `item`.
    #[must_use]
    pub fn degree(&self, item: &str) -> usize {
        self.node_index(item)
            .map_or(0, |idx| self.graph.neighbors(idx).count())
    }

    /// All items, ascending.
    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.node_map.keys().cloned().collect();
        items.sort();
        items
    }

    /// Neighbours of `item` with counts and weights, ascending by item.
    ///
    /// Unknown items have no neighbours.
    #[must_use]
    pub fn neighbours(&self, item: &str) -> Vec<Neighbour> {
        let Some(idx) = self.node_index(item) else {
            return Vec::new();
        };

        let mut out: Vec<Neighbour> = self
            .graph
            .edges(idx)
            .filter_map(|edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                self.item(other).map(|item| Neighbour {
                    item: item.clone(),
                    count: edge.weight().count,
                    weight: edge.weight().weight,
                })
            })
            .collect();
        out.sort_by(|x, y| x.item.cmp(&y.item));
        out
    }

    /// Every node as plain data, ascending by item.
    #[must_use]
    pub fn nodes(&self) -> Vec<GraphNode> {
        let mut nodes: Vec<GraphNode> = self
            .graph
            .node_indices()
            .filter_map(|idx| {
                self.graph.node_weight(idx).map(|node| GraphNode {
                    item: node.item.clone(),
                    count: node.count,
                    support: ratio(node.count, self.transaction_count),
                    degree: self.graph.neighbors(idx).count(),
                })
            })
            .collect();
        nodes.sort_by(|x, y| x.item.cmp(&y.item));
        nodes
    }

    /// Every edge as plain data, ascending by `(a, b)`.
    #[must_use]
    pub fn edges(&self) -> Vec<GraphEdge> {
        let mut edges: Vec<GraphEdge> = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                let x = self.item(edge.source())?;
                let y = self.item(edge.target())?;
                let (a, b) = if x <= y { (x, y) } else { (y, x) };
                Some(GraphEdge {
                    a: a.clone(),
                    b: b.clone(),
                    count: edge.weight().count,
                    weight: edge.weight().weight,
                })
            })
            .collect();
        edges.sort_by(|x, y| x.a.cmp(&y.a).then_with(|| x.b.cmp(&y.b)));
        edges
    }

    /// Neighbour indices of `idx`, ordered by item.
    pub(crate) fn sorted_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        neighbors.sort_by(|x, y| self.item(*x).cmp(&self.item(*y)));
        neighbors.dedup();
        neighbors
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute a BLAKE3 hash of the weighted edge list for cache invalidation.
fn compute_edge_hash(metric: WeightMetric, edges: &[(Item, Item, EdgeData)]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(metric.as_str().as_bytes());
    hasher.update(b"\x00");
    for (a, b, data) in edges {
        hasher.update(a.as_bytes());
        hasher.update(b"\x00");
        hasher.update(b.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&data.count.to_le_bytes());
        hasher.update(&data.weight.to_bits().to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
