//! Ranking queries over the co-purchase graph.
//!
//! All functions return owned, deterministically ordered data; ties are
//! always broken by item name so repeated calls agree.

use std::cmp::Ordering;

use tracing::instrument;

use super::build::{BasketGraph, GraphEdge, Neighbour};

/// Items most strongly associated with `item`.
///
/// Neighbours are ranked by edge weight (per the graph's metric) descending,
/// then raw count descending, then item ascending. Unknown items yield an
/// empty list.
#[must_use]
#[instrument(skip(graph))]
pub fn recommend(graph: &BasketGraph, item: &str, top_n: usize) -> Vec<Neighbour> {
    let mut neighbours = graph.neighbours(item);
    neighbours.sort_by(|x, y| {
        y.weight
            .total_cmp(&x.weight)
            .then_with(|| y.count.cmp(&x.count))
            .then_with(|| x.item.cmp(&y.item))
    });
    neighbours.truncate(top_n);
    neighbours
}

/// Pairs co-purchased at least `min_count` times, ascending by pair.
#[must_use]
pub fn frequent_pairs(graph: &BasketGraph, min_count: usize) -> Vec<GraphEdge> {
    graph
        .edges()
        .into_iter()
        .filter(|edge| edge.count >= min_count)
        .collect()
}

/// The `k` pairs bought together most often (raw count), ties by pair.
#[must_use]
pub fn top_bundles(graph: &BasketGraph, k: usize) -> Vec<GraphEdge> {
    top_edges_by(graph, k, |x, y| {
        y.count
            .cmp(&x.count)
            .then_with(|| y.weight.total_cmp(&x.weight))
    })
}

/// The `k` heaviest edges under the graph's metric.
///
/// Ranked by weight descending, then count descending, then pair ascending.
#[must_use]
pub fn strongest_associations(graph: &BasketGraph, k: usize) -> Vec<GraphEdge> {
    top_edges_by(graph, k, |x, y| {
        y.weight
            .total_cmp(&x.weight)
            .then_with(|| y.count.cmp(&x.count))
    })
}

fn top_edges_by(
    graph: &BasketGraph,
    k: usize,
    primary: impl Fn(&GraphEdge, &GraphEdge) -> Ordering,
) -> Vec<GraphEdge> {
    let mut edges = graph.edges();
    edges.sort_by(|x, y| {
        primary(x, y)
            .then_with(|| x.a.cmp(&y.a))
            .then_with(|| x.b.cmp(&y.b))
    });
    edges.truncate(k);
    edges
}
