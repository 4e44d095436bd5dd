//! Related-item discovery by graph traversal.
//!
//! - [`bfs_related`] explores level by level: direct co-purchases first,
//!   then items reachable through them.
//! - [`dfs_related`] follows chains of co-purchases as deep as they go
//!   before backtracking.
//!
//! Both return every item reachable from the start item, excluding the start
//! item itself. Neighbours are expanded in item order so the output is
//! reproducible. Both are iterative; long chains do not grow the call stack.

use std::collections::VecDeque;

use basket_core::Item;
use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;

use super::build::BasketGraph;

/// Items reachable from `start`, in breadth-first order.
///
/// Returns an empty list if `start` is not in the graph.
#[must_use]
pub fn bfs_related(graph: &BasketGraph, start: &str) -> Vec<Item> {
    let Some(root) = graph.node_index(start) else {
        return Vec::new();
    };

    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    visited.insert(root.index());
    let mut queue = VecDeque::from([root]);
    let mut related = Vec::new();

    while let Some(current) = queue.pop_front() {
        for neighbour in graph.sorted_neighbors(current) {
            if visited.put(neighbour.index()) {
                continue;
            }
            related.extend(graph.item(neighbour).cloned());
            queue.push_back(neighbour);
        }
    }

    related
}

/// Items reachable from `start`, in depth-first pre-order.
///
/// Returns an empty list if `start` is not in the graph.
#[must_use]
pub fn dfs_related(graph: &BasketGraph, start: &str) -> Vec<Item> {
    let Some(root) = graph.node_index(start) else {
        return Vec::new();
    };

    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    let mut stack: Vec<NodeIndex> = vec![root];
    let mut related = Vec::new();

    while let Some(node) = stack.pop() {
        if visited.put(node.index()) {
            continue;
        }
        if node != root {
            related.extend(graph.item(node).cloned());
        }
        // Push in reverse so the smallest neighbour is expanded first.
        for neighbour in graph.sorted_neighbors(node).into_iter().rev() {
            if !visited.contains(neighbour.index()) {
                stack.push(neighbour);
            }
        }
    }

    related
}
