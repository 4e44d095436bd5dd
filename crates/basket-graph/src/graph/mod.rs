//! Co-purchase graph module.
//!
//! # Overview
//!
//! This module turns [`crate::stats::BasketStats`] into a petgraph-based
//! undirected graph whose nodes are retained items and whose edges are
//! co-purchased pairs, then answers the usual market-basket questions on it.
//!
//! ## Pipeline
//!
//! ```text
//! ItemStats + PairStats
//!        ↓  build::build_graph(weight_metric)
//! BasketGraph (UnGraph<Item, EdgeData>)
//!        ├─ query::recommend / top_bundles / frequent_pairs / strongest_associations
//!        ├─ traverse::bfs_related / dfs_related
//!        └─ stats::GraphStats::from_graph
//! ```
//!
//! ## Cache Invalidation
//!
//! [`BasketGraph::content_hash`] is a BLAKE3 hash of the weighted edge set.
//! Compare it against a stored value to detect when downstream renderings
//! need to be refreshed.
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use basket_graph::{compute_stats, graph::{build_graph, query, stats::GraphStats}};
//!
//! let stats = compute_stats(&transactions, 0.01)?;
//! let graph = build_graph(&stats.items, &stats.pairs, "lift".parse()?);
//! let summary = GraphStats::from_graph(&graph);
//!
//! for rec in query::recommend(&graph, "whole milk", 5) {
//!     println!("{} ({:.2})", rec.item, rec.weight);
//! }
//! ```

pub mod build;
pub mod query;
pub mod stats;
pub mod traverse;

// Re-export primary types at module level for convenience.
pub use build::{BasketGraph, EdgeData, GraphEdge, Neighbour, build_graph, metric_weight};
pub use stats::GraphStats;
pub use traverse::{bfs_related, dfs_related};
