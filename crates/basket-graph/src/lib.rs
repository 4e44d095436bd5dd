#![forbid(unsafe_code)]
//! basket-graph library.
//!
//! The basket graph engine: co-occurrence statistics, association rules,
//! and the weighted co-purchase graph built from them.
//!
//! ## Pipeline
//!
//! ```text
//! TransactionSet
//!        ↓  stats::compute_stats(min_support)
//! BasketStats { ItemStats, PairStats }
//!        ├─ rules::derive_rules(min_confidence, min_lift) → Vec<Rule>
//!        └─ graph::build_graph(weight_metric)             → BasketGraph
//!                 ├─ graph::query     (recommend, bundles, pairs, …)
//!                 ├─ graph::traverse  (BFS / DFS related items)
//!                 └─ graph::stats     (density, components, …)
//! ```
//!
//! Every step is a pure function of its inputs. [`Analysis::run`] chains the
//! three operations and hands back an owned result; nothing is cached
//! between calls.
//!
//! # Conventions
//!
//! - **Errors**: Return [`basket_core::Result`]; invalid thresholds surface as
//!   [`basket_core::BasketError::InvalidInput`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod analysis;
pub mod graph;
pub mod rules;
pub mod stats;

pub use analysis::Analysis;
pub use basket_core::WeightMetric;
pub use graph::{BasketGraph, GraphEdge, GraphStats, Neighbour, build_graph};
pub use rules::{Rule, derive_rules};
pub use stats::{BasketStats, ItemPair, ItemStats, PairStats, compute_stats};
