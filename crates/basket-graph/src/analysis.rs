//! One-shot analysis over a transaction snapshot.
//!
//! [`Analysis::run`] validates the config, then chains
//! [`compute_stats`] → [`derive_rules`] → [`build_graph`] and returns the
//! whole result to the caller. There is no hidden cache; callers that want
//! one can key stored results by [`Analysis::fingerprint`].

use basket_core::config::AnalysisConfig;
use basket_core::{Result, TransactionSet};
use tracing::{info, instrument};

use crate::graph::{BasketGraph, GraphStats, build_graph};
use crate::rules::{Rule, derive_rules};
use crate::stats::{BasketStats, compute_stats};

/// The complete, caller-owned result of one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// BLAKE3 fingerprint of the input transactions.
    pub fingerprint: String,
    pub config: AnalysisConfig,
    pub stats: BasketStats,
    pub rules: Vec<Rule>,
    pub graph: BasketGraph,
    pub graph_stats: GraphStats,
}

impl Analysis {
    /// Run the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`basket_core::BasketError::InvalidInput`] for an empty
    /// transaction set or out-of-range thresholds. Nothing is computed when
    /// validation fails.
    #[instrument(skip_all, fields(transactions = transactions.len(), metric = %config.weight_metric))]
    pub fn run(transactions: &TransactionSet, config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let stats = compute_stats(transactions, config.min_support)?;
        let rules = derive_rules(
            &stats.items,
            &stats.pairs,
            config.min_confidence,
            config.min_lift,
        )?;
        let graph = build_graph(&stats.items, &stats.pairs, config.weight_metric);
        let graph_stats = GraphStats::from_graph(&graph);

        info!(
            items = stats.items.len(),
            pruned = stats.items.pruned().len(),
            pairs = stats.pairs.len(),
            rules = rules.len(),
            "analysis complete"
        );

        Ok(Self {
            fingerprint: transactions.content_hash(),
            config: config.clone(),
            stats,
            rules,
            graph,
            graph_stats,
        })
    }
}
