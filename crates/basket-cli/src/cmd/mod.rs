//! Subcommand handlers and the plumbing they share.
//!
//! Each invocation re-reads the input file and recomputes what it needs;
//! nothing is cached between runs.

pub mod bundles;
pub mod graph;
pub mod neighbours;
pub mod pairs;
pub mod recommend;
pub mod rules;
pub mod stats;
pub mod traverse;

use std::path::PathBuf;

use anyhow::Context as _;
use basket_core::config::{AnalysisConfig, ProjectConfig};
use basket_core::load::{InputFormat, load_transactions};
use basket_core::{BasketError, TransactionSet, WeightMetric};
use basket_graph::{BasketGraph, build_graph, compute_stats};
use clap::Args;
use tracing::info;

use crate::output::OutputMode;

/// Input file plus loader overrides, shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Transactions file: grouped-line `.csv` or a `.json` array of baskets.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Force the input format instead of inferring it from the extension.
    #[arg(long, value_name = "csv|json")]
    pub input_format: Option<InputFormat>,
}

/// Threshold overrides that feed [`compute_stats`] and [`build_graph`].
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Drop items whose support is below this fraction of transactions.
    #[arg(long, value_name = "FRACTION")]
    pub min_support: Option<f64>,

    /// Edge weight metric: count, lift, or jaccard.
    #[arg(long, value_name = "METRIC")]
    pub metric: Option<WeightMetric>,
}

/// Resolved global state handed to every handler.
#[derive(Debug, Clone)]
pub struct CmdContext {
    pub output: OutputMode,
    pub config: ProjectConfig,
}

impl CmdContext {
    /// Load the transactions named by `input`, using the configured CSV columns.
    pub fn load(&self, input: &InputArgs) -> anyhow::Result<TransactionSet> {
        let set = load_transactions(&input.file, input.input_format, &self.config.input)
            .with_context(|| format!("failed to load {}", input.file.display()))?;
        info!(
            path = %input.file.display(),
            transactions = set.len(),
            "loaded transactions"
        );
        Ok(set)
    }

    /// Config thresholds with any command-line overrides applied.
    pub fn analysis_config(&self, overrides: &GraphArgs) -> AnalysisConfig {
        let mut config = self.config.analysis.clone();
        if let Some(min_support) = overrides.min_support {
            config.min_support = min_support;
        }
        if let Some(metric) = overrides.metric {
            config.weight_metric = metric;
        }
        config
    }

    /// Load, count, and build the co-purchase graph.
    pub fn graph(&self, input: &InputArgs, overrides: &GraphArgs) -> anyhow::Result<BasketGraph> {
        let transactions = self.load(input)?;
        let config = self.analysis_config(overrides);
        let stats = compute_stats(&transactions, config.min_support)?;
        Ok(build_graph(&stats.items, &stats.pairs, config.weight_metric))
    }
}

/// Fail with [`BasketError::ItemNotFound`] unless `item` is a graph node.
pub fn require_item(graph: &BasketGraph, item: &str) -> Result<(), BasketError> {
    if graph.has_item(item) {
        Ok(())
    } else {
        Err(BasketError::ItemNotFound(item.to_string()))
    }
}
