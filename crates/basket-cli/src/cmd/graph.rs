//! `bsk graph` — co-purchase graph summary and strongest associations.

use std::io::{self, Write};

use basket_core::WeightMetric;
use basket_graph::graph::build::GraphNode;
use basket_graph::graph::query::strongest_associations;
use basket_graph::{Analysis, GraphEdge, GraphStats};
use clap::Args;
use serde::Serialize;

use crate::cmd::{CmdContext, GraphArgs, InputArgs};
use crate::output::{
    OutputMode, Renderable, fmt_ratio, pretty_kv, pretty_section, render_mode, write_list,
};

/// Arguments for `bsk graph`.
#[derive(Args, Debug)]
pub struct GraphCmdArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub graph: GraphArgs,

    /// Number of strongest associations to list (default: `top_n` from config).
    #[arg(long)]
    pub top: Option<usize>,

    /// Also list every node with its support and degree.
    #[arg(long)]
    pub nodes: bool,
}

/// Report payload for `bsk graph`.
#[derive(Debug, Serialize)]
pub struct GraphReport {
    pub fingerprint: String,
    pub metric: WeightMetric,
    pub content_hash: String,
    pub rule_count: usize,
    pub stats: GraphStats,
    pub strongest: Vec<GraphEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<GraphNode>>,
}

impl GraphReport {
    fn new(analysis: &Analysis, top: usize, with_nodes: bool) -> Self {
        Self {
            fingerprint: analysis.fingerprint.clone(),
            metric: analysis.graph.metric,
            content_hash: analysis.graph.content_hash.clone(),
            rule_count: analysis.rules.len(),
            stats: analysis.graph_stats.clone(),
            strongest: strongest_associations(&analysis.graph, top),
            nodes: with_nodes.then(|| analysis.graph.nodes()),
        }
    }
}

/// Execute `bsk graph`.
pub fn run_graph(args: &GraphCmdArgs, ctx: &CmdContext) -> anyhow::Result<()> {
    let transactions = ctx.load(&args.input)?;
    let config = ctx.analysis_config(&args.graph);
    let analysis = Analysis::run(&transactions, &config)?;
    let top = args.top.unwrap_or(config.top_n);
    let report = GraphReport::new(&analysis, top, args.nodes);

    render_mode(
        ctx.output,
        &report,
        |r, w| render_graph(r, w, OutputMode::Text),
        |r, w| render_graph(r, w, OutputMode::Pretty),
    )
}

fn render_graph(report: &GraphReport, w: &mut dyn Write, mode: OutputMode) -> io::Result<()> {
    let s = &report.stats;
    if mode.is_pretty() {
        pretty_section(w, "Co-purchase graph")?;
        pretty_kv(w, "Metric", report.metric.as_str())?;
        pretty_kv(w, "Items", s.node_count.to_string())?;
        pretty_kv(w, "Pairs", s.edge_count.to_string())?;
        pretty_kv(w, "Density", fmt_ratio(s.density))?;
        pretty_kv(w, "Components", s.component_count.to_string())?;
        pretty_kv(w, "Isolated items", s.isolated_node_count.to_string())?;
        pretty_kv(w, "Max degree", s.max_degree.to_string())?;
        pretty_kv(w, "Co-purchases", s.total_co_purchases.to_string())?;
        pretty_kv(w, "Rules", report.rule_count.to_string())?;
        pretty_kv(w, "Content hash", &report.content_hash)?;
        writeln!(w)?;
    } else {
        writeln!(
            w,
            "metric={} items={} pairs={} density={} components={} isolated={} max_degree={} rules={}",
            report.metric,
            s.node_count,
            s.edge_count,
            fmt_ratio(s.density),
            s.component_count,
            s.isolated_node_count,
            s.max_degree,
            report.rule_count,
        )?;
    }

    write_list(w, "Strongest associations", &report.strongest, mode)?;

    if let Some(nodes) = &report.nodes {
        if mode.is_pretty() {
            writeln!(w)?;
        }
        write_list(w, "Items", nodes, mode)?;
    }
    Ok(())
}

impl Renderable for GraphNode {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:<40} {:>6}  support {}  degree {}",
            self.item.as_str(),
            self.count,
            fmt_ratio(self.support),
            self.degree
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        crate::output::write_json(w, self)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.item,
            self.count,
            fmt_ratio(self.support),
            self.degree
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ITEM", "COUNT", "SUPPORT", "DEGREE"]
    }
}
