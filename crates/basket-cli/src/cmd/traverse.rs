//! `bsk traverse` — everything reachable from an item through co-purchases.

use std::io::{self, Write};

use basket_core::Item;
use basket_graph::graph::{bfs_related, dfs_related};
use clap::Args;
use serde::Serialize;

use crate::cmd::{CmdContext, GraphArgs, InputArgs, require_item};
use crate::output::{pretty_section, render_mode};

/// Arguments for `bsk traverse`.
#[derive(Args, Debug)]
pub struct TraverseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Item to start from.
    #[arg(value_name = "ITEM")]
    pub item: String,

    #[command(flatten)]
    pub graph: GraphArgs,

    /// Depth-first order.
    #[arg(long, conflicts_with = "bfs")]
    pub dfs: bool,

    /// Breadth-first order (default).
    #[arg(long)]
    pub bfs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Bfs,
    Dfs,
}

/// Report payload for `bsk traverse`.
#[derive(Debug, Serialize)]
pub struct TraverseReport {
    pub start: String,
    pub order: Order,
    pub related: Vec<Item>,
}

/// Execute `bsk traverse`.
pub fn run_traverse(args: &TraverseArgs, ctx: &CmdContext) -> anyhow::Result<()> {
    let graph = ctx.graph(&args.input, &args.graph)?;
    require_item(&graph, &args.item)?;

    let order = if args.dfs { Order::Dfs } else { Order::Bfs };
    let related = match order {
        Order::Bfs => bfs_related(&graph, &args.item),
        Order::Dfs => dfs_related(&graph, &args.item),
    };
    let report = TraverseReport {
        start: args.item.clone(),
        order,
        related,
    };

    render_mode(ctx.output, &report, render_traverse_text, render_traverse_pretty)
}

fn render_traverse_text(report: &TraverseReport, w: &mut dyn Write) -> io::Result<()> {
    for item in &report.related {
        writeln!(w, "{item}")?;
    }
    Ok(())
}

fn render_traverse_pretty(report: &TraverseReport, w: &mut dyn Write) -> io::Result<()> {
    let heading = match report.order {
        Order::Bfs => format!("Reachable from {} (breadth-first)", report.start),
        Order::Dfs => format!("Reachable from {} (depth-first)", report.start),
    };
    pretty_section(w, &heading)?;
    if report.related.is_empty() {
        writeln!(w, "(none)")?;
    }
    for (i, item) in report.related.iter().enumerate() {
        writeln!(w, "{:>4}. {item}", i + 1)?;
    }
    Ok(())
}
