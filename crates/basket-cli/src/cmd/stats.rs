//! `bsk stats` — item supports, pair counts, and pruned items.

use std::io::{self, Write};

use basket_core::Item;
use basket_graph::BasketStats;
use basket_graph::compute_stats;
use clap::Args;
use serde::Serialize;

use crate::cmd::{CmdContext, InputArgs};
use crate::output::{fmt_ratio, pretty_kv, pretty_section, render_mode};

/// Arguments for `bsk stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Drop items whose support is below this fraction of transactions.
    #[arg(long, value_name = "FRACTION")]
    pub min_support: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ItemRow {
    pub item: Item,
    pub count: usize,
    pub support: f64,
}

#[derive(Debug, Serialize)]
pub struct PairRow {
    pub a: Item,
    pub b: Item,
    pub count: usize,
}

/// Report payload for `bsk stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub fingerprint: String,
    pub transaction_count: usize,
    pub min_support: f64,
    pub items: Vec<ItemRow>,
    pub pairs: Vec<PairRow>,
    pub pruned: Vec<Item>,
}

impl StatsReport {
    fn new(fingerprint: String, stats: &BasketStats) -> Self {
        let items = stats
            .items
            .iter()
            .map(|(item, count)| ItemRow {
                item: item.clone(),
                count,
                support: stats.items.support(item),
            })
            .collect();
        let pairs = stats
            .pairs
            .iter()
            .map(|(pair, count)| PairRow {
                a: pair.a,
                b: pair.b,
                count,
            })
            .collect();
        Self {
            fingerprint,
            transaction_count: stats.items.transaction_count(),
            min_support: stats.items.min_support(),
            items,
            pairs,
            pruned: stats.items.pruned().to_vec(),
        }
    }
}

/// Execute `bsk stats`.
pub fn run_stats(args: &StatsArgs, ctx: &CmdContext) -> anyhow::Result<()> {
    let transactions = ctx.load(&args.input)?;
    let min_support = args
        .min_support
        .unwrap_or(ctx.config.analysis.min_support);
    let stats = compute_stats(&transactions, min_support)?;
    let report = StatsReport::new(transactions.content_hash(), &stats);

    render_mode(ctx.output, &report, render_stats_text, render_stats_pretty)
}

fn render_stats_text(report: &StatsReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "transactions  {}", report.transaction_count)?;
    writeln!(w, "ITEM  COUNT  SUPPORT")?;
    for row in &report.items {
        writeln!(w, "{}  {}  {}", row.item, row.count, fmt_ratio(row.support))?;
    }
    writeln!(w, "A  B  COUNT")?;
    for row in &report.pairs {
        writeln!(w, "{}  {}  {}", row.a, row.b, row.count)?;
    }
    for item in &report.pruned {
        writeln!(w, "pruned  {item}")?;
    }
    Ok(())
}

fn render_stats_pretty(report: &StatsReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Transactions")?;
    pretty_kv(w, "Transactions", report.transaction_count.to_string())?;
    pretty_kv(w, "Min support", fmt_ratio(report.min_support))?;
    pretty_kv(w, "Retained items", report.items.len().to_string())?;
    pretty_kv(w, "Pruned items", report.pruned.len().to_string())?;
    pretty_kv(w, "Fingerprint", &report.fingerprint)?;
    writeln!(w)?;

    pretty_section(w, "Item support")?;
    for row in &report.items {
        writeln!(
            w,
            "{:<32} {:>8} {:>10}",
            row.item.as_str(),
            row.count,
            fmt_ratio(row.support)
        )?;
    }
    writeln!(w)?;

    pretty_section(w, "Co-purchased pairs")?;
    if report.pairs.is_empty() {
        writeln!(w, "(none)")?;
    }
    for row in &report.pairs {
        writeln!(w, "{:<48} {:>8}", format!("{} + {}", row.a, row.b), row.count)?;
    }

    if !report.pruned.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Pruned (below min support)")?;
        for item in &report.pruned {
            writeln!(w, "{item}")?;
        }
    }
    Ok(())
}
