//! `bsk pairs` — item pairs bought together at least N times.

use std::io::{self, Write};

use basket_graph::GraphEdge;
use basket_graph::graph::query::frequent_pairs;
use clap::Args;

use crate::cmd::{CmdContext, GraphArgs, InputArgs};
use crate::output::{Renderable, fmt_ratio, render_list, write_json};

/// Arguments for `bsk pairs`.
#[derive(Args, Debug)]
pub struct PairsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub graph: GraphArgs,

    /// Minimum number of shared baskets.
    #[arg(long, default_value_t = 1)]
    pub min_count: usize,
}

impl Renderable for GraphEdge {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:<48} {:>6}  weight {}",
            format!("{} + {}", self.a, self.b),
            self.count,
            fmt_ratio(self.weight)
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.a,
            self.b,
            self.count,
            fmt_ratio(self.weight)
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["A", "B", "COUNT", "WEIGHT"]
    }
}

/// Execute `bsk pairs`.
pub fn run_pairs(args: &PairsArgs, ctx: &CmdContext) -> anyhow::Result<()> {
    let graph = ctx.graph(&args.input, &args.graph)?;
    let pairs = frequent_pairs(&graph, args.min_count);
    render_list(
        &format!("Pairs bought together at least {} times", args.min_count),
        &pairs,
        ctx.output,
    )?;
    Ok(())
}
