//! `bsk neighbours` — every item co-purchased with a given item.

use std::io::{self, Write};

use basket_graph::Neighbour;
use clap::Args;

use crate::cmd::{CmdContext, GraphArgs, InputArgs, require_item};
use crate::output::{Renderable, fmt_ratio, render_list, write_json};

/// Arguments for `bsk neighbours`.
#[derive(Args, Debug)]
pub struct NeighboursArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Item to look up.
    #[arg(value_name = "ITEM")]
    pub item: String,

    #[command(flatten)]
    pub graph: GraphArgs,
}

impl Renderable for Neighbour {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:<40} {:>6}  weight {}",
            self.item.as_str(),
            self.count,
            fmt_ratio(self.weight)
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  {}  {}", self.item, self.count, fmt_ratio(self.weight))
    }

    fn table_headers() -> &'static [&'static str] {
        &["ITEM", "COUNT", "WEIGHT"]
    }
}

/// Execute `bsk neighbours`.
pub fn run_neighbours(args: &NeighboursArgs, ctx: &CmdContext) -> anyhow::Result<()> {
    let graph = ctx.graph(&args.input, &args.graph)?;
    require_item(&graph, &args.item)?;
    render_list(
        &format!("Bought with {}", args.item),
        &graph.neighbours(&args.item),
        ctx.output,
    )?;
    Ok(())
}
