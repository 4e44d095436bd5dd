//! `bsk bundles` — the pairs bought together most often.

use basket_graph::graph::query::top_bundles;
use clap::Args;

use crate::cmd::{CmdContext, GraphArgs, InputArgs};
use crate::output::render_list;

/// Arguments for `bsk bundles`.
#[derive(Args, Debug)]
pub struct BundlesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub graph: GraphArgs,

    /// Number of bundles to show (default: `top_n` from config).
    #[arg(short = 'k', long = "top")]
    pub k: Option<usize>,
}

/// Execute `bsk bundles`.
pub fn run_bundles(args: &BundlesArgs, ctx: &CmdContext) -> anyhow::Result<()> {
    let graph = ctx.graph(&args.input, &args.graph)?;
    let k = args.k.unwrap_or(ctx.config.analysis.top_n);
    render_list("Top bundles", &top_bundles(&graph, k), ctx.output)?;
    Ok(())
}
