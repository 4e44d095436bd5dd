//! `bsk recommend` — the items most strongly associated with a given item.

use basket_graph::graph::query::recommend;
use clap::Args;

use crate::cmd::{CmdContext, GraphArgs, InputArgs, require_item};
use crate::output::render_list;

/// Arguments for `bsk recommend`.
#[derive(Args, Debug)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Item to recommend for.
    #[arg(value_name = "ITEM")]
    pub item: String,

    #[command(flatten)]
    pub graph: GraphArgs,

    /// Number of recommendations (default: `top_n` from config).
    #[arg(short = 'n', long = "top")]
    pub n: Option<usize>,
}

/// Execute `bsk recommend`.
pub fn run_recommend(args: &RecommendArgs, ctx: &CmdContext) -> anyhow::Result<()> {
    let graph = ctx.graph(&args.input, &args.graph)?;
    require_item(&graph, &args.item)?;
    let top_n = args.n.unwrap_or(ctx.config.analysis.top_n);
    let recs = recommend(&graph, &args.item, top_n);
    render_list(
        &format!("Recommended with {} (by {})", args.item, graph.metric),
        &recs,
        ctx.output,
    )?;
    Ok(())
}
