#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use basket_core::config::{ProjectConfig, load_config_file, load_project_config, load_user_config};
use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "bsk: market-basket analysis over transaction files",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Project config file (default: `.basket/config.toml`).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Suppress all logging except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Statistics",
        about = "Item supports and pair counts",
        long_about = "Count how often each item and each item pair appears, after pruning items below --min-support.",
        after_help = "EXAMPLES:\n    # Supports for a grocery export\n    bsk stats groceries.csv\n\n    # Drop items in fewer than 1% of baskets\n    bsk stats groceries.csv --min-support 0.01\n\n    # Emit machine-readable output\n    bsk stats groceries.csv --format json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Statistics",
        about = "Ranked association rules",
        long_about = "Derive A → B rules with support, confidence, and lift, ranked by lift then confidence.",
        after_help = "EXAMPLES:\n    # Rules with at least 60% confidence\n    bsk rules groceries.csv --min-confidence 0.6\n\n    # Ten strongest positive associations\n    bsk rules groceries.csv --min-lift 1 -n 10"
    )]
    Rules(cmd::rules::RulesArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Co-purchase graph summary",
        long_about = "Build the co-purchase graph and report its shape and strongest associations.",
        after_help = "EXAMPLES:\n    # Summary weighted by lift (default)\n    bsk graph groceries.csv\n\n    # Weight edges by Jaccard similarity and list all items\n    bsk graph groceries.csv --metric jaccard --nodes"
    )]
    Graph(cmd::graph::GraphCmdArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Items bought with an item",
        after_help = "EXAMPLES:\n    bsk neighbours groceries.csv \"whole milk\""
    )]
    Neighbours(cmd::neighbours::NeighboursArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Recommend items for an item",
        long_about = "Rank an item's neighbours by edge weight under the chosen metric.",
        after_help = "EXAMPLES:\n    # Five recommendations by lift\n    bsk recommend groceries.csv yogurt -n 5\n\n    # Rank by raw co-purchase count\n    bsk recommend groceries.csv yogurt --metric count"
    )]
    Recommend(cmd::recommend::RecommendArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Frequently co-purchased pairs",
        after_help = "EXAMPLES:\n    bsk pairs groceries.csv --min-count 20"
    )]
    Pairs(cmd::pairs::PairsArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Most common product bundles",
        after_help = "EXAMPLES:\n    bsk bundles groceries.csv -k 5"
    )]
    Bundles(cmd::bundles::BundlesArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Items reachable from an item",
        long_about = "List every item reachable from ITEM through chains of co-purchases.",
        after_help = "EXAMPLES:\n    # Breadth-first (nearest first)\n    bsk traverse groceries.csv sausage\n\n    # Depth-first\n    bsk traverse groceries.csv sausage --dfs"
    )]
    Traverse(cmd::traverse::TraverseArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("BASKET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else if verbose || env::var("DEBUG").is_ok() {
            "basket=debug,bsk=debug,info"
        } else {
            "basket=info,bsk=info,warn"
        })
    });

    let format = env::var("BASKET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<ProjectConfig> {
    let config = match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => load_project_config(&env::current_dir()?)?,
    };
    config.analysis.validate().context("invalid [analysis] config")?;
    Ok(config)
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let ctx = cmd::CmdContext {
        output,
        config: load_config(cli.config.as_deref())?,
    };
    debug!(?output, "dispatching command");

    match &cli.command {
        Commands::Stats(args) => cmd::stats::run_stats(args, &ctx),
        Commands::Rules(args) => cmd::rules::run_rules(args, &ctx),
        Commands::Graph(args) => cmd::graph::run_graph(args, &ctx),
        Commands::Neighbours(args) => cmd::neighbours::run_neighbours(args, &ctx),
        Commands::Recommend(args) => cmd::recommend::run_recommend(args, &ctx),
        Commands::Pairs(args) => cmd::pairs::run_pairs(args, &ctx),
        Commands::Bundles(args) => cmd::bundles::run_bundles(args, &ctx),
        Commands::Traverse(args) => cmd::traverse::run_traverse(args, &ctx),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let user_output = match load_user_config() {
        Ok(user) => user.output,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable user config");
            None
        }
    };
    let output = resolve_output_mode(cli.format, cli.json, user_output.as_deref());

    match run(&cli, output) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            render_error(output, &CliError::from_anyhow(&err))?;
            Ok(ExitCode::FAILURE)
        }
    }
}
