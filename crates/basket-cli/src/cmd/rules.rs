//! `bsk rules` — ranked association rules.

use std::io::{self, Write};

use basket_graph::{Rule, compute_stats, derive_rules};
use clap::Args;
use tracing::debug;

use crate::cmd::{CmdContext, InputArgs};
use crate::output::{Renderable, fmt_ratio, render_list, write_json};

/// Arguments for `bsk rules`.
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Drop items whose support is below this fraction of transactions.
    #[arg(long, value_name = "FRACTION")]
    pub min_support: Option<f64>,

    /// Keep rules whose confidence is at least this value.
    #[arg(long, value_name = "FRACTION")]
    pub min_confidence: Option<f64>,

    /// Keep rules whose lift is at least this value.
    #[arg(long, value_name = "LIFT")]
    pub min_lift: Option<f64>,

    /// Show at most this many rules (default: all).
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl Renderable for Rule {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:<40} conf {}  lift {}  supp {}  ({}/{})",
            format!("{} → {}", self.antecedent, self.consequent),
            fmt_ratio(self.confidence),
            fmt_ratio(self.lift),
            fmt_ratio(self.support),
            self.pair_count,
            self.antecedent_count,
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            self.antecedent,
            self.consequent,
            fmt_ratio(self.support),
            fmt_ratio(self.confidence),
            fmt_ratio(self.lift),
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ANTECEDENT", "CONSEQUENT", "SUPPORT", "CONFIDENCE", "LIFT"]
    }
}

/// Execute `bsk rules`.
pub fn run_rules(args: &RulesArgs, ctx: &CmdContext) -> anyhow::Result<()> {
    let rules = ranked_rules(args, ctx)?;
    render_list("Association rules", &rules, ctx.output)?;
    Ok(())
}

fn ranked_rules(args: &RulesArgs, ctx: &CmdContext) -> anyhow::Result<Vec<Rule>> {
    let defaults = &ctx.config.analysis;
    let transactions = ctx.load(&args.input)?;
    let stats = compute_stats(
        &transactions,
        args.min_support.unwrap_or(defaults.min_support),
    )?;
    let mut rules = derive_rules(
        &stats.items,
        &stats.pairs,
        args.min_confidence.unwrap_or(defaults.min_confidence),
        args.min_lift.unwrap_or(defaults.min_lift),
    )?;
    if let Some(limit) = args.limit {
        rules.truncate(limit);
    }
    debug!(shown = rules.len(), "ranked rules");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::{context, write_groceries};
    use basket_core::BasketError;

    fn args(input: InputArgs) -> RulesArgs {
        RulesArgs {
            input,
            min_support: None,
            min_confidence: None,
            min_lift: None,
            limit: None,
        }
    }

    #[test]
    fn confidence_flag_filters_rules() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let mut args = args(write_groceries(dir.path()));
        args.min_confidence = Some(0.6);

        let rules = ranked_rules(&args, &context()).expect("rules");
        assert!(rules.iter().all(|r| r.confidence >= 0.6));
        assert!(
            rules
                .iter()
                .any(|r| r.antecedent.as_str() == "bread" && r.consequent.as_str() == "milk")
        );
        assert!(
            !rules
                .iter()
                .any(|r| r.antecedent.as_str() == "milk" && r.consequent.as_str() == "butter")
        );
    }

    #[test]
    fn limit_truncates_after_ranking() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let all = ranked_rules(&args(write_groceries(dir.path())), &context()).expect("rules");
        let mut limited = args(write_groceries(dir.path()));
        limited.limit = Some(2);
        let top = ranked_rules(&limited, &context()).expect("rules");
        assert_eq!(top, all[..2].to_vec());
    }

    #[test]
    fn out_of_range_confidence_is_invalid_input() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let mut args = args(write_groceries(dir.path()));
        args.min_confidence = Some(1.5);
        let err = ranked_rules(&args, &context()).expect_err("must fail");
        assert!(matches!(
            err.downcast_ref::<BasketError>(),
            Some(BasketError::InvalidInput(_))
        ));
    }

    #[test]
    fn table_row_matches_headers() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let rules = ranked_rules(&args(write_groceries(dir.path())), &context()).expect("rules");
        let mut buf = Vec::new();
        rules[0].render_table(&mut buf).expect("render");
        let row = String::from_utf8(buf).expect("utf8");
        assert_eq!(
            row.trim_end().split("  ").count(),
            Rule::table_headers().len()
        );
    }
}
