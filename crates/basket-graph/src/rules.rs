//! Single-item association rules.
//!
//! For every co-occurring pair `{A, B}` two directed rules are considered,
//! `A → B` and `B → A`:
//!
//! ```text
//! support    = count(A,B) / n
//! confidence = count(A,B) / count(A)
//! lift       = confidence / (count(B) / n)
//! ```
//!
//! Ranking is fully determined by the values: lift descending, confidence
//! descending, then `(antecedent, consequent)` ascending.

use std::cmp::Ordering;

use basket_core::threshold::{ensure_min_lift, ensure_unit_interval};
use basket_core::{Item, Result};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::stats::{ItemStats, PairStats, pair_fits, ratio};

/// A directed association `antecedent → consequent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub antecedent: Item,
    pub consequent: Item,
    /// Fraction of baskets containing both items, in `[0, 1]`.
    pub support: f64,
    /// `P(consequent | antecedent)`, in `[0, 1]`.
    pub confidence: f64,
    /// Confidence over the consequent's baseline support, `>= 0`.
    pub lift: f64,
    /// Baskets containing both items.
    pub pair_count: usize,
    /// Baskets containing the antecedent.
    pub antecedent_count: usize,
}

impl Rule {
    /// Ranking order: lift desc, confidence desc, identifiers asc.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .lift
            .total_cmp(&self.lift)
            .then_with(|| other.confidence.total_cmp(&self.confidence))
            .then_with(|| self.antecedent.cmp(&other.antecedent))
            .then_with(|| self.consequent.cmp(&other.consequent))
    }
}

/// Derive and rank the rules passing both thresholds.
///
/// Pairs whose count is zero or exceeds either item's support count are
/// skipped, so mismatched `items`/`pairs` never produce a confidence above 1.
///
/// # Errors
///
/// Returns [`basket_core::BasketError::InvalidInput`] if `min_confidence` is
/// outside `[0, 1]` or `min_lift` is negative or not finite.
#[instrument(skip(items, pairs), fields(items = items.len(), pairs = pairs.len()))]
pub fn derive_rules(
    items: &ItemStats,
    pairs: &PairStats,
    min_confidence: f64,
    min_lift: f64,
) -> Result<Vec<Rule>> {
    ensure_unit_interval("min_confidence", min_confidence)?;
    ensure_min_lift(min_lift)?;

    let n = items.transaction_count();
    let mut rules = Vec::with_capacity(pairs.len() * 2);

    for (pair, pair_count) in pairs.iter() {
        if !pair_fits(items, &pair, pair_count) {
            debug!(
                a = %pair.a,
                b = %pair.b,
                pair_count,
                "skipping pair inconsistent with item counts"
            );
            continue;
        }
        for (antecedent, consequent) in [(&pair.a, &pair.b), (&pair.b, &pair.a)] {
            let antecedent_count = items.count(antecedent);
            let consequent_count = items.count(consequent);

            let confidence = ratio(pair_count, antecedent_count);
            let lift = confidence / ratio(consequent_count, n);

            if confidence >= min_confidence && lift >= min_lift {
                rules.push(Rule {
                    antecedent: antecedent.clone(),
                    consequent: consequent.clone(),
                    support: ratio(pair_count, n),
                    confidence,
                    lift,
                    pair_count,
                    antecedent_count,
                });
            }
        }
    }

    rules.sort_by(Rule::rank_cmp);
    debug!(rules = rules.len(), "derived association rules");
    Ok(rules)
}
