//! Item support counts and pair co-occurrence counts.
//!
//! # Overview
//!
//! [`compute_stats`] makes two passes over the transaction set:
//!
//! 1. Count, per item, the number of baskets containing it.
//! 2. Drop items whose support (`count / n`) is below `min_support`, then
//!    count, per unordered pair of surviving items, the baskets containing
//!    both.
//!
//! Pass 2 costs O(k²) per basket of k retained items, which is fine for
//! supermarket-sized baskets. Pruning first bounds the number of pairs.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeMap;

use basket_core::threshold::ensure_unit_interval;
use basket_core::{BasketError, Item, Result, TransactionSet};
use serde::Serialize;
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// ItemPair
// ---------------------------------------------------------------------------

/// An unordered pair of distinct items, stored canonically with `a < b`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ItemPair {
    pub a: Item,
    pub b: Item,
}

impl ItemPair {
    /// Build the canonical pair. Returns `None` when `x == y`.
    #[must_use]
    pub fn new(x: Item, y: Item) -> Option<Self> {
        match x.cmp(&y) {
            std::cmp::Ordering::Less => Some(Self { a: x, b: y }),
            std::cmp::Ordering::Greater => Some(Self { a: y, b: x }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ItemStats
// ---------------------------------------------------------------------------

/// Support counts for the items that survived `min_support` pruning.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStats {
    transaction_count: usize,
    min_support: f64,
    counts: BTreeMap<Item, usize>,
    pruned: Vec<Item>,
}

impl ItemStats {
    /// Total number of transactions analysed.
    #[must_use]
    pub const fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    /// The support threshold these stats were pruned with.
    #[must_use]
    pub const fn min_support(&self) -> f64 {
        self.min_support
    }

    /// Baskets containing `item`, or 0 if it was pruned or never seen.
    #[must_use]
    pub fn count(&self, item: &str) -> usize {
        self.counts.get(item).copied().unwrap_or(0)
    }

    /// Fraction of baskets containing `item`.
    #[must_use]
    pub fn support(&self, item: &str) -> f64 {
        ratio(self.count(item), self.transaction_count)
    }

    /// Returns `true` if `item` was retained.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.counts.contains_key(item)
    }

    /// Number of retained items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Retained items with their counts, ascending by item.
    pub fn iter(&self) -> impl Iterator<Item = (&Item, usize)> {
        self.counts.iter().map(|(item, count)| (item, *count))
    }

    /// Items dropped for falling below `min_support`, ascending.
    #[must_use]
    pub fn pruned(&self) -> &[Item] {
        &self.pruned
    }
}

// ---------------------------------------------------------------------------
// PairStats
// ---------------------------------------------------------------------------

/// Co-occurrence counts per unordered item pair.
///
/// Stored as a nested map `a → b → count` with `a < b`, so lookups by
/// string slice need no allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairStats {
    counts: BTreeMap<Item, BTreeMap<Item, usize>>,
    len: usize,
}

impl PairStats {
    /// Baskets containing both `x` and `y`. Symmetric; 0 when `x == y`.
    #[must_use]
    pub fn count(&self, x: &str, y: &str) -> usize {
        let (lo, hi) = match x.cmp(y) {
            std::cmp::Ordering::Less => (x, y),
            std::cmp::Ordering::Greater => (y, x),
            std::cmp::Ordering::Equal => return 0,
        };
        self.counts
            .get(lo)
            .and_then(|row| row.get(hi))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct pairs with a non-zero count.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All pairs with their counts, ascending by `(a, b)`.
    pub fn iter(&self) -> impl Iterator<Item = (ItemPair, usize)> + '_ {
        self.counts.iter().flat_map(|(a, row)| {
            row.iter().map(move |(b, count)| {
                (
                    ItemPair {
                        a: a.clone(),
                        b: b.clone(),
                    },
                    *count,
                )
            })
        })
    }

    /// Increment a pair the caller has already ordered (`lo < hi`).
    fn increment(&mut self, lo: &Item, hi: &Item) {
        debug_assert!(lo < hi, "pairs must be inserted in canonical order");
        let slot = self
            .counts
            .entry(lo.clone())
            .or_default()
            .entry(hi.clone())
            .or_insert(0);
        if *slot == 0 {
            self.len += 1;
        }
        *slot += 1;
    }
}

// ---------------------------------------------------------------------------
// BasketStats / compute_stats
// ---------------------------------------------------------------------------

/// Output of [`compute_stats`].
#[derive(Debug, Clone, PartialEq)]
pub struct BasketStats {
    pub items: ItemStats,
    pub pairs: PairStats,
}

/// Count item supports and pair co-occurrences.
///
/// # Errors
///
/// Returns [`BasketError::InvalidInput`] if `transactions` is empty or
/// `min_support` is outside `[0, 1]`.
#[instrument(skip(transactions), fields(transactions = transactions.len()))]
pub fn compute_stats(transactions: &TransactionSet, min_support: f64) -> Result<BasketStats> {
    if transactions.is_empty() {
        return Err(BasketError::invalid("transaction set must not be empty"));
    }
    ensure_unit_interval("min_support", min_support)?;

    let n = transactions.len();

    // Pass 1: item support counts.
    let mut all_counts: BTreeMap<Item, usize> = BTreeMap::new();
    for transaction in transactions {
        for item in transaction {
            *all_counts.entry(item.clone()).or_insert(0) += 1;
        }
    }

    let mut counts = BTreeMap::new();
    let mut pruned = Vec::new();
    for (item, count) in all_counts {
        if ratio(count, n) < min_support {
            pruned.push(item);
        } else {
            counts.insert(item, count);
        }
    }

    // Pass 2: pair counts over retained items only.
    let mut pairs = PairStats::default();
    let mut retained: Vec<&Item> = Vec::new();
    for transaction in transactions {
        retained.clear();
        retained.extend(transaction.iter().filter(|item| counts.contains_key(item.as_str())));

        // Transactions iterate in item order, so `lo < hi` holds here.
        for (i, lo) in retained.iter().enumerate() {
            for hi in &retained[i + 1..] {
                pairs.increment(lo, hi);
            }
        }
    }

    debug!(
        retained = counts.len(),
        pruned = pruned.len(),
        pairs = pairs.len(),
        "computed basket stats"
    );

    Ok(BasketStats {
        items: ItemStats {
            transaction_count: n,
            min_support,
            counts,
            pruned,
        },
        pairs,
    })
}

/// Whether `count` baskets holding `pair` can coexist with `items`.
///
/// A pair count is only meaningful when it is positive and no larger than
/// either member's support count. Stats from two different runs can violate
/// this, and would otherwise yield confidences above 1.
pub(crate) fn pair_fits(items: &ItemStats, pair: &ItemPair, count: usize) -> bool {
    count > 0 && count <= items.count(&pair.a) && count <= items.count(&pair.b)
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
