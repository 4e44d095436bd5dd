use std::collections::BTreeSet;

use basket_core::{Transaction, TransactionSet, WeightMetric};
use basket_graph::{build_graph, compute_stats, derive_rules};
use proptest::prelude::*;

/// Baskets over a small alphabet so pairs collide often.
fn arb_transactions() -> impl Strategy<Value = TransactionSet> {
    let item = prop::sample::select(vec![
        "bread", "milk", "butter", "eggs", "jam", "tea", "coffee", "sugar",
    ]);
    let basket = prop::collection::vec(item, 0..6);
    prop::collection::vec(basket, 1..40).prop_map(TransactionSet::from_baskets)
}

fn recount(set: &TransactionSet, item: &str) -> usize {
    set.iter().filter(|t| t.contains(item)).count()
}

fn recount_pair(set: &TransactionSet, a: &str, b: &str) -> usize {
    set.iter()
        .filter(|t: &&Transaction| t.contains(a) && t.contains(b))
        .count()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn support_counts_match_ground_truth(set in arb_transactions()) {
        let stats = compute_stats(&set, 0.0).expect("stats");
        for (item, count) in stats.items.iter() {
            prop_assert_eq!(count, recount(&set, item));
        }
        prop_assert_eq!(stats.items.len(), set.distinct_items().len());
    }

    #[test]
    fn pair_counts_are_symmetric_and_exact(set in arb_transactions()) {
        let stats = compute_stats(&set, 0.0).expect("stats");
        let items: Vec<_> = set.distinct_items().into_iter().collect();
        for a in &items {
            for b in &items {
                prop_assert_eq!(stats.pairs.count(a, b), stats.pairs.count(b, a));
                if a != b {
                    prop_assert_eq!(stats.pairs.count(a, b), recount_pair(&set, a, b));
                }
            }
        }
    }

    #[test]
    fn rules_stay_in_bounds(set in arb_transactions(), min_support in 0.0f64..=1.0) {
        let stats = compute_stats(&set, min_support).expect("stats");
        let rules = derive_rules(&stats.items, &stats.pairs, 0.0, 0.0).expect("rules");
        for rule in &rules {
            prop_assert!((0.0..=1.0).contains(&rule.support));
            prop_assert!((0.0..=1.0).contains(&rule.confidence));
            prop_assert!(rule.lift >= 0.0);
        }
    }

    #[test]
    fn compute_stats_is_idempotent(set in arb_transactions(), min_support in 0.0f64..=1.0) {
        let first = compute_stats(&set, min_support).expect("stats");
        let second = compute_stats(&set, min_support).expect("stats");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rule_order_is_deterministic_and_ranked(set in arb_transactions()) {
        let stats = compute_stats(&set, 0.0).expect("stats");
        let first = derive_rules(&stats.items, &stats.pairs, 0.0, 0.0).expect("rules");
        let second = derive_rules(&stats.items, &stats.pairs, 0.0, 0.0).expect("rules");
        prop_assert_eq!(&first, &second);
        for window in first.windows(2) {
            prop_assert!(window[0].rank_cmp(&window[1]).is_le());
        }
    }

    #[test]
    fn pruned_items_never_appear_in_pairs(set in arb_transactions(), min_support in 0.0f64..=1.0) {
        let stats = compute_stats(&set, min_support).expect("stats");
        let pruned: BTreeSet<_> = stats.items.pruned().iter().cloned().collect();
        for (pair, _) in stats.pairs.iter() {
            prop_assert!(!pruned.contains(&pair.a));
            prop_assert!(!pruned.contains(&pair.b));
        }
    }

    #[test]
    fn graph_mirrors_pair_stats(set in arb_transactions()) {
        let stats = compute_stats(&set, 0.0).expect("stats");
        let graph = build_graph(&stats.items, &stats.pairs, WeightMetric::Count);
        prop_assert_eq!(graph.node_count(), stats.items.len());
        prop_assert_eq!(graph.edge_count(), stats.pairs.len());
        for edge in graph.edges() {
            prop_assert!(edge.a < edge.b);
            prop_assert_eq!(edge.count, stats.pairs.count(&edge.a, &edge.b));
        }
    }
}
