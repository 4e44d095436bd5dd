#![no_main]

use basket_core::load::read_json;
use basket_core::WeightMetric;
use basket_graph::{build_graph, compute_stats};
use basket_graph::graph::{bfs_related, dfs_related};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(set) = read_json(data) else {
        return;
    };
    let Ok(stats) = compute_stats(&set, 0.0) else {
        return;
    };
    let graph = build_graph(&stats.items, &stats.pairs, WeightMetric::Jaccard);
    if let Some(first) = graph.items().first() {
        assert_eq!(
            bfs_related(&graph, first).len(),
            dfs_related(&graph, first).len()
        );
    }
});
