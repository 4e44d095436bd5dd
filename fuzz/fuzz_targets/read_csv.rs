#![no_main]

use basket_core::config::InputConfig;
use basket_core::load::read_csv;
use basket_graph::{compute_stats, derive_rules};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(set) = read_csv(data, &InputConfig::default()) else {
        return;
    };
    // Whatever parses must analyse without panicking.
    if let Ok(stats) = compute_stats(&set, 0.0) {
        let _ = derive_rules(&stats.items, &stats.pairs, 0.0, 0.0);
    }
});
