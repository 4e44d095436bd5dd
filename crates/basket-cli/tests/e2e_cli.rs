//! E2E tests for `bsk` subcommands over real files.
//!
//! Covers: CSV grouping, JSON schema of each command, config-file defaults,
//! flag overrides, and structured error output.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

const GROCERIES_CSV: &str = "\
Member_number,Date,itemDescription
1,01-01-2015,milk
1,01-01-2015,bread
2,01-01-2015,milk
2,01-01-2015,bread
2,01-01-2015,butter
3,02-01-2015,bread
3,02-01-2015,butter
";

fn bsk_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bsk"));
    cmd.current_dir(dir);
    cmd.env("BASKET_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn write_groceries(dir: &Path) -> PathBuf {
    let path = dir.join("groceries.csv");
    std::fs::write(&path, GROCERIES_CSV).expect("write fixture");
    path
}

fn json_of(dir: &Path, args: &[&str]) -> Value {
    let output = bsk_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("bsk should not crash");
    assert!(
        output.status.success(),
        "bsk {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

fn rule_pairs(rules: &Value) -> Vec<(String, String)> {
    rules
        .as_array()
        .expect("rules array")
        .iter()
        .map(|r| {
            (
                r["antecedent"].as_str().expect("antecedent").to_string(),
                r["consequent"].as_str().expect("consequent").to_string(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// bsk stats
// ---------------------------------------------------------------------------

#[test]
fn stats_groups_csv_rows_into_baskets() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    let stats = json_of(dir.path(), &["stats", "groceries.csv"]);
    assert_eq!(stats["transaction_count"], 3);

    let items = stats["items"].as_array().expect("items");
    let bread = items
        .iter()
        .find(|i| i["item"] == "bread")
        .expect("bread row");
    assert_eq!(bread["count"], 3);
    assert!((bread["support"].as_f64().expect("support") - 1.0).abs() < 1e-9);

    let pairs = stats["pairs"].as_array().expect("pairs");
    let milk_bread = pairs
        .iter()
        .find(|p| p["a"] == "bread" && p["b"] == "milk")
        .expect("bread+milk");
    assert_eq!(milk_bread["count"], 2);
    assert!(stats["fingerprint"].as_str().expect("fingerprint").starts_with("blake3:"));
}

#[test]
fn stats_reports_pruned_items() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    let stats = json_of(dir.path(), &["stats", "groceries.csv", "--min-support", "0.9"]);
    assert_eq!(stats["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(stats["pruned"], serde_json::json!(["butter", "milk"]));
}

#[test]
fn stats_text_output_is_plain_rows() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    bsk_cmd(dir.path())
        .args(["--format", "text", "stats", "groceries.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("transactions  3"))
        .stdout(predicate::str::contains("bread  milk  2"));
}

// ---------------------------------------------------------------------------
// bsk rules
// ---------------------------------------------------------------------------

#[test]
fn rules_respect_min_confidence() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    let rules = json_of(dir.path(), &["rules", "groceries.csv", "--min-confidence", "0.6"]);
    let pairs = rule_pairs(&rules);
    assert!(pairs.contains(&("bread".into(), "milk".into())));
    assert!(!pairs.contains(&("milk".into(), "butter".into())));
    for rule in rules.as_array().expect("array") {
        assert!(rule["confidence"].as_f64().expect("confidence") >= 0.6);
    }
}

#[test]
fn rules_are_ranked_by_lift_then_confidence() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    let rules = json_of(dir.path(), &["rules", "groceries.csv", "-n", "2"]);
    assert_eq!(
        rule_pairs(&rules),
        vec![
            ("butter".to_string(), "bread".to_string()),
            ("milk".to_string(), "bread".to_string()),
        ]
    );
}

#[test]
fn config_file_supplies_default_thresholds() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());
    std::fs::create_dir_all(dir.path().join(".basket")).expect("mkdir");
    std::fs::write(
        dir.path().join(".basket/config.toml"),
        "[analysis]\nmin_confidence = 0.9\n",
    )
    .expect("write config");

    let rules = json_of(dir.path(), &["rules", "groceries.csv"]);
    assert_eq!(rule_pairs(&rules).len(), 2, "only the 100% rules survive");

    // Flags override the config file.
    let rules = json_of(
        dir.path(),
        &["rules", "groceries.csv", "--min-confidence", "0"],
    );
    assert_eq!(rule_pairs(&rules).len(), 6);
}

#[test]
fn explicit_config_path_sets_csv_columns() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("orders.csv"),
        "customer,day,product\n1,d1,tea\n1,d1,scone\n2,d1,tea\n",
    )
    .expect("write csv");
    std::fs::write(
        dir.path().join("columns.toml"),
        "[input]\nmember_column = \"customer\"\ndate_column = \"day\"\nitem_column = \"product\"\n",
    )
    .expect("write config");

    let stats = json_of(
        dir.path(),
        &["--config", "columns.toml", "stats", "orders.csv"],
    );
    assert_eq!(stats["transaction_count"], 2);
}

// ---------------------------------------------------------------------------
// graph queries
// ---------------------------------------------------------------------------

#[test]
fn graph_summary_has_stats_and_strongest_edges() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    let report = json_of(
        dir.path(),
        &["graph", "groceries.csv", "--metric", "count", "--top", "1"],
    );
    assert_eq!(report["metric"], "count");
    assert_eq!(report["stats"]["node_count"], 3);
    assert_eq!(report["stats"]["edge_count"], 3);
    assert_eq!(report["stats"]["component_count"], 1);
    assert_eq!(report["strongest"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["strongest"][0]["count"], 2);
}

#[test]
fn recommend_ranks_neighbours_by_count() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    let recs = json_of(
        dir.path(),
        &["recommend", "groceries.csv", "butter", "--metric", "count"],
    );
    let items: Vec<&str> = recs
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["item"].as_str().expect("item"))
        .collect();
    assert_eq!(items, vec!["bread", "milk"]);
}

#[test]
fn neighbours_pairs_and_bundles_agree() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    let neighbours = json_of(dir.path(), &["neighbours", "groceries.csv", "milk"]);
    assert_eq!(neighbours.as_array().map(Vec::len), Some(2));

    let pairs = json_of(dir.path(), &["pairs", "groceries.csv", "--min-count", "2"]);
    assert_eq!(pairs.as_array().map(Vec::len), Some(2));

    let bundles = json_of(dir.path(), &["bundles", "groceries.csv", "-k", "1"]);
    assert_eq!(bundles[0]["a"], "bread");
    assert_eq!(bundles[0]["b"], "butter");
    assert_eq!(bundles[0]["count"], 2);
}

#[test]
fn traverse_excludes_start_item() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    let bfs = json_of(dir.path(), &["traverse", "groceries.csv", "milk"]);
    assert_eq!(bfs["order"], "bfs");
    assert_eq!(bfs["related"], serde_json::json!(["bread", "butter"]));

    let dfs = json_of(dir.path(), &["traverse", "groceries.csv", "milk", "--dfs"]);
    assert_eq!(dfs["order"], "dfs");
    assert_eq!(dfs["related"], serde_json::json!(["bread", "butter"]));
}

#[test]
fn json_input_is_accepted() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("baskets.json"),
        r#"[["milk","bread"],["milk","bread","butter"],["bread","butter"]]"#,
    )
    .expect("write json");

    let stats = json_of(dir.path(), &["stats", "baskets.json"]);
    assert_eq!(stats["transaction_count"], 3);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn invalid_threshold_fails_with_error_code() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    let output = bsk_cmd(dir.path())
        .args(["stats", "groceries.csv", "--min-support", "1.5", "--json"])
        .output()
        .expect("bsk should not crash");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no partial output");

    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(err["error"]["error_code"], "E2001");
    assert!(
        err["error"]["message"]
            .as_str()
            .expect("message")
            .contains("min_support")
    );
}

#[test]
fn unknown_item_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    bsk_cmd(dir.path())
        .args(["--format", "text", "recommend", "groceries.csv", "caviar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item not found: caviar"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn missing_csv_columns_are_reported() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("bad.csv"), "a,b,c\n1,2,3\n").expect("write csv");

    let output = bsk_cmd(dir.path())
        .args(["stats", "bad.csv", "--json"])
        .output()
        .expect("bsk should not crash");
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(err["error"]["error_code"], "E3001");
}

#[test]
fn unsupported_extension_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("baskets.parquet"), "").expect("write");

    bsk_cmd(dir.path())
        .args(["--format", "text", "stats", "baskets.parquet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported input format"));
}

#[test]
fn unknown_metric_is_a_usage_error() {
    let dir = TempDir::new().expect("tempdir");
    write_groceries(dir.path());

    bsk_cmd(dir.path())
        .args(["graph", "groceries.csv", "--metric", "pagerank"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pagerank"));
}
