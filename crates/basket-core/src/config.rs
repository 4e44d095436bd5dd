use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::error::{BasketError, Result};
use crate::metric::WeightMetric;
use crate::threshold::{ensure_min_lift, ensure_unit_interval};

/// Location of the project config relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".basket/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// Thresholds and metric choice for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub min_support: f64,
    #[serde(default)]
    pub min_confidence: f64,
    #[serde(default)]
    pub min_lift: f64,
    #[serde(default)]
    pub weight_metric: WeightMetric,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_support: 0.0,
            min_confidence: 0.0,
            min_lift: 0.0,
            weight_metric: WeightMetric::default(),
            top_n: default_top_n(),
        }
    }
}

impl AnalysisConfig {
    /// Apply the engine's range checks up front.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::InvalidInput`] for any out-of-range threshold.
    pub fn validate(&self) -> Result<()> {
        ensure_unit_interval("min_support", self.min_support)?;
        ensure_unit_interval("min_confidence", self.min_confidence)?;
        ensure_min_lift(self.min_lift)
    }
}

/// Column mapping for grouped-line CSV input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_member_column")]
    pub member_column: String,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_item_column")]
    pub item_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            member_column: default_member_column(),
            date_column: default_date_column(),
            item_column: default_item_column(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

/// Load `.basket/config.toml` under `project_root`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_PATH);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    load_config_file(&path)
}

/// Load a project config from an explicit path. The file must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<ProjectConfig>(&content).map_err(|source| {
        BasketError::Config {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), "loaded project config");
    Ok(config)
}

/// Load the per-user config from the platform config directory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(path) = user_config_path() else {
        return Ok(UserConfig::default());
    };
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    toml::from_str::<UserConfig>(&content).map_err(|source| BasketError::Config { path, source })
}

#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("basket/config.toml"))
}

/// Resolve the output mode name from flag, `FORMAT` env, and user config.
///
/// Returns one of `"pretty"`, `"text"`, `"json"`.
#[must_use]
pub fn resolve_output(cli_json: bool, user_output: Option<&str>) -> String {
    let env_format = env::var("FORMAT").ok();
    resolve_output_inner(
        cli_json,
        user_output,
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    )
    .to_string()
}

fn resolve_output_inner(
    cli_json: bool,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> &'static str {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json";
    }

    if let Some(mode) = env_format.and_then(normalize_output_mode) {
        return mode;
    }

    if let Some(mode) = user_output.and_then(normalize_output_mode) {
        return mode;
    }

    if is_tty { "pretty" } else { "text" }
}

const fn default_top_n() -> usize {
    10
}

fn default_member_column() -> String {
    "Member_number".to_string()
}

fn default_date_column() -> String {
    "Date".to_string()
}

fn default_item_column() -> String {
    "itemDescription".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_project_config(dir: &Path, content: &str) {
        let path = dir.join(PROJECT_CONFIG_PATH);
        std::fs::create_dir_all(path.parent().expect("config has parent")).expect("mkdir");
        std::fs::write(&path, content).expect("write config");
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = TempDir::new().expect("tempdir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert!(cfg.analysis.min_support.abs() < f64::EPSILON);
        assert_eq!(cfg.analysis.weight_metric, WeightMetric::Lift);
        assert_eq!(cfg.analysis.top_n, 10);
        assert_eq!(cfg.input.member_column, "Member_number");
        assert_eq!(cfg.input.date_column, "Date");
        assert_eq!(cfg.input.item_column, "itemDescription");
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let root = TempDir::new().expect("tempdir");
        write_project_config(
            root.path(),
            r#"
[analysis]
min_support = 0.05
weight_metric = "jaccard"

[input]
item_column = "product"
"#,
        );

        let cfg = load_project_config(root.path()).expect("load");
        assert!((cfg.analysis.min_support - 0.05).abs() < 1e-12);
        assert_eq!(cfg.analysis.weight_metric, WeightMetric::Jaccard);
        assert!(cfg.analysis.min_confidence.abs() < f64::EPSILON);
        assert_eq!(cfg.input.item_column, "product");
        assert_eq!(cfg.input.member_column, "Member_number");
    }

    #[test]
    fn unknown_metric_in_config_is_parse_error() {
        let root = TempDir::new().expect("tempdir");
        write_project_config(root.path(), "[analysis]\nweight_metric = \"cosine\"\n");

        let err = load_project_config(root.path()).expect_err("must fail");
        assert!(matches!(err, BasketError::Config { .. }), "{err}");
    }

    #[test]
    fn validate_rejects_out_of_range_thresholds() {
        let mut cfg = AnalysisConfig::default();
        assert!(cfg.validate().is_ok());

        cfg.min_support = 1.5;
        assert!(matches!(cfg.validate(), Err(BasketError::InvalidInput(_))));

        cfg.min_support = 0.1;
        cfg.min_lift = -2.0;
        assert!(matches!(cfg.validate(), Err(BasketError::InvalidInput(_))));
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        assert_eq!(resolve_output_inner(true, Some("pretty"), Some("text"), true), "json");
    }

    #[test]
    fn env_beats_user_config_and_aliases_normalize() {
        assert_eq!(resolve_output_inner(false, Some("json"), Some("human"), false), "pretty");
        assert_eq!(resolve_output_inner(false, Some("table"), None, true), "text");
    }

    #[test]
    fn tty_default_applies_when_nothing_set() {
        assert_eq!(resolve_output_inner(false, None, None, true), "pretty");
        assert_eq!(resolve_output_inner(false, None, Some("bogus"), false), "text");
    }
}
