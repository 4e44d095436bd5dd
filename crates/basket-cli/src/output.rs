//! Shared output layer for pretty/text/JSON parity across all `bsk` commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its result
//! accordingly: sectioned tables for humans, two-space separated rows for
//! pipes, or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format`
//! 2. hidden `--json` flag
//! 3. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 4. `output` key in the user config
//! 5. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! Steps 2–5 live in [`basket_core::config::resolve_output`].

use std::io::{self, Write};

use basket_core::{BasketError, ErrorCode};
use clap::ValueEnum;
use serde::Serialize;

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<20} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, aligned columns).
    Pretty,
    /// Token-efficient plain text for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Map a resolved mode name (`pretty`, `text`, `json`) to a mode.
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            "text" => Self::Text,
            _ => Self::Pretty,
        }
    }

    /// Returns `true` if pretty output was requested.
    pub const fn is_pretty(self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Resolve the output mode from CLI flags, environment, user config, and TTY.
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    user_output: Option<&str>,
) -> OutputMode {
    format_flag.unwrap_or_else(|| {
        OutputMode::from_name(&basket_core::config::resolve_output(json_flag, user_output))
    })
}

/// Implemented by any result row that can be rendered in all modes.
pub trait Renderable {
    /// Render one row for human consumption.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a self-contained JSON object.
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a single text row (no header; see [`table_headers`]).
    ///
    /// [`table_headers`]: Renderable::table_headers
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Column headers for text mode, in the same order as [`render_table`] fields.
    ///
    /// [`render_table`]: Renderable::render_table
    fn table_headers() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }
}

/// Serialize `value` as one compact JSON object.
pub fn write_json<T: Serialize + ?Sized>(w: &mut dyn Write, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *w, value).map_err(io::Error::from)
}

/// Render a list of [`Renderable`] rows to `out`.
///
/// - Pretty mode prints `title` as a section, then one row per item, or
///   `(none)` when the list is empty.
/// - Text mode prints the column header line followed by rows.
/// - JSON mode wraps the rows in an array.
pub fn write_list<R: Renderable>(
    out: &mut dyn Write,
    title: &str,
    items: &[R],
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => {
            pretty_section(out, title)?;
            if items.is_empty() {
                writeln!(out, "(none)")?;
            }
            for item in items {
                item.render_human(out)?;
            }
        }
        OutputMode::Text => {
            if !items.is_empty() {
                writeln!(out, "{}", R::table_headers().join("  "))?;
            }
            for item in items {
                item.render_table(out)?;
            }
        }
        OutputMode::Json => {
            write!(out, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(out, ",")?;
                }
                writeln!(out)?;
                item.render_json(out)?;
            }
            writeln!(out, "\n]")?;
        }
    }
    Ok(())
}

/// Render a list of [`Renderable`] rows to stdout.
pub fn render_list<R: Renderable>(title: &str, items: &[R], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_list(&mut out, title, items, mode)
}

/// Render a serializable value with explicit text and pretty renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. `E2001`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Build from a command failure, recovering code and hint from any
    /// [`BasketError`] in the chain. Anything else is reported as
    /// [`ErrorCode::InternalUnexpected`].
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        match err.downcast_ref::<BasketError>() {
            Some(basket) => Self {
                message,
                ..Self::from(basket)
            },
            None => {
                let code = ErrorCode::InternalUnexpected;
                Self {
                    suggestion: code.hint().map(str::to_string),
                    error_code: Some(code.code().to_string()),
                    ..Self::new(message)
                }
            }
        }
    }
}

impl From<&BasketError> for CliError {
    fn from(err: &BasketError) -> Self {
        Self {
            message: err.to_string(),
            suggestion: Some(err.suggestion()),
            error_code: Some(err.error_code().code().to_string()),
        }
    }
}

/// Write an error in the requested format.
pub fn write_error(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({ "error": error });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, mode, error)
}

/// Format a ratio for display.
pub fn fmt_ratio(value: f64) -> String {
    format!("{value:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SimpleItem {
        name: String,
        count: u32,
    }

    impl Renderable for SimpleItem {
        fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "{}: {}", self.name, self.count)
        }

        fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
            write_json(
                w,
                &serde_json::json!({ "name": self.name, "count": self.count }),
            )
        }

        fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "{}  {}", self.name, self.count)
        }

        fn table_headers() -> &'static [&'static str] {
            &["NAME", "COUNT"]
        }
    }

    fn items() -> Vec<SimpleItem> {
        vec![
            SimpleItem {
                name: "bread".into(),
                count: 3,
            },
            SimpleItem {
                name: "milk".into(),
                count: 2,
            },
        ]
    }

    fn list_to_string(items: &[SimpleItem], mode: OutputMode) -> String {
        let mut buf = Vec::new();
        write_list(&mut buf, "Items", items, mode).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn mode_names_map_to_modes() {
        assert_eq!(OutputMode::from_name("json"), OutputMode::Json);
        assert_eq!(OutputMode::from_name("text"), OutputMode::Text);
        assert_eq!(OutputMode::from_name("pretty"), OutputMode::Pretty);
        assert!(OutputMode::Pretty.is_pretty());
    }

    #[test]
    fn explicit_format_flag_wins() {
        let mode = resolve_output_mode(Some(OutputMode::Text), true, Some("json"));
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn json_flag_resolves_to_json() {
        assert_eq!(resolve_output_mode(None, true, Some("pretty")), OutputMode::Json);
    }

    #[test]
    fn text_list_has_header_then_rows() {
        let text = list_to_string(&items(), OutputMode::Text);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["NAME  COUNT", "bread  3", "milk  2"]);
    }

    #[test]
    fn json_list_is_a_valid_array() {
        let text = list_to_string(&items(), OutputMode::Json);
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["name"], "bread");

        let empty: serde_json::Value =
            serde_json::from_str(&list_to_string(&[], OutputMode::Json)).expect("json");
        assert_eq!(empty, serde_json::json!([]));
    }

    #[test]
    fn pretty_list_marks_empty_results() {
        let text = list_to_string(&[], OutputMode::Pretty);
        assert!(text.starts_with("Items\n"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn cli_error_carries_code_and_hint_through_context() {
        let err = anyhow::Error::from(BasketError::ItemNotFound("caviar".into()))
            .context("recommend failed");
        let cli = CliError::from_anyhow(&err);
        assert!(cli.message.contains("recommend failed"));
        assert!(cli.message.contains("caviar"));
        assert_eq!(cli.error_code.as_deref(), Some("E2002"));
        assert!(cli.suggestion.is_some());
    }

    #[test]
    fn foreign_errors_are_internal() {
        let err = anyhow::anyhow!("disk on fire");
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.message, "disk on fire");
        assert_eq!(cli.error_code.as_deref(), Some("E9001"));
        assert!(cli.suggestion.is_some());
    }

    #[test]
    fn json_error_is_wrapped() {
        let mut buf = Vec::new();
        write_error(&mut buf, OutputMode::Json, &CliError::new("bad")).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["error"]["message"], "bad");
    }

    #[test]
    fn human_error_shows_suggestion() {
        let err = BasketError::invalid("min_support must be in [0, 1]");
        let mut buf = Vec::new();
        write_error(&mut buf, OutputMode::Pretty, &CliError::from(&err)).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("error: "));
        assert!(text.contains("suggestion:"));
    }
}
