//! Transaction loaders.
//!
//! # Formats
//!
//! **CSV (grouped lines)**: one row per purchased item. Rows sharing the same
//! `(member, date)` pair form one basket:
//!
//! ```text
//! Member_number,Date,itemDescription
//! 1808,21-07-2015,tropical fruit
//! 1808,21-07-2015,whole milk
//! 2552,05-01-2015,whole milk
//! ```
//!
//! Column names come from [`InputConfig`]. Values are trimmed, empty item
//! cells are skipped, and baskets keep the order in which their key first
//! appears.
//!
//! **JSON**: an array of baskets, each an array of item names:
//!
//! ```text
//! [["milk", "bread"], ["bread", "butter"]]
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::config::InputConfig;
use crate::error::{BasketError, Result};
use crate::model::{Transaction, TransactionSet};

/// Supported on-disk transaction formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Infer the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::UnsupportedFormat`] for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(BasketError::UnsupportedFormat(format!(
                "cannot infer format from '{}'",
                path.display()
            ))),
        }
    }
}

impl FromStr for InputFormat {
    type Err = BasketError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(BasketError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Load transactions from `path`, inferring the format when `format` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the format is unknown, or
/// the contents do not parse.
#[instrument(skip(path, columns), fields(path = %path.display()))]
pub fn load_transactions(
    path: &Path,
    format: Option<InputFormat>,
    columns: &InputConfig,
) -> Result<TransactionSet> {
    let format = match format {
        Some(format) => format,
        None => InputFormat::from_path(path)?,
    };
    let reader = BufReader::new(File::open(path)?);

    let set = match format {
        InputFormat::Csv => read_csv(reader, columns)?,
        InputFormat::Json => read_json(reader)?,
    };
    debug!(%format, transactions = set.len(), "loaded transactions");
    Ok(set)
}

/// Read grouped-line CSV into baskets keyed by `(member, date)`.
///
/// # Errors
///
/// Returns [`BasketError::MissingColumns`] if a configured column is absent,
/// or [`BasketError::Csv`] for malformed rows.
pub fn read_csv<R: Read>(reader: R, columns: &InputConfig) -> Result<TransactionSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let (Some(member_idx), Some(date_idx), Some(item_idx)) = (
        position(&columns.member_column),
        position(&columns.date_column),
        position(&columns.item_column),
    ) else {
        return Err(BasketError::MissingColumns {
            expected: vec![
                columns.member_column.clone(),
                columns.date_column.clone(),
                columns.item_column.clone(),
            ],
            found: headers.iter().map(str::to_string).collect(),
        });
    };

    let mut baskets: Vec<Transaction> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut rows = 0usize;

    for record in rdr.records() {
        let record = record?;
        rows += 1;

        let item = record.get(item_idx).unwrap_or_default().trim();
        if item.is_empty() {
            continue;
        }
        let member = record.get(member_idx).unwrap_or_default().trim();
        let date = record.get(date_idx).unwrap_or_default().trim();

        let slot = *index
            .entry((member.to_string(), date.to_string()))
            .or_insert_with(|| {
                baskets.push(Transaction::default());
                baskets.len() - 1
            });
        baskets[slot].insert(item);
    }

    debug!(rows, baskets = baskets.len(), "grouped CSV rows into baskets");
    Ok(TransactionSet::new(baskets))
}

/// Read a JSON array of baskets.
///
/// Item names are trimmed and blank names dropped, matching the CSV loader.
///
/// # Errors
///
/// Returns [`BasketError::Json`] if the document is not an array of string arrays.
pub fn read_json<R: Read>(reader: R) -> Result<TransactionSet> {
    let raw: Vec<Vec<String>> = serde_json::from_reader(reader)?;
    Ok(TransactionSet::from_baskets(raw.into_iter().map(|basket| {
        basket
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
    })))
}
