use std::fmt;
use std::io;
use std::path::PathBuf;

/// Convenience alias for library results.
pub type Result<T, E = BasketError> = std::result::Result<T, E>;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidInput,
    ItemNotFound,
    MissingColumns,
    MalformedInput,
    UnsupportedFormat,
    InputReadFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidInput => "E2001",
            Self::ItemNotFound => "E2002",
            Self::MissingColumns => "E3001",
            Self::MalformedInput => "E3002",
            Self::UnsupportedFormat => "E3003",
            Self::InputReadFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidInput => "Invalid analysis input",
            Self::ItemNotFound => "Item not found",
            Self::MissingColumns => "Required CSV columns missing",
            Self::MalformedInput => "Malformed transaction file",
            Self::UnsupportedFormat => "Unsupported input format",
            Self::InputReadFailed => "Input file could not be read",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .basket/config.toml and retry."),
            Self::InvalidInput => Some(
                "Thresholds must lie in [0, 1] (lift: >= 0) and the transaction set must be non-empty.",
            ),
            Self::ItemNotFound => Some("Run `bsk stats <FILE>` to list the items that were retained."),
            Self::MissingColumns => {
                Some("Set [input] member_column/date_column/item_column in .basket/config.toml.")
            }
            Self::MalformedInput => Some("JSON input must be an array of arrays of item names."),
            Self::UnsupportedFormat => Some("Use a .csv or .json file, or pass --input-format."),
            Self::InputReadFailed => Some("Check the path and read permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the transaction model, loaders, config, and engine.
#[derive(Debug, thiserror::Error)]
pub enum BasketError {
    /// Out-of-range threshold, empty transaction set, or unknown enum value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A queried item is not present in the analysis result.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// The CSV header lacks one or more required columns.
    #[error("CSV must contain: {}. Found: {}", expected.join(", "), found.join(", "))]
    MissingColumns {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The input parsed but does not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The input format could not be determined or is not supported.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Config file failed to parse.
    #[error("failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BasketError {
    /// Shorthand for [`BasketError::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// The stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::ItemNotFound(_) => ErrorCode::ItemNotFound,
            Self::MissingColumns { .. } => ErrorCode::MissingColumns,
            Self::MalformedInput(_) | Self::Csv(_) | Self::Json(_) => ErrorCode::MalformedInput,
            Self::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::Io(_) => ErrorCode::InputReadFailed,
        }
    }

    /// Remediation hint, falling back to the code's generic message.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }
}
