//! Edge weighting for the co-purchase graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BasketError;

/// How an edge between two co-purchased items is weighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightMetric {
    /// Raw number of baskets containing both items.
    Count,
    /// Observed over expected co-occurrence under independence.
    #[default]
    Lift,
    /// `|A ∩ B| / |A ∪ B|` over the baskets containing each item.
    Jaccard,
}

impl WeightMetric {
    /// All supported metrics, in documentation order.
    pub const ALL: [Self; 3] = [Self::Count, Self::Lift, Self::Jaccard];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Lift => "lift",
            Self::Jaccard => "jaccard",
        }
    }
}

impl fmt::Display for WeightMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightMetric {
    type Err = BasketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "lift" => Ok(Self::Lift),
            "jaccard" => Ok(Self::Jaccard),
            other => Err(BasketError::invalid(format!(
                "unknown weight metric '{other}' (expected one of: count, lift, jaccard)"
            ))),
        }
    }
}
