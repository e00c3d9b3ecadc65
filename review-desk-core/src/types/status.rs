//! Status presentation and filter types

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Badge tone used by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Neutral,
    Positive,
    Negative,
}

/// Status badge: the text shown and its tone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub severity: Severity,
}

/// Status narrowing applied to the booking list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum StatusFilter {
    /// Keep every record
    #[default]
    All,
    /// Keep records whose effective status equals the value
    Only(String),
}

impl StatusFilter {
    /// Filter token for "no status narrowing"
    pub const ALL_TOKEN: &'static str = "all";

    /// Whether a record with the given effective status passes
    #[must_use]
    pub fn matches(&self, effective_status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => status == effective_status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == Self::ALL_TOKEN {
            Self::All
        } else {
            Self::Only(s.to_string())
        })
    }
}

impl From<String> for StatusFilter {
    fn from(value: String) -> Self {
        if value == Self::ALL_TOKEN {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<StatusFilter> for String {
    fn from(value: StatusFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_TOKEN),
            Self::Only(status) => f.write_str(status),
        }
    }
}
