//! Sort state types for the catalog.
//!
//! # Example
//!
//! ```rust
//! use movieflix::app::{SortDirection, SortKey};
//!
//! let key: SortKey = "year".parse().unwrap();
//! assert_eq!(key, SortKey::Year);
//! assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field the catalog projection is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep server order.
    #[default]
    None,
    /// External rating, missing values count as zero.
    Rating,
    /// Release year, missing values count as zero.
    Year,
    /// Case-insensitive title.
    Title,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rating => "rating",
            Self::Year => "year",
            Self::Title => "title",
        }
    }

    /// Hint forwarded to the search endpoint; `None` when no sort is active.
    #[must_use]
    pub const fn as_hint(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            other => Some(other.as_str()),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "rating" => Ok(Self::Rating),
            "year" => Ok(Self::Year),
            "title" => Ok(Self::Title),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}
