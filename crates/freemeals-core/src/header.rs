//! First-row handling for fetched batches.
//!
//! The unfiltered endpoint response starts with a row that is not a real
//! provider. Filtered responses are kept whole. Whether that asymmetry is
//! intended upstream is unknown, so the behavior is selectable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::locations::ALL_LOCATIONS;
use crate::provider::Provider;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderRowRule {
    /// Drop the first row only when the filter is `"All"`.
    #[default]
    AllOnly,
    /// Drop the first row for every filter.
    Always,
    /// Keep every row.
    Never,
}

impl HeaderRowRule {
    /// Whether the first record of a batch fetched for `filter` is dropped.
    #[must_use]
    pub fn drops_first_row(self, filter: &str) -> bool {
        match self {
            Self::AllOnly => filter == ALL_LOCATIONS,
            Self::Always => true,
            Self::Never => false,
        }
    }

    /// Returns the displayable part of `batch`.
    #[must_use]
    pub fn apply(self, filter: &str, batch: &[Provider]) -> Vec<Provider> {
        if self.drops_first_row(filter) {
            batch.iter().skip(1).cloned().collect()
        } else {
            batch.to_vec()
        }
    }
}

impl fmt::Display for HeaderRowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllOnly => write!(f, "all-only"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

impl FromStr for HeaderRowRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all-only" => Ok(Self::AllOnly),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!(
                "unknown header row rule '{other}' (expected all-only, always or never)"
            )),
        }
    }
}
