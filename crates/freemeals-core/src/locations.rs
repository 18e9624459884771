//! Location filter options derived from a fetched batch.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::provider::Provider;

/// Filter value meaning "every location".
pub const ALL_LOCATIONS: &str = "All";

/// The set of locations offered in the filter control.
///
/// Populated once per session from the first batch seen. A filtered batch
/// only contains one town, so recomputing on every fetch would shrink the
/// filter list down to the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationIndex {
    entries: Option<Vec<String>>,
}

impl LocationIndex {
    /// An index that has not seen any batch yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.entries.is_some()
    }

    /// Locations in display order: `"All"` first, then towns sorted.
    /// Empty until populated.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        self.entries.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, location: &str) -> bool {
        self.entries().iter().any(|entry| entry == location)
    }

    /// Fills the index from `batch` unless it is already populated.
    ///
    /// Returns `true` when this call populated the index.
    pub fn populate_from(&mut self, batch: &[Provider]) -> bool {
        if self.is_populated() {
            return false;
        }
        self.entries = Some(build_entries(batch));
        true
    }
}

fn build_entries(batch: &[Provider]) -> Vec<String> {
    let towns: BTreeSet<&str> = batch
        .iter()
        .filter_map(Provider::town)
        .filter(|town| *town != ALL_LOCATIONS)
        .collect();

    std::iter::once(ALL_LOCATIONS)
        .chain(towns)
        .map(str::to_owned)
        .collect()
}
