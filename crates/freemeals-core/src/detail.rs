//! Display model for the provider detail pane.

use serde::Serialize;

use crate::address::{format_address, maps_search_url};
use crate::provider::Provider;

/// Shown when a provider leaves a descriptive field empty.
pub const UNKNOWN: &str = "???";
/// Shown when a provider leaves an availability field empty.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Everything the detail pane renders for one provider, with placeholders
/// already substituted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderDetail {
    pub name: String,
    pub description: String,
    pub open_time: String,
    pub close_time: String,
    pub offer_days: String,
    pub how_to_claim: String,
    pub website: String,
    /// Link target for the website entry; absent when the provider has none.
    pub website_href: Option<String>,
    pub address: String,
    pub maps_url: String,
    pub sources: Vec<String>,
    pub coordinates: Option<(f64, f64)>,
}

impl ProviderDetail {
    #[must_use]
    pub fn from_provider(provider: &Provider) -> Self {
        let or = |value: &Option<String>, fallback: &str| {
            value.clone().unwrap_or_else(|| fallback.to_owned())
        };

        let sources = [&provider.marcus_source_url, &provider.provider_source_url]
            .into_iter()
            .flatten()
            .cloned()
            .collect();

        Self {
            name: provider.name.clone(),
            description: or(&provider.offers, UNKNOWN),
            open_time: or(&provider.open_time, NOT_SPECIFIED),
            close_time: or(&provider.close_time, NOT_SPECIFIED),
            offer_days: or(&provider.offer_days, NOT_SPECIFIED),
            how_to_claim: or(&provider.instructions, UNKNOWN),
            website: or(&provider.url, UNKNOWN),
            website_href: provider.url.clone(),
            address: format_address(provider),
            maps_url: maps_search_url(provider),
            sources,
            coordinates: provider.coordinates(),
        }
    }

    /// Availability line as rendered: `"<open> - <close>"`.
    #[must_use]
    pub fn times(&self) -> String {
        format!("{} - {}", self.open_time, self.close_time)
    }
}
