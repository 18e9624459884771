//! Display address composition.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::provider::{present, Provider};

const MAPS_PLACE_BASE: &str = "https://www.google.co.uk/maps/place/";

/// Joins a provider's address fields into a single display line.
///
/// Fields are taken in fixed order (line 1, line 2, county, town/city,
/// postcode). Blank fields and the `"Not Available"` sentinel are skipped.
#[must_use]
pub fn format_address(provider: &Provider) -> String {
    [
        provider.address_line1.as_deref(),
        provider.address_line2.as_deref(),
        provider.county.as_deref(),
        provider.town_city.as_deref(),
        provider.postcode.as_deref(),
    ]
    .into_iter()
    .filter_map(present)
    .collect::<Vec<_>>()
    .join(", ")
}

/// Map search link for the provider's formatted address.
#[must_use]
pub fn maps_search_url(provider: &Provider) -> String {
    let address = format_address(provider);
    format!(
        "{MAPS_PLACE_BASE}{}",
        utf8_percent_encode(&address, NON_ALPHANUMERIC)
    )
}
