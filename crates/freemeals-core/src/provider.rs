//! Provider record as served by the providers endpoint.
//!
//! The endpoint is backed by a spreadsheet export, so every field arrives
//! under a free-text column name and values are loosely typed: numbers can
//! show up as strings, blank cells as `""`, and whole columns can be missing.
//! The deserializers below absorb that and hand the rest of the workspace
//! clean `Option`s.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder the source sheet uses for an address cell with no data.
pub const NOT_AVAILABLE: &str = "Not Available";

/// One charitable meal provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Display name. Not guaranteed unique across a batch.
    #[serde(
        rename(deserialize = "provider name"),
        default,
        deserialize_with = "lenient_string"
    )]
    pub name: String,
    #[serde(
        rename(deserialize = "provider url"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub url: Option<String>,
    #[serde(
        rename(deserialize = "offer description"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub offers: Option<String>,
    #[serde(
        rename(deserialize = "how to claim"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub instructions: Option<String>,
    #[serde(
        rename(deserialize = "marcus source url"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub marcus_source_url: Option<String>,
    #[serde(
        rename(deserialize = "provider source url"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub provider_source_url: Option<String>,
    #[serde(
        rename(deserialize = "opening time"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub open_time: Option<String>,
    #[serde(
        rename(deserialize = "closing time"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub close_time: Option<String>,
    #[serde(
        rename(deserialize = "offer days"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub offer_days: Option<String>,
    #[serde(
        rename(deserialize = "provider address 1"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub address_line1: Option<String>,
    #[serde(
        rename(deserialize = "provider address 2"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub address_line2: Option<String>,
    #[serde(
        rename(deserialize = "provider county"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub county: Option<String>,
    #[serde(
        rename(deserialize = "provider town/city"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub town_city: Option<String>,
    #[serde(
        rename(deserialize = "provider postcode"),
        default,
        deserialize_with = "lenient_text"
    )]
    pub postcode: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
}

impl Provider {
    /// Real latitude/longitude pair, when the record carries both.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Town/city for display purposes: `None` when blank or the sheet sentinel.
    #[must_use]
    pub fn town(&self) -> Option<&str> {
        present(self.town_city.as_deref())
    }
}

/// Returns the value only if it carries displayable content.
///
/// Blank strings and [`NOT_AVAILABLE`] both count as absent.
#[must_use]
pub fn present(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(value_to_text))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|v| v.is_finite()))
}
