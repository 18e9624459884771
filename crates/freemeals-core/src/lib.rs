pub mod address;
pub mod app_config;
pub mod config;
pub mod detail;
pub mod error;
pub mod header;
pub mod locations;
pub mod provider;

pub use address::{format_address, maps_search_url};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use detail::ProviderDetail;
pub use error::ConfigError;
pub use header::HeaderRowRule;
pub use locations::{LocationIndex, ALL_LOCATIONS};
pub use provider::{Provider, NOT_AVAILABLE};
