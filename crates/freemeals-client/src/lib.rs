//! HTTP client for the free meals providers endpoint.

pub mod client;
pub mod error;
mod retry;

pub use client::ProvidersClient;
pub use error::FetchError;
