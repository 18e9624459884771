//! HTTP client for the providers endpoint.
//!
//! One logical request per location filter: `GET <endpoint>?location=<value>`.
//! Transient failures get a bounded number of retries; every other failure is
//! surfaced as a [`FetchError`] so callers can tell "fetch failed" apart from
//! "zero providers".

use std::time::Duration;

use freemeals_core::{AppConfig, Provider};
use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::retry::RetryPolicy;

/// Client for the providers endpoint.
///
/// Use [`ProvidersClient::from_config`] in the binary or
/// [`ProvidersClient::new`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ProvidersClient {
    client: Client,
    endpoint: Url,
    retry: RetryPolicy,
}

impl ProvidersClient {
    /// Builds a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] if the configured endpoint is
    /// not an absolute URL, or [`FetchError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.endpoint,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Creates a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute URL, or [`FetchError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint.trim()).map_err(|e| FetchError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            retry: RetryPolicy {
                max_retries,
                backoff_base_ms,
            },
        })
    }

    /// Fetches the raw provider batch for `location`.
    ///
    /// The batch is returned in response order and untouched; first-row
    /// handling belongs to the caller.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on network failure once retries are exhausted.
    /// - [`FetchError::UnexpectedStatus`] on a non-2xx response.
    /// - [`FetchError::Deserialize`] if the body is not a JSON array of
    ///   provider objects.
    pub async fn fetch_providers(&self, location: &str) -> Result<Vec<Provider>, FetchError> {
        let url = self.providers_url(location);
        tracing::debug!(%url, location, "fetching providers");

        let url = &url;
        let providers = self
            .retry
            .run(location, || self.request_providers(url))
            .await?;

        tracing::debug!(location, count = providers.len(), "fetched providers");
        Ok(providers)
    }

    /// Builds the request URL with the location filter percent-encoded.
    pub(crate) fn providers_url(&self, location: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("location", location);
        url
    }

    async fn request_providers(&self, url: &Url) -> Result<Vec<Provider>, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
