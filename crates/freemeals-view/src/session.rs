//! Async driver around [`ViewState`].
//!
//! The session owns the current snapshot and a [`ProviderSource`]. It is the
//! only place that awaits a fetch; everything else is a synchronous
//! [`ViewState::apply`].

use std::future::Future;

use freemeals_client::{FetchError, ProvidersClient};
use freemeals_core::Provider;

use crate::state::{Event, FetchRequest, ViewState};

/// Where provider batches come from.
pub trait ProviderSource {
    fn fetch_providers(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<Vec<Provider>, FetchError>> + Send;
}

impl ProviderSource for ProvidersClient {
    fn fetch_providers(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<Vec<Provider>, FetchError>> + Send {
        ProvidersClient::fetch_providers(self, location)
    }
}

/// Performs `request` against `source` and returns the event reporting it.
pub async fn resolve<S: ProviderSource>(source: &S, request: FetchRequest) -> Event {
    match source.fetch_providers(&request.location).await {
        Ok(providers) => Event::FetchSucceeded {
            ticket: request.ticket,
            providers,
        },
        Err(err) => Event::FetchFailed {
            ticket: request.ticket,
            message: err.to_string(),
        },
    }
}

pub struct Session<S> {
    source: S,
    state: ViewState,
}

impl<S: ProviderSource> Session<S> {
    pub fn new(source: S, state: ViewState) -> Self {
        Self { source, state }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Applies `event` and returns the fetch it asks for, if any.
    ///
    /// The fetch is not performed; pass it to [`resolve`] and dispatch the
    /// resulting event, or use [`Session::set_filter`].
    pub fn dispatch(&mut self, event: Event) -> Option<FetchRequest> {
        let transition = self.state.apply(event);
        self.state = transition.state;
        transition.fetch
    }

    /// Changes the location filter and waits for its batch to land.
    pub async fn set_filter(&mut self, location: &str) -> &ViewState {
        if let Some(request) = self.dispatch(Event::FilterChanged(location.to_owned())) {
            let event = resolve(&self.source, request).await;
            self.dispatch(event);
        }
        &self.state
    }

    /// Re-fetches the current filter.
    pub async fn refresh(&mut self) -> &ViewState {
        let location = self.state.filter().to_owned();
        self.set_filter(&location).await
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }
}
