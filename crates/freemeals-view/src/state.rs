//! View state and its transitions.
//!
//! [`ViewState`] is a snapshot. [`ViewState::apply`] takes an [`Event`] and
//! returns the next snapshot plus, for a filter change, the fetch that the
//! driver has to perform. Nothing in here does I/O.

use freemeals_core::{HeaderRowRule, LocationIndex, Provider, ProviderDetail, ALL_LOCATIONS};
use serde::Serialize;

use crate::map::{markers, Coordinates, MapView, Marker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    List,
    Map,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Identifies one issued fetch. Only the response carrying the most recently
/// issued ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchTicket {
    pub generation: u64,
    pub location: String,
}

/// A fetch the driver must perform and report back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    FilterChanged(String),
    FetchSucceeded {
        ticket: FetchTicket,
        providers: Vec<Provider>,
    },
    FetchFailed {
        ticket: FetchTicket,
        message: String,
    },
    /// A list row or map marker was picked.
    ProviderSelected(usize),
    ModeChanged(Mode),
    Deselected,
    FooterHidden,
}

/// Result of applying an event.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: ViewState,
    pub fetch: Option<FetchRequest>,
}

impl Transition {
    fn stay(state: ViewState) -> Self {
        Self { state, fetch: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    filter: String,
    data: Vec<Provider>,
    selected_index: Option<usize>,
    mode: Mode,
    map_view: MapView,
    locations: LocationIndex,
    load: LoadState,
    generation: u64,
    pending: Option<FetchTicket>,
    header_rule: HeaderRowRule,
    footer_visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(HeaderRowRule::default())
    }
}

/// One row of the provider list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub index: usize,
    pub name: String,
    pub address: String,
    pub is_selected: bool,
}

/// The open detail pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedProvider {
    pub index: usize,
    pub detail: ProviderDetail,
    /// Close-up map, only when the provider has real coordinates.
    pub inset: Option<MapView>,
}

impl ViewState {
    #[must_use]
    pub fn new(header_rule: HeaderRowRule) -> Self {
        Self {
            filter: ALL_LOCATIONS.to_owned(),
            data: Vec::new(),
            selected_index: None,
            mode: Mode::default(),
            map_view: MapView::national(),
            locations: LocationIndex::new(),
            load: LoadState::Idle,
            generation: 0,
            pending: None,
            header_rule,
            footer_visible: true,
        }
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn data(&self) -> &[Provider] {
        &self.data
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn map_view(&self) -> MapView {
        self.map_view
    }

    #[must_use]
    pub fn locations(&self) -> &LocationIndex {
        &self.locations
    }

    #[must_use]
    pub fn load(&self) -> &LoadState {
        &self.load
    }

    #[must_use]
    pub fn pending(&self) -> Option<&FetchTicket> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn header_rule(&self) -> HeaderRowRule {
        self.header_rule
    }

    #[must_use]
    pub fn footer_visible(&self) -> bool {
        self.footer_visible
    }

    /// Applies `event` and returns the next state.
    #[must_use]
    pub fn apply(&self, event: Event) -> Transition {
        let mut next = self.clone();
        match event {
            Event::FilterChanged(location) => {
                next.selected_index = None;
                next.generation += 1;
                let ticket = FetchTicket {
                    generation: next.generation,
                    location: location.clone(),
                };
                next.filter = location.clone();
                next.pending = Some(ticket.clone());
                next.load = LoadState::Loading;
                tracing::info!(location = %location, generation = ticket.generation, "location filter changed");
                return Transition {
                    state: next,
                    fetch: Some(FetchRequest { ticket, location }),
                };
            }
            Event::FetchSucceeded { ticket, providers } => {
                // Any unfiltered batch seeds the index, stale or not.
                if ticket.location == ALL_LOCATIONS {
                    next.seed_locations(&providers);
                }
                if !self.is_current(&ticket) {
                    return Transition::stay(next);
                }
                next.receive_batch(&providers);
            }
            Event::FetchFailed { ticket, message } => {
                if !self.is_current(&ticket) {
                    return Transition::stay(next);
                }
                tracing::warn!(location = %ticket.location, error = %message, "provider fetch failed");
                next.pending = None;
                next.data.clear();
                next.selected_index = None;
                next.load = LoadState::Failed(message);
            }
            Event::ProviderSelected(index) => {
                if index < next.data.len() {
                    next.selected_index = Some(index);
                } else {
                    tracing::debug!(index, len = next.data.len(), "ignoring out-of-range selection");
                }
            }
            Event::ModeChanged(mode) => {
                next.mode = mode;
                next.selected_index = None;
            }
            Event::Deselected => next.selected_index = None,
            Event::FooterHidden => next.footer_visible = false,
        }
        Transition::stay(next)
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        let current = self.pending.as_ref() == Some(ticket);
        if !current {
            tracing::debug!(
                generation = ticket.generation,
                location = %ticket.location,
                "discarding stale provider response"
            );
        }
        current
    }

    fn receive_batch(&mut self, batch: &[Provider]) {
        self.pending = None;
        self.data = self.header_rule.apply(&self.filter, batch);
        self.selected_index = None;
        self.map_view = if self.filter == ALL_LOCATIONS {
            MapView::national()
        } else {
            batch
                .first()
                .and_then(Coordinates::of)
                .map_or_else(MapView::national, MapView::town)
        };
        self.load = LoadState::Loaded;
    }

    fn seed_locations(&mut self, batch: &[Provider]) {
        if self.locations.populate_from(batch) {
            tracing::debug!(count = self.locations.entries().len(), "location index populated");
        }
    }

    /// Rows for the list view, in data order.
    #[must_use]
    pub fn list_rows(&self) -> Vec<ListRow> {
        self.data
            .iter()
            .enumerate()
            .map(|(index, provider)| ListRow {
                index,
                name: provider.name.clone(),
                address: freemeals_core::format_address(provider),
                is_selected: self.selected_index == Some(index),
            })
            .collect()
    }

    /// Markers for the map view. Synthetic positions are flagged on each marker.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        markers(&self.data)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Provider> {
        self.selected_index.and_then(|i| self.data.get(i))
    }

    /// Content of the detail pane, when a provider is selected.
    #[must_use]
    pub fn selected_detail(&self) -> Option<SelectedProvider> {
        let index = self.selected_index?;
        let provider = self.data.get(index)?;
        Some(SelectedProvider {
            index,
            detail: ProviderDetail::from_provider(provider),
            inset: Coordinates::of(provider).map(MapView::detail),
        })
    }

    /// Message shown instead of the list when there is nothing to render.
    #[must_use]
    pub fn placeholder(&self) -> Option<String> {
        if !self.data.is_empty() {
            return None;
        }
        Some(match &self.load {
            LoadState::Idle | LoadState::Loading => "Loading...".to_owned(),
            LoadState::Loaded => "No providers found".to_owned(),
            LoadState::Failed(message) => format!("Could not load providers: {message}"),
        })
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
