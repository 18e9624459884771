//! View state for the free meals provider directory.
//!
//! [`state`] holds the pure state machine, [`map`] the derived map
//! parameters, and [`session`] the async driver that performs fetches.

pub mod map;
pub mod session;
pub mod state;

pub use map::{markers, Coordinates, DiagonalPlacer, MapView, Marker, MarkerPlacer};
pub use session::{resolve, ProviderSource, Session};
pub use state::{
    Event, FetchRequest, FetchTicket, ListRow, LoadState, Mode, SelectedProvider, Transition,
    ViewState,
};
