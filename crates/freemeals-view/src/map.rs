//! Map parameters and marker derivation.
//!
//! Many providers have no coordinates. So that every provider is still
//! clickable on the map, those records get a synthetic position on a fixed
//! diagonal off the west coast of Scotland. Synthetic positions are a display
//! fallback only: they say nothing about where the provider actually is, and
//! every such marker is flagged `synthetic`.

use freemeals_core::Provider;
use serde::Serialize;

/// Zoom used when the map shows the whole country.
pub const NATIONAL_ZOOM: u8 = 6;
/// Zoom used when the map is centered on a single town.
pub const TOWN_ZOOM: u8 = 12;
/// Zoom of the inset map in the detail pane.
pub const DETAIL_ZOOM: u8 = 20;

const NATIONAL_CENTER: Coordinates = Coordinates {
    latitude: 55.378_052,
    longitude: -3.435_973,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The record's real coordinates, if it has both halves.
    #[must_use]
    pub fn of(provider: &Provider) -> Option<Self> {
        provider
            .coordinates()
            .map(|(latitude, longitude)| Self::new(latitude, longitude))
    }
}

/// What the map surface is told to show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
}

impl MapView {
    /// Whole-country view.
    #[must_use]
    pub const fn national() -> Self {
        Self {
            center: NATIONAL_CENTER,
            zoom: NATIONAL_ZOOM,
        }
    }

    #[must_use]
    pub const fn town(center: Coordinates) -> Self {
        Self {
            center,
            zoom: TOWN_ZOOM,
        }
    }

    #[must_use]
    pub const fn detail(center: Coordinates) -> Self {
        Self {
            center,
            zoom: DETAIL_ZOOM,
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::national()
    }
}

/// A placeable marker. Clicking it selects `index` in the current data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub index: usize,
    pub name: String,
    pub position: Coordinates,
    /// `true` when `position` was made up by a [`MarkerPlacer`].
    pub synthetic: bool,
}

/// Supplies a position for records that have no coordinates of their own.
///
/// The default [`DiagonalPlacer`] is a pure display fallback; a geocoder can
/// implement this trait instead.
pub trait MarkerPlacer {
    fn place(&self, index: usize, provider: &Provider) -> Option<Coordinates>;
}

/// Places record `i` at `(base.lat - i*step, base.lon + i*step)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagonalPlacer {
    pub base: Coordinates,
    pub step: f64,
}

impl Default for DiagonalPlacer {
    fn default() -> Self {
        Self {
            base: Coordinates::new(56.0, -5.0),
            step: 0.05,
        }
    }
}

impl MarkerPlacer for DiagonalPlacer {
    fn place(&self, index: usize, _provider: &Provider) -> Option<Coordinates> {
        #[allow(clippy::cast_precision_loss)]
        let offset = index as f64 * self.step;
        Some(Coordinates::new(
            self.base.latitude - offset,
            self.base.longitude + offset,
        ))
    }
}

/// Markers for `data` using the default synthetic fallback.
#[must_use]
pub fn markers(data: &[Provider]) -> Vec<Marker> {
    markers_with(data, &DiagonalPlacer::default())
}

/// Markers for `data`. Records with real coordinates always use them;
/// `placer` is only consulted for the rest, and records it cannot place are
/// left off the map.
pub fn markers_with<P: MarkerPlacer + ?Sized>(data: &[Provider], placer: &P) -> Vec<Marker> {
    data.iter()
        .enumerate()
        .filter_map(|(index, provider)| {
            let (position, synthetic) = match Coordinates::of(provider) {
                Some(real) => (real, false),
                None => (placer.place(index, provider)?, true),
            };
            Some(Marker {
                index,
                name: provider.name.clone(),
                position,
                synthetic,
            })
        })
        .collect()
}
