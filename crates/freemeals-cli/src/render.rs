//! Plain-text and JSON rendering of view state.

use std::io::{self, Write};

use freemeals_view::{Coordinates, MapView, Marker, SelectedProvider, ViewState};
use serde::Serialize;

pub(crate) fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

fn fmt_coordinates(c: Coordinates) -> String {
    format!("{:.5}, {:.5}", c.latitude, c.longitude)
}

fn fmt_map_view(view: MapView) -> String {
    format!("{} (zoom {})", fmt_coordinates(view.center), view.zoom)
}

pub(crate) fn locations<W: Write>(out: &mut W, state: &ViewState) -> io::Result<()> {
    for location in state.locations().entries() {
        writeln!(out, "{location}")?;
    }
    Ok(())
}

pub(crate) fn list<W: Write>(out: &mut W, state: &ViewState) -> io::Result<()> {
    if let Some(message) = state.placeholder() {
        return writeln!(out, "{message}");
    }
    for row in state.list_rows() {
        let marker = if row.is_selected { '>' } else { ' ' };
        writeln!(out, "{marker}[{}] {}", row.index, row.name)?;
        if !row.address.is_empty() {
            writeln!(out, "      {}", row.address)?;
        }
    }
    Ok(())
}

pub(crate) fn detail<W: Write>(out: &mut W, selected: &SelectedProvider) -> io::Result<()> {
    let d = &selected.detail;
    writeln!(out, "{}", d.name)?;
    writeln!(out, "Description: {}", d.description)?;
    writeln!(out, "Availability:")?;
    writeln!(out, "  Times: {}", d.times())?;
    writeln!(out, "  Days: {}", d.offer_days)?;
    writeln!(out, "How to claim: {}", d.how_to_claim)?;
    writeln!(out, "Website: {}", d.website)?;
    writeln!(out, "Location: {}", d.address)?;
    writeln!(out, "  {}", d.maps_url)?;
    if !d.sources.is_empty() {
        writeln!(out, "Source: {}", d.sources.join(", "))?;
    }
    if let Some(inset) = selected.inset {
        writeln!(out, "Map: {}", fmt_map_view(inset))?;
    }
    Ok(())
}

pub(crate) fn map<W: Write>(out: &mut W, view: MapView, markers: &[Marker]) -> io::Result<()> {
    writeln!(out, "center: {}", fmt_map_view(view))?;
    let synthetic = markers.iter().filter(|m| m.synthetic).count();
    if synthetic > 0 {
        writeln!(
            out,
            "{synthetic} of {} markers use placeholder positions, not real locations",
            markers.len()
        )?;
    }
    for marker in markers {
        let note = if marker.synthetic { "  (placeholder)" } else { "" };
        writeln!(
            out,
            "[{}] {}  {}{note}",
            marker.index,
            fmt_coordinates(marker.position),
            marker.name
        )?;
    }
    Ok(())
}
