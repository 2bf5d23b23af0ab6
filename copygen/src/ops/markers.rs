//! Markers operation - registry listing.

use copygen_codegen::enablement::marker_registry;
use eyre::{Context, Result};

use crate::reports::{MarkerInfo, MarkersReport};

/// List the registered markers, ordered by name then target.
pub fn markers() -> Result<MarkersReport> {
    let registry = marker_registry().wrap_err("Failed to build the marker registry")?;

    let markers = registry
        .definitions()
        .map(|(def, help)| MarkerInfo {
            name: def.name,
            target: def.target.as_str(),
            shape: def.shape.as_str(),
            summary: help.map(ToString::to_string),
        })
        .collect();

    Ok(MarkersReport { markers })
}
