//! `GeoJSON` export of the district severity map.
//!
//! Each district with known coordinates becomes a `Point` feature
//! carrying its severity, band, and marker styling. The collection's
//! foreign members record the state and its map centre so a frontend can
//! position the view.

use std::path::{Path, PathBuf};

use crime_index_dashboard_models::{AnalysisView, DistrictSeverity};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::DashboardError;

/// Circle marker radius in pixels.
pub const MARKER_RADIUS: u32 = 10;
/// Circle marker fill opacity.
pub const MARKER_OPACITY: f64 = 0.7;
/// Initial zoom level for a state map.
pub const STATE_ZOOM: u32 = 7;

/// Default export path for the map of `state`, e.g.
/// `tamil_nadu_severity_map.geojson`.
#[must_use]
pub fn default_map_path(state: &str) -> PathBuf {
    let slug: String = state
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    PathBuf::from(format!("{slug}_severity_map.geojson"))
}

fn district_feature(row: &DistrictSeverity) -> Option<Feature> {
    let coords = row.coordinates?;

    let mut properties = JsonObject::new();
    properties.insert("district".into(), row.district.clone().into());
    properties.insert("severity".into(), row.severity.value().into());
    properties.insert("band".into(), row.band.to_string().into());
    properties.insert("color".into(), row.band.color().into());
    properties.insert("radius".into(), MARKER_RADIUS.into());
    properties.insert("fillOpacity".into(), MARKER_OPACITY.into());
    properties.insert("totalIncidents".into(), row.total_incidents.into());
    properties.insert(
        "popup".into(),
        format!("{}: {}", row.district, row.severity).into(),
    );

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            coords.longitude,
            coords.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Builds the severity map for an analysis view.
///
/// Returns `None` when the state has no map centre, mirroring the
/// dashboard which omits the map entirely in that case.
#[must_use]
pub fn severity_map(view: &AnalysisView) -> Option<FeatureCollection> {
    let center = view.center?;

    let features: Vec<Feature> = view.districts.iter().filter_map(district_feature).collect();

    let mut members = JsonObject::new();
    members.insert("state".into(), view.state.clone().into());
    members.insert(
        "center".into(),
        serde_json::json!([center.longitude, center.latitude]),
    );
    members.insert("zoom".into(), STATE_ZOOM.into());
    if let Some(year) = view.year {
        members.insert("year".into(), year.into());
    }

    Some(FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(members),
    })
}

/// Writes the severity map for `view` to `path` as pretty-printed JSON.
///
/// Returns `Ok(false)` without writing anything when the view has no map
/// centre.
///
/// # Errors
///
/// Returns [`DashboardError`] if serialization or the file write fails.
pub fn write_severity_map(view: &AnalysisView, path: &Path) -> Result<bool, DashboardError> {
    let Some(collection) = severity_map(view) else {
        log::warn!(
            "Skipping map for {}: state coordinates not found",
            view.state
        );
        return Ok(false);
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, serde_json::to_string_pretty(&collection)?)?;
    log::info!(
        "Wrote {} map markers to {}",
        collection.features.len(),
        path.display()
    );
    Ok(true)
}
