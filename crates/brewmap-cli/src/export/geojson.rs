//! GeoJSON `FeatureCollection` of records that have coordinates.

use std::path::Path;

use anyhow::Context;
use brewmap_core::EnrichedRecord;
use serde_json::{json, Value};

use super::dataset::ExportRow;

/// Builds a `FeatureCollection` with one `Point` feature per record that has
/// finite latitude and longitude. Properties are the remaining export columns.
///
/// # Errors
///
/// Returns an error if a row cannot be converted to JSON.
pub(crate) fn feature_collection(records: &[EnrichedRecord]) -> anyhow::Result<Value> {
    let mut features = Vec::new();
    for record in records {
        let Some((lat, lng)) = record.place.as_ref().and_then(|p| p.coordinates()) else {
            continue;
        };

        let mut properties = serde_json::to_value(ExportRow::from(record))?;
        if let Some(map) = properties.as_object_mut() {
            map.remove("latitude");
            map.remove("longitude");
        }

        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [lng, lat] },
            "properties": properties,
        }));
    }

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}

/// Writes [`feature_collection`] to `path`, returning the feature count.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub(crate) fn write_geojson(path: &Path, records: &[EnrichedRecord]) -> anyhow::Result<usize> {
    let collection = feature_collection(records)?;
    let count = collection["features"].as_array().map_or(0, Vec::len);
    let body = serde_json::to_string_pretty(&collection)?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), features = count, "wrote GeoJSON export");
    Ok(count)
}
