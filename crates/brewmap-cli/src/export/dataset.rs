//! Flat export rows and the enriched CSV file.

use std::path::Path;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use brewmap_core::{EnrichedRecord, Language, ResolvedIdentifier};
use serde::{Deserialize, Serialize};

/// Separator for multi-valued cells (types, photo references, photos).
const LIST_SEPARATOR: &str = ";";
/// Separator between weekday lines in the `hours` cell.
const HOURS_SEPARATOR: &str = " | ";

/// One enriched record flattened into CSV-safe scalar columns.
///
/// Empty cells deserialize to `None`, so writing and re-reading a row
/// reproduces it exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ExportRow {
    pub original_title: String,
    pub original_note: Option<String>,
    pub original_url: String,
    pub original_tags: Option<String>,
    pub original_comment: Option<String>,
    pub resolved_kind: String,
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub business_status: Option<String>,
    pub google_url: Option<String>,
    pub types: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub open_now: Option<bool>,
    pub hours: Option<String>,
    pub photo_count: usize,
    pub photo_references: Option<String>,
    /// Standard base64 of each downloaded photo, joined with `;`.
    pub photos_base64: Option<String>,
    pub review_count: usize,
    pub recent_review: Option<String>,
    pub generated_review_en: Option<String>,
    pub generated_review_zh: Option<String>,
    /// `ok` or `degraded`.
    pub enrichment_status: String,
    pub failure_reason: Option<String>,
}

/// Empty cells read back as `None`, so an all-blank join is `None` here too.
fn joined(values: &[String], separator: &str) -> Option<String> {
    let joined = values.join(separator);
    (!joined.is_empty()).then_some(joined)
}

impl From<&EnrichedRecord> for ExportRow {
    fn from(record: &EnrichedRecord) -> Self {
        let place = record.place.as_ref();
        let coordinates = place.and_then(brewmap_core::PlaceDetails::coordinates);
        let hours = place.and_then(|p| p.opening_hours.as_ref());

        let place_id = place.map(|p| p.place_id.clone()).or_else(|| match &record.resolved {
            ResolvedIdentifier::PlaceId(id) => Some(id.clone()),
            _ => None,
        });

        let photo_references: Vec<String> =
            record.photos.iter().map(|p| p.reference.clone()).collect();
        let photos_base64: Vec<String> =
            record.photos.iter().map(|p| BASE64.encode(&p.bytes)).collect();

        Self {
            original_title: record.source.title.clone(),
            original_note: record.source.note.clone(),
            original_url: record.source.url.clone(),
            original_tags: record.source.tags.clone(),
            original_comment: record.source.comment.clone(),
            resolved_kind: record.resolved.kind_str().to_owned(),
            place_id,
            name: place.and_then(|p| p.name.clone()),
            formatted_address: place.and_then(|p| p.formatted_address.clone()),
            vicinity: place.and_then(|p| p.vicinity.clone()),
            rating: place.and_then(|p| p.rating),
            user_ratings_total: place.and_then(|p| p.user_ratings_total),
            price_level: place.and_then(|p| p.price_level),
            phone: place.and_then(|p| p.phone.clone()),
            website: place.and_then(|p| p.website.clone()),
            business_status: place.and_then(|p| p.business_status.clone()),
            google_url: place.and_then(|p| p.google_url.clone()),
            types: place.and_then(|p| joined(&p.types, LIST_SEPARATOR)),
            latitude: coordinates.map(|(lat, _)| lat),
            longitude: coordinates.map(|(_, lng)| lng),
            open_now: hours.and_then(|h| h.open_now),
            hours: hours.and_then(|h| joined(&h.weekday_text, HOURS_SEPARATOR)),
            photo_count: record.photos.len(),
            photo_references: joined(&photo_references, LIST_SEPARATOR),
            photos_base64: joined(&photos_base64, LIST_SEPARATOR),
            review_count: place.map_or(0, |p| p.recent_reviews.len()),
            recent_review: place
                .and_then(|p| p.recent_reviews.first())
                .map(|r| r.text.clone()),
            generated_review_en: record.review(Language::En).map(str::to_owned),
            generated_review_zh: record.review(Language::Zh).map(str::to_owned),
            enrichment_status: if record.is_degraded() { "degraded" } else { "ok" }.to_owned(),
            failure_reason: record.failure_summary(),
        }
    }
}

impl ExportRow {
    /// Decodes `photos_base64` back into raw image bytes, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any segment is not valid standard base64.
    pub(crate) fn decode_photos(&self) -> Result<Vec<Vec<u8>>, base64::DecodeError> {
        match self.photos_base64.as_deref() {
            None => Ok(Vec::new()),
            Some(encoded) => encoded
                .split(LIST_SEPARATOR)
                .map(|segment| BASE64.decode(segment))
                .collect(),
        }
    }
}

/// Writes one CSV row per record, with a header row.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn write_export_csv(path: &Path, records: &[EnrichedRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }
    writer.flush()?;
    tracing::debug!(path = %path.display(), rows = records.len(), "wrote CSV export");
    Ok(())
}

/// Re-reads a file written by [`write_export_csv`].
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a row does not match
/// the export columns.
pub(crate) fn read_export_csv(path: &Path) -> anyhow::Result<Vec<ExportRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(index, row)| row.with_context(|| format!("invalid export row {}", index + 1)))
        .collect()
}
