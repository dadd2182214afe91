//! Per-entry enrichment: resolve, look up, fetch photos, synthesize reviews.
//!
//! Every stage failure is recorded on the entry's [`EnrichedRecord`] as a
//! [`Diagnostic`] and the batch moves on. Output order always equals input
//! order, including when entries run concurrently.

mod pacing;

use std::time::Duration;

use brewmap_core::{
    place_name, resolve, Diagnostic, EnrichedRecord, FailureKind, Language, PlaceDetails,
    SourceEntry,
};
use brewmap_places::{fetch_photos, PhotoSize, PlacesClient};
use brewmap_reviews::ReviewClient;
use futures::stream::{self, StreamExt};

use pacing::Pacer;

/// Run-shaping switches for [`enrich_all`].
#[derive(Debug, Clone)]
pub(crate) struct EnrichOptions {
    pub download_photos: bool,
    pub generate_reviews: bool,
    /// Delay before each entry except the first.
    pub pacing_delay: Duration,
    pub max_photos: usize,
    pub photo_size: PhotoSize,
    /// Entries in flight at once. `1` is strictly sequential.
    pub max_concurrent: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EnrichSummary {
    pub total: usize,
    pub succeeded: usize,
    pub degraded: usize,
}

impl EnrichSummary {
    fn from_records(records: &[EnrichedRecord]) -> Self {
        let degraded = records.iter().filter(|r| r.is_degraded()).count();
        Self {
            total: records.len(),
            succeeded: records.len() - degraded,
            degraded,
        }
    }
}

pub(crate) struct EnrichReport {
    pub records: Vec<EnrichedRecord>,
    pub summary: EnrichSummary,
}

/// Enriches every entry, one [`EnrichedRecord`] per input entry, in order.
///
/// `reviews` is `None` when no review credential is configured; with
/// `generate_reviews` set, records are then annotated
/// [`FailureKind::SynthesisUnavailable`] instead of failing.
pub(crate) async fn enrich_all(
    entries: Vec<SourceEntry>,
    places: &PlacesClient,
    reviews: Option<&ReviewClient>,
    options: &EnrichOptions,
) -> EnrichReport {
    let total = entries.len();
    let pacer = Pacer::new(options.pacing_delay);
    let pacer = &pacer;

    let records: Vec<EnrichedRecord> = stream::iter(entries.into_iter().enumerate())
        .map(|(index, entry)| async move {
            pacer.wait_turn().await;
            tracing::info!(
                entry = index + 1,
                total,
                title = %entry.title,
                "enriching entry"
            );
            enrich_one(entry, places, reviews, options).await
        })
        .buffered(options.max_concurrent.max(1))
        .collect()
        .await;

    let summary = EnrichSummary::from_records(&records);
    EnrichReport { records, summary }
}

async fn enrich_one(
    entry: SourceEntry,
    places: &PlacesClient,
    reviews: Option<&ReviewClient>,
    options: &EnrichOptions,
) -> EnrichedRecord {
    let resolved = resolve(&entry.url);
    tracing::debug!(
        title = %entry.title,
        kind = resolved.kind_str(),
        value = resolved.value().unwrap_or_default(),
        "resolved URL"
    );
    let mut record = EnrichedRecord::new(entry, resolved);

    let fallback_name = place_name(&record.source.url);
    let place = match places
        .lookup_with_fallback(&record.resolved, fallback_name.as_deref())
        .await
    {
        Ok(place) => place,
        Err(e) => {
            note(&mut record, Diagnostic::new(e.failure_kind(), e.to_string()));
            return record;
        }
    };

    if options.download_photos && options.max_photos > 0 {
        attach_photos(&mut record, &place, places, options).await;
    }

    if options.generate_reviews {
        attach_reviews(&mut record, &place, reviews).await;
    }

    record.place = Some(place);
    record
}

async fn attach_photos(
    record: &mut EnrichedRecord,
    place: &PlaceDetails,
    places: &PlacesClient,
    options: &EnrichOptions,
) {
    let expected = options.max_photos.min(place.photo_references.len());
    let photos = fetch_photos(
        places,
        &place.photo_references,
        options.max_photos,
        options.photo_size,
    )
    .await;

    if photos.len() < expected {
        let detail = format!("{} of {expected} photos downloaded", photos.len());
        note(record, Diagnostic::new(FailureKind::PhotoFetchFailed, detail));
    }
    record.photos = photos;
}

async fn attach_reviews(
    record: &mut EnrichedRecord,
    place: &PlaceDetails,
    reviews: Option<&ReviewClient>,
) {
    let Some(client) = reviews else {
        note(
            record,
            Diagnostic::new(
                FailureKind::SynthesisUnavailable,
                "ANTHROPIC_API_KEY is not set",
            ),
        );
        return;
    };

    match client.generate(place, &Language::ALL).await {
        Ok(generated) => {
            for language in Language::ALL {
                if !generated.iter().any(|r| r.language == language) {
                    let detail = format!("reply had no {} review", language.display_name());
                    note(record, Diagnostic::new(FailureKind::SynthesisFailed, detail));
                }
            }
            record.reviews = generated;
        }
        Err(e) => note(
            record,
            Diagnostic::new(FailureKind::SynthesisFailed, e.to_string()),
        ),
    }
}

/// Attaches a diagnostic and logs it against the entry.
fn note(record: &mut EnrichedRecord, diagnostic: Diagnostic) {
    if diagnostic.kind.is_failure() {
        tracing::warn!(
            title = %record.source.title,
            kind = %diagnostic.kind,
            detail = %diagnostic.detail,
            "entry degraded"
        );
    } else {
        tracing::info!(
            title = %record.source.title,
            kind = %diagnostic.kind,
            detail = %diagnostic.detail,
            "entry annotated"
        );
    }
    record.diagnostics.push(diagnostic);
}

#[cfg(test)]
#[path = "enrich_test.rs"]
mod tests;
