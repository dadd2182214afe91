//! Domain types shared by the resolver, the API clients, and the exporters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the user's curated list, as read from the input CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub title: String,
    pub note: Option<String>,
    pub url: String,
    pub tags: Option<String>,
    pub comment: Option<String>,
}

/// What the URL resolver could extract from a Google Maps link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIdentifier {
    /// A provider place identifier, usable directly with Place Details.
    PlaceId(String),
    /// A free-text query (the human-readable place name from the URL path).
    SearchQuery(String),
    /// Nothing usable was found. Lookup must be skipped.
    Unresolved(UnresolvedReason),
}

impl ResolvedIdentifier {
    /// Short machine-readable label, used as the `resolved_kind` export column.
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::PlaceId(_) => "place_id",
            Self::SearchQuery(_) => "search_query",
            Self::Unresolved(_) => "unresolved",
        }
    }

    /// The identifier or query value, `None` when unresolved.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::PlaceId(v) | Self::SearchQuery(v) => Some(v),
            Self::Unresolved(_) => None,
        }
    }

    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

/// Why a URL could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Not parseable as an absolute URL, or the name did not decode to UTF-8.
    Malformed,
    /// No place id and no `/place/` path segment.
    NoPlaceSegment,
    /// A `/place/` segment exists but holds no usable name.
    EmptyName,
}

impl UnresolvedReason {
    /// Maps the reason onto the per-record failure taxonomy.
    #[must_use]
    pub fn failure_kind(self) -> FailureKind {
        match self {
            Self::Malformed => FailureKind::MalformedUrl,
            Self::NoPlaceSegment | Self::EmptyName => FailureKind::UnresolvableUrl,
        }
    }
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "URL is malformed"),
            Self::NoPlaceSegment => write!(f, "URL has no place id and no /place/ segment"),
            Self::EmptyName => write!(f, "URL /place/ segment holds no name"),
        }
    }
}

/// Normalized place metadata returned by the Places API.
///
/// Every field except `place_id` may be absent; absent scalars are `None` and
/// absent lists are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    /// 0 (free) to 4 (very expensive).
    pub price_level: Option<u8>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub business_status: Option<String>,
    /// Google Maps URL for the place, as reported by the API.
    pub google_url: Option<String>,
    pub types: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: Option<OpeningHours>,
    pub photo_references: Vec<String>,
    pub recent_reviews: Vec<PlaceReview>,
}

impl PlaceDetails {
    /// Display name, falling back to the place id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.place_id)
    }

    /// `(latitude, longitude)` when both are present and finite.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    /// One human-readable line per weekday, e.g. `"Monday: 7:00 AM – 5:00 PM"`.
    pub weekday_text: Vec<String>,
}

/// A customer review attached to a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceReview {
    pub rating: Option<u8>,
    pub text: String,
}

/// Raw photo bytes downloaded for one photo reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAsset {
    pub reference: String,
    pub bytes: Vec<u8>,
    /// Requested bounding width in pixels.
    pub width: u32,
    /// Requested bounding height in pixels.
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// ISO 639-1 code used as the JSON key in synthesizer replies.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "Mandarin Chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// AI-written review text in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedReview {
    pub language: Language,
    pub text: String,
}

/// Per-entry failure taxonomy. Every kind is recovered at the entry level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MalformedUrl,
    UnresolvableUrl,
    NoMatch,
    ApiError,
    PhotoFetchFailed,
    /// Review generation was requested but no credential is configured.
    SynthesisUnavailable,
    SynthesisFailed,
}

impl FailureKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedUrl => "MALFORMED_URL",
            Self::UnresolvableUrl => "UNRESOLVABLE_URL",
            Self::NoMatch => "NO_MATCH",
            Self::ApiError => "API_ERROR",
            Self::PhotoFetchFailed => "PHOTO_FETCH_FAILED",
            Self::SynthesisUnavailable => "SYNTHESIS_UNAVAILABLE",
            Self::SynthesisFailed => "SYNTHESIS_FAILED",
        }
    }

    /// `false` for kinds that describe a disabled feature rather than a failure.
    #[must_use]
    pub fn is_failure(self) -> bool {
        !matches!(self, Self::SynthesisUnavailable)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recovered failure attached to an [`EnrichedRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: FailureKind,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// The merged output for one [`SourceEntry`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub source: SourceEntry,
    pub resolved: ResolvedIdentifier,
    pub place: Option<PlaceDetails>,
    pub photos: Vec<PhotoAsset>,
    pub reviews: Vec<GeneratedReview>,
    pub diagnostics: Vec<Diagnostic>,
}

impl EnrichedRecord {
    /// A record carrying only the source fields.
    #[must_use]
    pub fn new(source: SourceEntry, resolved: ResolvedIdentifier) -> Self {
        Self {
            source,
            resolved,
            place: None,
            photos: Vec::new(),
            reviews: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// `true` when any attached diagnostic is a real failure.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.diagnostics.iter().any(|d| d.kind.is_failure())
    }

    /// Generated review text for `language`, if one was produced.
    #[must_use]
    pub fn review(&self, language: Language) -> Option<&str> {
        self.reviews
            .iter()
            .find(|r| r.language == language)
            .map(|r| r.text.as_str())
    }

    /// All diagnostics joined as `"KIND: detail; KIND: detail"`.
    #[must_use]
    pub fn failure_summary(&self) -> Option<String> {
        if self.diagnostics.is_empty() {
            return None;
        }
        Some(
            self.diagnostics
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// The name to show for this record: place name, else the source title.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.place
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or(&self.source.title)
    }
}
