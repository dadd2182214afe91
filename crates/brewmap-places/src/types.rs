//! Places API response types.
//!
//! These model the JSON returned by the legacy Places web service. Every
//! response carries a top-level `status` (`"OK"`, `"ZERO_RESULTS"`,
//! `"NOT_FOUND"`, `"OVER_QUERY_LIMIT"`, `"REQUEST_DENIED"`, ...) which the
//! client checks before deserializing the payload. Raw types are converted
//! into [`brewmap_core::PlaceDetails`] by `normalize`; nothing outside this
//! crate sees them.

use serde::Deserialize;

/// A candidate returned by Find Place from text, in ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaceCandidate {
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// findplacefromtext
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct FindPlaceResponse {
    #[serde(default)]
    pub candidates: Vec<PlaceCandidate>,
}

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub result: RawPlace,
}

/// The `result` object of a Place Details response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawPlace {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub business_status: Option<String>,
    /// The Google Maps URL for the place.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub opening_hours: Option<RawOpeningHours>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometry {
    #[serde(default)]
    pub location: Option<RawLatLng>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPhoto {
    pub photo_reference: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawReview {
    /// Whole stars, 1-5. Some responses encode it as a float.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
}
