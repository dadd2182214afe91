//! Conversion of raw Place Details payloads into [`PlaceDetails`].

use brewmap_core::{OpeningHours, PlaceDetails, PlaceReview};

use crate::types::RawPlace;

/// Converts a raw details `result` into the domain type.
///
/// Blank strings become `None`, reviews without text are dropped, and
/// `requested_id` stands in when the payload omits `place_id`.
pub(crate) fn normalize_place(raw: RawPlace, requested_id: &str) -> PlaceDetails {
    let (latitude, longitude) = raw
        .geometry
        .and_then(|g| g.location)
        .map_or((None, None), |loc| (Some(loc.lat), Some(loc.lng)));

    let opening_hours = raw.opening_hours.map(|h| OpeningHours {
        open_now: h.open_now,
        weekday_text: non_blank_items(h.weekday_text),
    });

    let recent_reviews = raw
        .reviews
        .into_iter()
        .filter_map(|r| {
            let text = non_blank(r.text)?;
            Some(PlaceReview {
                rating: r.rating.and_then(star_rating),
                text,
            })
        })
        .collect();

    PlaceDetails {
        place_id: non_blank(raw.place_id).unwrap_or_else(|| requested_id.to_owned()),
        name: non_blank(raw.name),
        formatted_address: non_blank(raw.formatted_address),
        vicinity: non_blank(raw.vicinity),
        rating: raw.rating.filter(|r| r.is_finite()),
        user_ratings_total: raw.user_ratings_total,
        price_level: raw.price_level,
        phone: non_blank(raw.formatted_phone_number),
        website: non_blank(raw.website),
        business_status: non_blank(raw.business_status),
        google_url: non_blank(raw.url),
        types: non_blank_items(raw.types),
        latitude,
        longitude,
        opening_hours,
        photo_references: raw
            .photos
            .into_iter()
            .map(|p| p.photo_reference)
            .filter(|r| !r.trim().is_empty())
            .collect(),
        recent_reviews,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn non_blank_items(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| non_blank(Some(v)))
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn star_rating(value: f64) -> Option<u8> {
    (value.is_finite() && (0.0..=5.0).contains(&value)).then(|| value.round() as u8)
}
