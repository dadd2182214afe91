//! Client for the Google Places web service: place lookup, details, photos.

pub mod client;
pub mod error;
pub(crate) mod normalize;
pub mod photos;
pub mod types;

pub use client::PlacesClient;
pub use error::{LookupFailure, PlacesError};
pub use photos::{fetch_photos, PhotoSize};
pub use types::PlaceCandidate;
