//! Bounded photo download for a resolved place.

use brewmap_core::PhotoAsset;

use crate::client::PlacesClient;

/// Bounding box requested from the photo endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PhotoSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}

/// Downloads up to `max_count` photos, in reference order.
///
/// A failed download is logged and skipped; the caller compares the result
/// length against `min(max_count, references.len())` to detect shortfalls.
pub async fn fetch_photos(
    client: &PlacesClient,
    references: &[String],
    max_count: usize,
    size: PhotoSize,
) -> Vec<PhotoAsset> {
    let mut assets = Vec::with_capacity(max_count.min(references.len()));

    for (index, reference) in references.iter().take(max_count).enumerate() {
        match client
            .fetch_photo(reference, size.width, size.height)
            .await
        {
            Ok(bytes) => {
                tracing::debug!(index, bytes = bytes.len(), "photo downloaded");
                assets.push(PhotoAsset {
                    reference: reference.clone(),
                    bytes,
                    width: size.width,
                    height: size.height,
                });
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "photo download failed; skipping");
            }
        }
    }

    assets
}
