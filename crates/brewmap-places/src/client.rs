//! HTTP client for the Google Places web service.
//!
//! Wraps `reqwest` with key handling, status-envelope checks, and typed
//! response deserialization. Every JSON endpoint answers HTTP 200 with a
//! `"status"` field; anything other than `OK` (or the empty-result statuses
//! the caller asks to tolerate) surfaces as [`PlacesError::ApiStatus`].

use std::time::Duration;

use brewmap_core::{is_feature_id, PlaceDetails, ResolvedIdentifier};
use reqwest::{Client, Url};

use crate::error::{LookupFailure, PlacesError};
use crate::normalize::normalize_place;
use crate::types::{DetailsResponse, FindPlaceResponse, PlaceCandidate};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Fields requested from Place Details. Billing depends on this list.
const DETAILS_FIELDS: &str = "place_id,name,formatted_address,vicinity,geometry,rating,\
user_ratings_total,price_level,opening_hours,formatted_phone_number,website,photo,reviews,\
type,business_status,url";

const FIND_PLACE_ENDPOINT: &str = "findplacefromtext/json";
const DETAILS_ENDPOINT: &str = "details/json";
const PHOTO_ENDPOINT: &str = "photo";

/// Client for the Places web service.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (proxies, wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends endpoint paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Looks up full place details for a resolved identifier.
    ///
    /// - `PlaceId` goes straight to Place Details.
    /// - `SearchQuery` runs Find Place first and takes the top candidate.
    /// - `Unresolved` fails immediately without a request.
    ///
    /// # Errors
    ///
    /// - [`LookupFailure::UnresolvableUrl`] for unresolved identifiers.
    /// - [`LookupFailure::NoMatch`] when the search has no candidates or the
    ///   id is unknown to the API.
    /// - [`LookupFailure::Api`] for transport, HTTP, status and decode errors.
    pub async fn lookup(&self, identifier: &ResolvedIdentifier) -> Result<PlaceDetails, LookupFailure> {
        self.lookup_with_fallback(identifier, None).await
    }

    /// Like [`PlacesClient::lookup`], but retries a rejected feature id
    /// (`0x…:0x…`) as a name search on `fallback_name`.
    ///
    /// Details answers `INVALID_REQUEST` or `NOT_FOUND` for feature ids taken
    /// from a `data=` segment; the `/place/<Name>/` part of the same URL is
    /// then the only usable handle.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::lookup`]. When the fallback runs, its errors
    /// are the ones reported.
    pub async fn lookup_with_fallback(
        &self,
        identifier: &ResolvedIdentifier,
        fallback_name: Option<&str>,
    ) -> Result<PlaceDetails, LookupFailure> {
        match identifier {
            ResolvedIdentifier::Unresolved(reason) => Err(LookupFailure::UnresolvableUrl(*reason)),
            ResolvedIdentifier::SearchQuery(query) => self.search_then_details(query).await,
            ResolvedIdentifier::PlaceId(id) => {
                let rejected = match self.place_details(id).await {
                    Ok(Some(place)) => return Ok(place),
                    Ok(None) => LookupFailure::NoMatch { query: id.clone() },
                    Err(e) => LookupFailure::Api(e),
                };
                match fallback_name {
                    Some(name) if is_feature_id(id) && Self::is_rejected_id(&rejected) => {
                        tracing::debug!(feature_id = %id, name, "feature id rejected; searching by name");
                        self.search_then_details(name).await
                    }
                    _ => Err(rejected),
                }
            }
        }
    }

    async fn search_then_details(&self, query: &str) -> Result<PlaceDetails, LookupFailure> {
        let candidates = self.find_place(query).await?;
        let Some(first) = candidates.into_iter().next() else {
            return Err(LookupFailure::NoMatch {
                query: query.to_owned(),
            });
        };
        tracing::debug!(query, place_id = %first.place_id, "search matched place");
        self.place_details(&first.place_id)
            .await?
            .ok_or(LookupFailure::NoMatch {
                query: first.place_id,
            })
    }

    fn is_rejected_id(failure: &LookupFailure) -> bool {
        match failure {
            LookupFailure::NoMatch { .. } => true,
            LookupFailure::Api(PlacesError::ApiStatus { status, .. }) => status == "INVALID_REQUEST",
            _ => false,
        }
    }

    /// Resolves free text to ranked candidates via Find Place from text.
    ///
    /// `ZERO_RESULTS` yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] for any other non-OK status.
    /// - [`PlacesError::Http`] / [`PlacesError::UnexpectedStatus`] on transport
    ///   or HTTP failure.
    /// - [`PlacesError::Deserialize`] if the payload has the wrong shape.
    pub async fn find_place(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let url = self.build_url(
            FIND_PLACE_ENDPOINT,
            &[
                ("input", query),
                ("inputtype", "textquery"),
                ("fields", "place_id,name"),
            ],
        )?;
        let body = self.request_json(url, FIND_PLACE_ENDPOINT).await?;
        if Self::check_status(&body, &["ZERO_RESULTS"])?.is_some() {
            return Ok(Vec::new());
        }

        let parsed: FindPlaceResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("findplacefromtext(input={query})"),
                source: e,
            })?;
        Ok(parsed.candidates)
    }

    /// Fetches Place Details for `place_id`.
    ///
    /// Returns `Ok(None)` when the API reports `NOT_FOUND` or `ZERO_RESULTS`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] for any other non-OK status.
    /// - [`PlacesError::Http`] / [`PlacesError::UnexpectedStatus`] on transport
    ///   or HTTP failure.
    /// - [`PlacesError::Deserialize`] if the payload has the wrong shape.
    pub async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError> {
        let url = self.build_url(
            DETAILS_ENDPOINT,
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        )?;
        let body = self.request_json(url, DETAILS_ENDPOINT).await?;
        if Self::check_status(&body, &["NOT_FOUND", "ZERO_RESULTS"])?.is_some() {
            return Ok(None);
        }

        let parsed: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;
        Ok(Some(normalize_place(parsed.result, place_id)))
    }

    /// Downloads the image bytes for one photo reference, scaled to fit
    /// within `max_width` x `max_height`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] / [`PlacesError::UnexpectedStatus`] on transport
    ///   or HTTP failure.
    /// - [`PlacesError::EmptyBody`] if the endpoint returns no bytes.
    pub async fn fetch_photo(
        &self,
        photo_reference: &str,
        max_width: u32,
        max_height: u32,
    ) -> Result<Vec<u8>, PlacesError> {
        let url = self.build_url(
            PHOTO_ENDPOINT,
            &[
                ("photo_reference", photo_reference),
                ("maxwidth", &max_width.to_string()),
                ("maxheight", &max_height.to_string()),
            ],
        )?;
        let response = self.send(url, PHOTO_ENDPOINT).await?;
        let bytes = response.bytes().await.map_err(PlacesError::http)?;
        if bytes.is_empty() {
            return Err(PlacesError::EmptyBody {
                endpoint: PHOTO_ENDPOINT,
            });
        }
        Ok(bytes.to_vec())
    }

    /// Issues one cheap search to confirm the key is accepted.
    ///
    /// Only a rejected credential is reported; quota or transport problems
    /// are left for the per-entry lookups to surface.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when
    /// [`PlacesError::is_credential_error`] holds for it.
    pub async fn verify_credentials(&self) -> Result<(), PlacesError> {
        match self.find_place("coffee").await {
            Err(e) if e.is_credential_error() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Places credential check inconclusive; continuing");
                Ok(())
            }
            Ok(_) => Ok(()),
        }
    }

    /// Builds an endpoint URL with percent-encoded query parameters and the key.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET and maps non-2xx responses to [`PlacesError::UnexpectedStatus`].
    async fn send(&self, url: Url, endpoint: &'static str) -> Result<reqwest::Response, PlacesError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(PlacesError::http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
            });
        }
        Ok(response)
    }

    async fn request_json(
        &self,
        url: Url,
        endpoint: &'static str,
    ) -> Result<serde_json::Value, PlacesError> {
        let response = self.send(url, endpoint).await?;
        let body = response.text().await.map_err(PlacesError::http)?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }

    /// Checks the top-level `"status"` field.
    ///
    /// Returns `Ok(None)` for `OK`, `Ok(Some(status))` for a status listed in
    /// `tolerated`, and an error for everything else.
    fn check_status<'a>(
        body: &'a serde_json::Value,
        tolerated: &[&str],
    ) -> Result<Option<&'a str>, PlacesError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("UNKNOWN_ERROR");
        if status == "OK" {
            return Ok(None);
        }
        if tolerated.contains(&status) {
            return Ok(Some(status));
        }
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        Err(PlacesError::ApiStatus {
            status: status.to_owned(),
            message,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
