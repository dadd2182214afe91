use brewmap_core::{FailureKind, UnresolvedReason};
use thiserror::Error;

/// Errors returned by the Places API client.
///
/// Request URLs carry the API key, so none of these variants embed one.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-OK `status` field.
    #[error("Places API returned {status}{}", message_suffix(.message))]
    ApiStatus {
        status: String,
        message: Option<String>,
    },

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: &'static str },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("empty response body from {endpoint}")]
    EmptyBody { endpoint: &'static str },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

#[allow(clippy::ref_option)]
fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl PlacesError {
    /// `true` when the API rejected the key itself (invalid, restricted, or
    /// billing disabled). Retrying other entries would fail the same way.
    #[must_use]
    pub fn is_credential_error(&self) -> bool {
        match self {
            Self::ApiStatus { status, .. } => status == "REQUEST_DENIED",
            Self::UnexpectedStatus { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Strips the request URL (which contains the key) from transport errors.
    pub(crate) fn http(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

/// Why a place could not be looked up for one entry.
#[derive(Debug, Error)]
pub enum LookupFailure {
    /// The resolver produced nothing usable; no request was made.
    #[error("URL could not be resolved: {0}")]
    UnresolvableUrl(UnresolvedReason),

    /// The search returned zero candidates, or the id is unknown.
    #[error("no place matched \"{query}\"")]
    NoMatch { query: String },

    #[error("{0}")]
    Api(#[from] PlacesError),
}

impl LookupFailure {
    /// Maps onto the per-record failure taxonomy.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::UnresolvableUrl(reason) => reason.failure_kind(),
            Self::NoMatch { .. } => FailureKind::NoMatch,
            Self::Api(_) => FailureKind::ApiError,
        }
    }
}
