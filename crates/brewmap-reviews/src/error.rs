use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from messages API: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The model reply contained no text block.
    #[error("model reply had no text content")]
    EmptyReply,

    /// The reply text held no parseable `{...}` object.
    #[error("model reply was not a JSON object: {0}")]
    MalformedReply(String),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
