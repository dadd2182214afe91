//! HTTP client for the Anthropic Messages API.

use std::time::Duration;

use brewmap_core::{GeneratedReview, Language, PlaceDetails};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;
use crate::parse::extract_reviews;
use crate::prompt::build_prompt;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/";
const MESSAGES_ENDPOINT: &str = "v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Writes short reviews for a place in one or more languages.
pub struct ReviewClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    messages_url: Url,
}

impl ReviewClient {
    /// Creates a client pointed at the production Anthropic API.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ReviewError> {
        Self::with_base_url(
            api_key,
            model,
            max_tokens,
            timeout_secs,
            user_agent,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (proxies, wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ReviewError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ReviewError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let invalid = |reason: String| ReviewError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let messages_url = Url::parse(&normalised)
            .and_then(|base| base.join(MESSAGES_ENDPOINT))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            max_tokens,
            messages_url,
        })
    }

    /// Generates reviews for `place` in the requested languages.
    ///
    /// A language the model leaves out (or answers with blank text) is simply
    /// absent from the result; callers decide how to report that.
    ///
    /// # Errors
    ///
    /// - [`ReviewError::Http`] / [`ReviewError::UnexpectedStatus`] on transport
    ///   or HTTP failure.
    /// - [`ReviewError::Deserialize`] if the response envelope has the wrong shape.
    /// - [`ReviewError::EmptyReply`] / [`ReviewError::MalformedReply`] when the
    ///   model text holds no usable JSON object.
    pub async fn generate(
        &self,
        place: &PlaceDetails,
        languages: &[Language],
    ) -> Result<Vec<GeneratedReview>, ReviewError> {
        if languages.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = build_prompt(place, languages);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: 1.0,
            messages: [Message {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(self.messages_url.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ReviewError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReviewError::Http(e.without_url()))?;
        if !status.is_success() {
            return Err(ReviewError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| ReviewError::Deserialize {
                context: format!("messages reply for {}", place.place_id),
                source: e,
            })?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");
        if text.trim().is_empty() {
            return Err(ReviewError::EmptyReply);
        }

        let reviews = extract_reviews(&text, languages)?;
        tracing::debug!(
            place_id = %place.place_id,
            requested = languages.len(),
            generated = reviews.len(),
            "reviews generated"
        );
        Ok(reviews)
    }
}
