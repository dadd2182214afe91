/// Runtime configuration assembled from environment variables.
///
/// CLI flags may override the run-shaping fields (pacing, photo limits,
/// concurrency) after loading.
#[derive(Clone)]
pub struct AppConfig {
    pub google_maps_api_key: String,
    pub anthropic_api_key: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub pacing_delay_ms: u64,
    pub max_photos: usize,
    pub photo_max_width: u32,
    pub photo_max_height: u32,
    pub max_concurrent: usize,
    pub review_model: String,
    pub review_max_tokens: u32,
    /// Override for the Places API base URL (proxies, tests).
    pub places_base_url: Option<String>,
    /// Override for the Anthropic API base URL (proxies, tests).
    pub anthropic_base_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_maps_api_key", &"[redacted]")
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("pacing_delay_ms", &self.pacing_delay_ms)
            .field("max_photos", &self.max_photos)
            .field("photo_max_width", &self.photo_max_width)
            .field("photo_max_height", &self.photo_max_height)
            .field("max_concurrent", &self.max_concurrent)
            .field("review_model", &self.review_model)
            .field("review_max_tokens", &self.review_max_tokens)
            .field("places_base_url", &self.places_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .finish()
    }
}
