use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str = "brewmap/0.1 (coffee-shop-enrichment)";
pub const DEFAULT_REVIEW_MODEL: &str = "claude-sonnet-4-20250514";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `KEY=` in a .env file disables a feature.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let google_maps_api_key = optional("GOOGLE_MAPS_API_KEY")
        .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_MAPS_API_KEY".to_string()))?;
    let anthropic_api_key = optional("ANTHROPIC_API_KEY");

    let log_level = or_default("BREWMAP_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("BREWMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BREWMAP_USER_AGENT", DEFAULT_USER_AGENT);
    let pacing_delay_ms = parse_u64("BREWMAP_PACING_DELAY_MS", "100")?;
    let max_photos = parse_usize("BREWMAP_MAX_PHOTOS", "10")?;
    let photo_max_width = parse_u32("BREWMAP_PHOTO_MAX_WIDTH", "800")?;
    let photo_max_height = parse_u32("BREWMAP_PHOTO_MAX_HEIGHT", "800")?;
    let max_concurrent = parse_usize("BREWMAP_MAX_CONCURRENT", "1")?;
    let review_model = or_default("BREWMAP_REVIEW_MODEL", DEFAULT_REVIEW_MODEL);
    let review_max_tokens = parse_u32("BREWMAP_REVIEW_MAX_TOKENS", "1500")?;

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BREWMAP_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    if max_concurrent == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BREWMAP_MAX_CONCURRENT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if photo_max_width == 0 || photo_max_height == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BREWMAP_PHOTO_MAX_WIDTH/BREWMAP_PHOTO_MAX_HEIGHT".to_string(),
            reason: "photo dimensions must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        google_maps_api_key,
        anthropic_api_key,
        log_level,
        request_timeout_secs,
        user_agent,
        pacing_delay_ms,
        max_photos,
        photo_max_width,
        photo_max_height,
        max_concurrent,
        review_model,
        review_max_tokens,
        places_base_url: optional("BREWMAP_PLACES_BASE_URL"),
        anthropic_base_url: optional("BREWMAP_ANTHROPIC_BASE_URL"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
