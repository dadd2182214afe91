//! Shared domain model, URL resolution, and configuration for brewmap.

pub mod app_config;
pub mod config;
pub mod error;
pub mod resolver;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use resolver::{is_feature_id, place_name, resolve};
pub use types::{
    Diagnostic, EnrichedRecord, FailureKind, GeneratedReview, Language, OpeningHours,
    PhotoAsset, PlaceDetails, PlaceReview, ResolvedIdentifier, SourceEntry, UnresolvedReason,
};
