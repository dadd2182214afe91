//! AI-written short reviews for enriched places, via the Anthropic Messages API.

pub mod client;
pub mod error;
pub(crate) mod parse;
pub mod prompt;

pub use client::ReviewClient;
pub use error::ReviewError;
pub use prompt::build_prompt;
