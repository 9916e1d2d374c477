// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod schema;
pub mod scrub;
pub mod traits;

// ── Provider implementations ────────────────────────────────────────────────
pub mod gemini;

// ── Re-exports ──────────────────────────────────────────────────────────────
pub use gemini::GeminiProvider;
pub use http_client::build_provider_client_with_timeout;
pub use schema::{Schema, SchemaType};
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::{Provider, StructuredRequest};

use crate::config::Config;
use std::sync::Arc;

/// Build the provider described by `config`.
pub fn create_provider(config: &Config) -> Arc<dyn Provider> {
    Arc::new(GeminiProvider::new(
        config.api_key.as_deref(),
        &config.provider.base_url,
        config.provider.timeout_secs,
    ))
}
