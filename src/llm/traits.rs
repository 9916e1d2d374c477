use super::schema::Schema;
use std::future::Future;
use std::pin::Pin;

/// Prompt plus the output shape the provider must return.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub prompt: String,
    pub schema: Schema,
    pub temperature: f64,
}

pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send `request` and return the raw JSON text of the reply.
    fn generate_json<'a>(
        &'a self,
        request: &'a StructuredRequest,
        model: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}
