//! Google Gemini provider using `generateContent` with a JSON response schema.
//!
//! The key comes from config only; environment variables are folded into
//! config before the provider is built.

use crate::error::LlmError;
use crate::llm::{
    build_provider_client_with_timeout, sanitize_api_error,
    traits::{Provider, StructuredRequest},
};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::pin::Pin;

mod types;
use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

const PROVIDER_NAME: &str = "gemini";

pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: Option<&str>, base_url: &str, timeout_secs: u64) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()).map(String::from),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_provider_client_with_timeout(timeout_secs),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_name(model)
        )
    }

    fn api_key(&self) -> anyhow::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key not found. Options:\n\
                 1. Set GEMINI_API_KEY or WRITEWISE_API_KEY\n\
                 2. Add api_key to ~/.writewise/config.toml\n\
                 3. Get an API key from https://aistudio.google.com/app/apikey"
            )
        })
    }

    fn build_request(request: &StructuredRequest) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                response_mime_type: "application/json",
                response_schema: &request.schema,
            },
        }
    }

    async fn ensure_success_status(
        response: reqwest::Response,
    ) -> anyhow::Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        let sanitized_error = sanitize_api_error(&error_text);
        tracing::warn!(%status, error = %sanitized_error, "Gemini request rejected");

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(LlmError::Auth {
                provider: PROVIDER_NAME.into(),
            }
            .into());
        }
        Err(LlmError::Request {
            provider: PROVIDER_NAME.into(),
            message: format!("Gemini API error ({status}): {sanitized_error}"),
        }
        .into())
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        if let Some(err) = &result.error {
            return Err(LlmError::Request {
                provider: PROVIDER_NAME.into(),
                message: sanitize_api_error(&err.message),
            }
            .into());
        }

        let candidate = result.candidates.as_ref().and_then(|c| c.first());
        let text = candidate
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            tracing::debug!(
                finish_reason = candidate.and_then(|c| c.finish_reason.as_deref()),
                "Gemini returned no text"
            );
            return Err(LlmError::EmptyResponse {
                provider: PROVIDER_NAME.into(),
            }
            .into());
        }

        Ok(text)
    }
}

impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn generate_json<'a>(
        &'a self,
        request: &'a StructuredRequest,
        model: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let api_key = self.api_key()?;
            let body = Self::build_request(request);
            let url = self.endpoint(model);
            tracing::debug!(%url, "sending Gemini request");

            let response = self
                .client
                .post(url)
                .header("x-goog-api-key", api_key)
                .json(&body)
                .send()
                .await
                .map_err(|err| LlmError::Request {
                    provider: PROVIDER_NAME.into(),
                    message: sanitize_api_error(&err.to_string()),
                })?;
            let response = Self::ensure_success_status(response).await?;
            let result: GenerateContentResponse = response.json().await?;
            Self::extract_text(&result)
        })
    }
}
