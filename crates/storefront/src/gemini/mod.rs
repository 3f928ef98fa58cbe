//! Client for the generative-text API.
//!
//! Only `generateContent` is used: once with a JSON response schema for the
//! category/price suggestion, once as plain text for descriptions. Callers in
//! [`crate::services::assist`] own the fallbacks; this client just reports
//! what went wrong.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::GeminiConfig;
use types::{ErrorEnvelope, GenerateRequest, GenerateResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the generative-text API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The response had no text.
    #[error("empty response")]
    Empty,

    /// Response JSON could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API key cannot be sent as a header.
    #[error("invalid API key format")]
    InvalidKey,
}

/// Generative-text API client.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| GeminiError::InvalidKey)?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.as_str().trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                endpoint,
                model: config.model.clone(),
            }),
        })
    }

    /// Generate plain text for a prompt.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response has no text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        self.generate(GenerateRequest::text(prompt)).await
    }

    /// Generate JSON constrained by `schema` and deserialize it.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the text is not valid JSON for `T`.
    pub async fn generate_json<T: serde::de::DeserializeOwned>(
        &self,
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<T, GeminiError> {
        let text = self
            .generate(GenerateRequest::text(prompt).with_json_schema(schema))
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    #[tracing::instrument(skip(self, request), fields(model = %self.inner.model))]
    async fn generate(&self, request: GenerateRequest) -> Result<String, GeminiError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(GeminiError::RateLimited(retry_after));
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        parsed.text().ok_or(GeminiError::Empty)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.inner.model)
            .finish_non_exhaustive()
    }
}
