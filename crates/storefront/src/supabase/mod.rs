//! Backend-as-a-service clients: the `listings` table and the auth service.
//!
//! # Architecture
//!
//! - Plain `reqwest` calls against the REST table API (`/rest/v1`) and the
//!   auth API (`/auth/v1`); the backend is the source of truth for both
//! - Every request carries the anonymous `apikey`; signed-in calls replace the
//!   bearer token with the user's access token
//! - No caching and no retries: each call is a single request/response
//!
//! # Example
//!
//! ```rust,ignore
//! use curated_storefront::supabase::SupabaseClient;
//!
//! let client = SupabaseClient::new(&config.supabase)?;
//! let listings = client.fetch_listings().await?;
//! let session = client.sign_in(&email, &password).await?;
//! ```

mod auth;
mod listings;
pub mod types;

pub use auth::SignUpOutcome;
pub use types::{AuthSession, AuthUser};

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::SupabaseConfig;
use types::ApiErrorBody;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// Credentials or token rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by the backend.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A write that should return the stored row returned nothing.
    #[error("backend returned no rows")]
    EmptyResponse,

    /// The auth service returned a user without an email address.
    #[error("auth user has no valid email")]
    MissingEmail,

    /// The anon key cannot be sent as a header.
    #[error("invalid anon key format")]
    InvalidKey,
}

impl SupabaseError {
    /// The message to show a user on the join form.
    ///
    /// Auth failures carry the service's own wording; anything else gets a
    /// generic line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized(message) if !message.is_empty() => {
                message.clone()
            }
            Self::RateLimited(_) => "Too many attempts. Please wait a moment and try again.".to_string(),
            _ => "An error occurred during authentication.".to_string(),
        }
    }
}

/// Client for the backend's table and auth APIs.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    rest_url: String,
    auth_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::InvalidKey`] if the anon key cannot be sent as
    /// a header, or an HTTP error if the client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let anon_key = config.anon_key.expose_secret().to_string();

        let mut key = HeaderValue::from_str(&anon_key).map_err(|_| SupabaseError::InvalidKey)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let root = config.url.as_str().trim_end_matches('/');

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                client,
                rest_url: format!("{root}/rest/v1"),
                auth_url: format!("{root}/auth/v1"),
                anon_key,
            }),
        })
    }

    fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    fn rest(&self, table: &str) -> String {
        format!("{}/{table}", self.inner.rest_url)
    }

    fn auth(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.auth_url)
    }

    /// Bearer header value: the user's token when signed in, else the anon key.
    fn bearer(&self, access_token: Option<&str>) -> String {
        format!("Bearer {}", access_token.unwrap_or(&self.inner.anon_key))
    }

    /// Attach the bearer token to a request.
    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
        access_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        request.header(AUTHORIZATION, self.bearer(access_token))
    }

    /// Read a response body, turning non-success statuses into errors.
    async fn read_body(response: reqwest::Response) -> Result<String, SupabaseError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(SupabaseError::RateLimited(retry_after));
        }

        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| body.chars().take(200).collect());

        tracing::debug!(status = %status, message = %message, "Backend returned non-success status");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized(message));
        }

        Err(SupabaseError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use url::Url;

    use super::*;

    fn config_with_key(key: &str) -> SupabaseConfig {
        SupabaseConfig {
            url: Url::parse("https://project.supabase.example/").unwrap(),
            anon_key: SecretString::from(key),
        }
    }

    #[test]
    fn test_new_builds_api_roots() {
        let client = SupabaseClient::new(&config_with_key("anon-key")).unwrap();
        assert_eq!(
            client.rest("listings"),
            "https://project.supabase.example/rest/v1/listings"
        );
        assert_eq!(
            client.auth("health"),
            "https://project.supabase.example/auth/v1/health"
        );
    }

    #[test]
    fn test_new_rejects_key_unusable_as_header() {
        let result = SupabaseClient::new(&config_with_key("anon\nkey"));
        assert!(matches!(result, Err(SupabaseError::InvalidKey)));
    }

    #[test]
    fn test_error_display() {
        let err = SupabaseError::Api {
            status: 400,
            message: "Invalid login credentials".to_string(),
        };
        assert_eq!(err.to_string(), "API error (400): Invalid login credentials");
        assert_eq!(
            SupabaseError::RateLimited(30).to_string(),
            "rate limited, retry after 30 seconds"
        );
    }

    #[test]
    fn test_user_message_passes_through_service_wording() {
        let err = SupabaseError::Api {
            status: 422,
            message: "User already registered".to_string(),
        };
        assert_eq!(err.user_message(), "User already registered");

        let err = SupabaseError::Unauthorized("Invalid login credentials".to_string());
        assert_eq!(err.user_message(), "Invalid login credentials");
    }

    #[test]
    fn test_user_message_generic_fallback() {
        assert_eq!(
            SupabaseError::EmptyResponse.user_message(),
            "An error occurred during authentication."
        );
        let err = SupabaseError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "An error occurred during authentication.");
    }
}
