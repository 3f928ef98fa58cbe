//! Wire types for the backend's auth and table APIs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use curated_core::{Email, Role, UserId};

use super::SupabaseError;

/// Error body shapes returned by the auth and table APIs.
///
/// The auth service uses `msg` or `error_description`; the table API uses
/// `message`. Whichever is present wins, in that order.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// The most specific human-readable message in the body.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or_else(|| match self.error {
                Some(serde_json::Value::String(s)) => Some(s),
                _ => None,
            })
            .filter(|m| !m.trim().is_empty())
    }
}

/// User metadata set at sign-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Server-controlled metadata; only the backend can write it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

/// A user record as returned by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

/// A token grant as returned by `/token` and (when confirmation is off) `/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    pub user: UserRecord,
}

/// Response to `/signup`: a full grant, or just the user when email
/// confirmation is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Grant(TokenGrant),
    User(UserRecord),
}

/// Request body for `/signup`.
#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: UserMetadata,
}

/// Request body for the password grant.
#[derive(Debug, Serialize)]
pub struct PasswordGrantRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for the refresh-token grant.
#[derive(Debug, Serialize)]
pub struct RefreshGrantRequest<'a> {
    pub refresh_token: &'a str,
}

/// An authenticated user, validated from a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Email,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
}

impl TryFrom<UserRecord> for AuthUser {
    type Error = SupabaseError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let email = record
            .email
            .as_deref()
            .and_then(|e| Email::parse(e).ok())
            .ok_or(SupabaseError::MissingEmail)?;

        Ok(Self {
            id: UserId::new(record.id),
            email,
            full_name: record.user_metadata.full_name.filter(|n| !n.trim().is_empty()),
            avatar_url: record.user_metadata.avatar_url.filter(|a| !a.trim().is_empty()),
            role: record
                .app_metadata
                .role
                .as_deref()
                .map_or(Role::User, Role::from_tag),
        })
    }
}

/// A signed-in session: tokens plus the user they belong to.
#[derive(Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

impl AuthSession {
    /// Build a session from a token grant received at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::MissingEmail`] if the user has no usable email.
    pub fn from_grant(grant: TokenGrant, now: DateTime<Utc>) -> Result<Self, SupabaseError> {
        Ok(Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: now + Duration::seconds(grant.expires_in),
            user: AuthUser::try_from(grant.user)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_prefers_msg() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(body.into_message().unwrap(), "Invalid login credentials");
    }

    #[test]
    fn test_error_body_oauth_style() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#,
        )
        .unwrap();
        assert_eq!(body.into_message().unwrap(), "Email not confirmed");
    }

    #[test]
    fn test_error_body_table_api() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"code":"42501","message":"new row violates row-level security policy","details":null,"hint":null}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_message().unwrap(),
            "new row violates row-level security policy"
        );
    }

    #[test]
    fn test_sign_up_response_variants() {
        let user_only = r#"{"id":"u-1","email":"maker@curated.com","user_metadata":{"full_name":"Ana"}}"#;
        assert!(matches!(
            serde_json::from_str::<SignUpResponse>(user_only).unwrap(),
            SignUpResponse::User(_)
        ));

        let grant = r#"{"access_token":"a","refresh_token":"r","expires_in":3600,"token_type":"bearer",
            "user":{"id":"u-1","email":"maker@curated.com"}}"#;
        assert!(matches!(
            serde_json::from_str::<SignUpResponse>(grant).unwrap(),
            SignUpResponse::Grant(_)
        ));
    }

    #[test]
    fn test_auth_user_role_from_app_metadata() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id":"u-2","email":"owner@curated.com","app_metadata":{"provider":"email","role":"admin"}}"#,
        )
        .unwrap();
        let user = AuthUser::try_from(record).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.full_name, None);
    }

    #[test]
    fn test_auth_user_requires_email() {
        let record: UserRecord = serde_json::from_str(r#"{"id":"u-3","phone":"+15035550123"}"#).unwrap();
        assert!(matches!(
            AuthUser::try_from(record),
            Err(SupabaseError::MissingEmail)
        ));
    }

    #[test]
    fn test_session_expiry_from_grant() {
        let now = Utc::now();
        let grant: TokenGrant = serde_json::from_str(
            r#"{"access_token":"a","refresh_token":"r","expires_in":3600,"user":{"id":"u-1","email":"m@c.com"}}"#,
        )
        .unwrap();
        let session = AuthSession::from_grant(grant, now).unwrap();
        assert_eq!(session.expires_at, now + Duration::seconds(3600));
        assert!(!format!("{session:?}").contains("\"a\""));
    }
}
