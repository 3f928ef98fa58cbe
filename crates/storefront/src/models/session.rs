//! Session-related types.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use curated_core::{Capability, Email, Role, UserId};

use crate::supabase::{AuthSession, AuthUser};

/// Session-stored user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Auth service user id.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name from sign-up, if one was given.
    pub full_name: Option<String>,
    /// Avatar URL from sign-up.
    pub avatar_url: Option<String>,
    /// Role from the server-controlled app metadata.
    #[serde(default)]
    pub role: Role,
}

impl CurrentUser {
    /// Name shown on listings and the profile: the full name, else the
    /// email's local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.email.handle())
    }

    /// Avatar URL, or empty when none was set.
    #[must_use]
    pub fn avatar(&self) -> &str {
        self.avatar_url.as_deref().unwrap_or_default()
    }

    /// Whether this user's role grants `capability`.
    #[must_use]
    pub const fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }
}

impl From<AuthUser> for CurrentUser {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            role: user.role,
        }
    }
}

/// Backend tokens for the signed-in user.
///
/// Kept server-side in the session store; only the session id travels in the
/// cookie.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionTokens {
    /// Refresh this long before the access token actually expires.
    pub const REFRESH_MARGIN: Duration = Duration::seconds(60);

    /// Whether the access token is expired or about to be at `now`.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Self::REFRESH_MARGIN <= now
    }
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Split an auth session into what the session store keeps.
#[must_use]
pub fn split_auth_session(session: AuthSession) -> (CurrentUser, SessionTokens) {
    let tokens = SessionTokens {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_at: session.expires_at,
    };
    (CurrentUser::from(session.user), tokens)
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the backend access and refresh tokens.
    pub const AUTH_TOKENS: &str = "auth_tokens";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(full_name: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: UserId::new("u-1"),
            email: Email::parse("ana.reyes@curated.com").unwrap(),
            full_name: full_name.map(String::from),
            avatar_url: None,
            role: Role::User,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_email_handle() {
        assert_eq!(user(Some("Ana Reyes")).display_name(), "Ana Reyes");
        assert_eq!(user(None).display_name(), "ana.reyes");
        assert_eq!(user(Some("  ")).display_name(), "ana.reyes");
    }

    #[test]
    fn test_capabilities_follow_role() {
        let mut current = user(None);
        assert!(current.can(Capability::Sell));
        assert!(!current.can(Capability::ManageSite));
        current.role = Role::Admin;
        assert!(current.can(Capability::ManageSite));
    }

    #[test]
    fn test_needs_refresh() {
        let now = Utc::now();
        let tokens = SessionTokens {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: now + Duration::seconds(3600),
        };
        assert!(!tokens.needs_refresh(now));
        assert!(tokens.needs_refresh(now + Duration::seconds(3560)));
        assert!(!format!("{tokens:?}").contains("\"a\""));
    }

    #[test]
    fn test_role_defaults_when_missing_from_session() {
        let json = r#"{"id":"u-1","email":"a@b.co","full_name":null,"avatar_url":null}"#;
        let current: CurrentUser = serde_json::from_str(json).unwrap();
        assert_eq!(current.role, Role::User);
    }
}
