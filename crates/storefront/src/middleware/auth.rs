//! Authentication extractors.
//!
//! The signed-in user and their backend tokens live in the session. Pages
//! that act on the backend as the user take [`RequireAuth`], which refreshes
//! an expiring access token before handing it out.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;

use curated_core::Capability;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::models::session::split_auth_session;
use crate::models::{CurrentUser, SessionTokens, session_keys};
use crate::state::AppState;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/join";

/// A signed-in user together with a usable access token.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: CurrentUser,
    pub tokens: SessionTokens,
}

impl SignedIn {
    /// The access token to send to the backend.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }
}

/// Extractor that requires a signed-in user.
///
/// If nobody is signed in, or the session can no longer be refreshed,
/// redirects to the join page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(auth): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", auth.user.display_name())
/// }
/// ```
pub struct RequireAuth(pub SignedIn);

/// Extractor that requires a user allowed to manage listings.
///
/// Individual admin pages check for stronger capabilities with
/// [`RequireAdmin::require`].
pub struct RequireAdmin(pub SignedIn);

/// Error returned when a request lacks the required authentication.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the join page.
    RedirectToLogin,
    /// Signed in, but the role does not allow this.
    Forbidden,
    /// No session layer is installed.
    MissingSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
            Self::MissingSession => {
                tracing::error!("Session layer missing from router");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<AuthRejection> for AppError {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::RedirectToLogin => Self::Unauthorized("sign in required".to_string()),
            AuthRejection::Forbidden => Self::Forbidden("insufficient role".to_string()),
            AuthRejection::MissingSession => Self::Internal("session layer missing".to_string()),
        }
    }
}

fn session_from_parts(parts: &Parts) -> Result<Session, AuthRejection> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or(AuthRejection::MissingSession)
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;

        let user: Option<CurrentUser> = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten();
        let tokens: Option<SessionTokens> = session
            .get(session_keys::AUTH_TOKENS)
            .await
            .ok()
            .flatten();

        let (Some(user), Some(tokens)) = (user, tokens) else {
            return Err(AuthRejection::RedirectToLogin);
        };

        if !tokens.needs_refresh(Utc::now()) {
            return Ok(Self(SignedIn { user, tokens }));
        }

        match state.supabase().refresh_session(&tokens.refresh_token).await {
            Ok(refreshed) => {
                let (user, tokens) = split_auth_session(refreshed);
                if let Err(e) = set_signed_in(&session, &user, &tokens).await {
                    tracing::warn!(error = %e, "Failed to store refreshed session");
                }
                tracing::debug!(user_id = %user.id, "Access token refreshed");
                Ok(Self(SignedIn { user, tokens }))
            }
            Err(e) => {
                tracing::info!(error = %e, "Session refresh failed, signing out");
                let _ = clear_signed_in(&session).await;
                Err(AuthRejection::RedirectToLogin)
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(auth) = RequireAuth::from_request_parts(parts, state).await?;
        if !auth.user.can(Capability::ManageListings) {
            tracing::warn!(user_id = %auth.user.id, path = %parts.uri.path(), "Admin access denied");
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(auth))
    }
}

impl RequireAdmin {
    /// Check a capability beyond listing management.
    ///
    /// # Errors
    ///
    /// Returns [`AuthRejection::Forbidden`] if the role does not grant it.
    pub const fn require(&self, capability: Capability) -> Result<(), AuthRejection> {
        if self.0.user.can(capability) {
            Ok(())
        } else {
            Err(AuthRejection::Forbidden)
        }
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike [`RequireAuth`], this never rejects and never talks to the backend.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.display_name()),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Store a signed-in user and their tokens in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_signed_in(
    session: &Session,
    user: &CurrentUser,
    tokens: &SessionTokens,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await?;
    session.insert(session_keys::AUTH_TOKENS, tokens).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// Clear the signed-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_signed_in(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    session
        .remove::<SessionTokens>(session_keys::AUTH_TOKENS)
        .await?;
    clear_sentry_user();
    Ok(())
}
