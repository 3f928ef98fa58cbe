//! Sign-in, registration and sign-out route handlers.
//!
//! Credential failures re-render the join page with the auth service's own
//! message instead of redirecting.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use curated_core::Email;

use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, clear_signed_in, set_signed_in};
use crate::models::session::split_auth_session;
use crate::models::{SessionTokens, session_keys};
use crate::routes::Layout;
use crate::state::AppState;
use crate::supabase::{AuthSession, SignUpOutcome};

/// Shown after a sign-up that needs email confirmation.
pub const CONFIRMATION_NOTICE: &str =
    "Registration successful! Check your email for verification if required.";

// =============================================================================
// Form Types
// =============================================================================

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Query parameters for the join page.
#[derive(Debug, Default, Deserialize)]
pub struct JoinParams {
    /// `register` opens the registration tab.
    pub mode: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Join page template, with sign-in and registration tabs.
#[derive(Template, WebTemplate)]
#[template(path = "join.html")]
pub struct JoinTemplate {
    pub layout: Layout,
    pub register: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub email: String,
    pub full_name: String,
}

impl JoinTemplate {
    fn new(state: &AppState, register: bool) -> Self {
        Self {
            layout: Layout::new(state, None),
            register,
            error: None,
            notice: None,
            email: String::new(),
            full_name: String::new(),
        }
    }

    fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the join page. Signed-in visitors go home.
pub async fn page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(params): Query<JoinParams>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    let register = params.mode.as_deref() == Some("register");
    JoinTemplate::new(&state, register).into_response()
}

/// Handle the sign-in form.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let mut page = JoinTemplate::new(&state, false);
    page.email.clone_from(&form.email);

    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => return Ok(page.with_error(e.to_string()).into_response()),
    };

    match state.supabase().sign_in(&email, &form.password).await {
        Ok(auth) => {
            sign_in_session(&session, auth).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sign-in failed");
            Ok(page.with_error(e.user_message()).into_response())
        }
    }
}

/// Handle the registration form.
///
/// When the auth service requires email confirmation, the visitor lands on
/// the sign-in tab with a notice instead of being signed in.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let mut page = JoinTemplate::new(&state, true);
    page.email.clone_from(&form.email);
    page.full_name = form.full_name.trim().to_string();

    if page.full_name.is_empty() {
        return Ok(page.with_error("Please tell us your name.").into_response());
    }

    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => return Ok(page.with_error(e.to_string()).into_response()),
    };

    match state
        .supabase()
        .sign_up(&email, &form.password, &page.full_name)
        .await
    {
        Ok(SignUpOutcome::SignedIn(auth)) => {
            sign_in_session(&session, auth).await?;
            Ok(Redirect::to("/").into_response())
        }
        Ok(SignUpOutcome::ConfirmationRequired { email }) => {
            let mut page = JoinTemplate::new(&state, false);
            page.email = email.to_string();
            page.notice = Some(CONFIRMATION_NOTICE.to_string());
            Ok(page.into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            Ok(page.with_error(e.user_message()).into_response())
        }
    }
}

/// Sign out: revoke the backend session if possible, then clear ours.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let tokens: Option<SessionTokens> = session.get(session_keys::AUTH_TOKENS).await?;

    if let Some(tokens) = tokens
        && let Err(e) = state.supabase().sign_out(&tokens.access_token).await
    {
        tracing::warn!(error = %e, "Backend sign-out failed; clearing local session anyway");
    }

    clear_signed_in(&session).await?;
    Ok(Redirect::to("/"))
}

async fn sign_in_session(session: &Session, auth: AuthSession) -> Result<()> {
    // New identity, new session id.
    session.cycle_id().await?;
    let (user, tokens) = split_auth_session(auth);
    set_signed_in(session, &user, &tokens).await?;
    tracing::info!(user_id = %user.id, role = ?user.role, "User signed in");
    Ok(())
}
