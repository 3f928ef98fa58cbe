//! Auth service operations: sign-up, password sign-in, refresh, sign-out.

use chrono::Utc;
use curated_core::Email;

use super::types::{
    AuthSession, PasswordGrantRequest, RefreshGrantRequest, SignUpRequest, SignUpResponse,
    TokenGrant, UserMetadata,
};
use super::{SupabaseClient, SupabaseError};

/// Result of a sign-up.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// Email confirmation is off; the user is signed in immediately.
    SignedIn(AuthSession),
    /// The account exists but must be confirmed from the inbox first.
    ConfirmationRequired { email: Email },
}

/// Avatar generated for new accounts, seeded by the display name.
#[must_use]
pub fn default_avatar_url(full_name: &str) -> String {
    format!(
        "https://picsum.photos/seed/{}/200",
        urlencoding::encode(full_name)
    )
}

impl SupabaseClient {
    /// Register a new account with a display name and generated avatar.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the registration; the
    /// service's message is kept for display.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(
        &self,
        email: &Email,
        password: &str,
        full_name: &str,
    ) -> Result<SignUpOutcome, SupabaseError> {
        let body = SignUpRequest {
            email: email.as_str(),
            password,
            data: UserMetadata {
                full_name: Some(full_name.to_string()),
                avatar_url: Some(default_avatar_url(full_name)),
            },
        };

        let request = self.http().post(self.auth("signup")).json(&body);
        let response = self.authorize(request, None).send().await?;
        let text = Self::read_body(response).await?;

        match serde_json::from_str::<SignUpResponse>(&text)? {
            SignUpResponse::Grant(grant) => {
                tracing::info!("Account created and signed in");
                Ok(SignUpOutcome::SignedIn(AuthSession::from_grant(
                    grant,
                    Utc::now(),
                )?))
            }
            SignUpResponse::User(_) => {
                tracing::info!("Account created, awaiting email confirmation");
                Ok(SignUpOutcome::ConfirmationRequired {
                    email: email.clone(),
                })
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] with the service's message (for
    /// example "Invalid login credentials") when the credentials are rejected.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &Email, password: &str) -> Result<AuthSession, SupabaseError> {
        let body = PasswordGrantRequest {
            email: email.as_str(),
            password,
        };
        self.token_grant("password", &body).await
    }

    /// Exchange a refresh token for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh token is expired or revoked.
    #[tracing::instrument(skip_all)]
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, SupabaseError> {
        self.token_grant("refresh_token", &RefreshGrantRequest { refresh_token })
            .await
    }

    /// Revoke the session behind an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. Callers usually log and
    /// continue, since the local session is cleared either way.
    #[tracing::instrument(skip_all)]
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        let request = self.http().post(self.auth("logout"));
        let response = self.authorize(request, Some(access_token)).send().await?;
        Self::read_body(response).await?;
        Ok(())
    }

    /// Check that the auth service is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not answer with a success status.
    #[tracing::instrument(skip_all)]
    pub async fn health(&self) -> Result<(), SupabaseError> {
        let request = self.http().get(self.auth("health"));
        let response = self.authorize(request, None).send().await?;
        Self::read_body(response).await?;
        Ok(())
    }

    async fn token_grant<B: serde::Serialize + Sync>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<AuthSession, SupabaseError> {
        let request = self
            .http()
            .post(self.auth("token"))
            .query(&[("grant_type", grant_type)])
            .json(body);

        let response = self.authorize(request, None).send().await?;
        let text = Self::read_body(response).await?;
        let grant: TokenGrant = serde_json::from_str(&text)?;

        AuthSession::from_grant(grant, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_avatar_url_is_seeded_by_name() {
        assert_eq!(
            default_avatar_url("Ana Reyes"),
            "https://picsum.photos/seed/Ana%20Reyes/200"
        );
    }
}
