//! Profile route handlers: the seller's own listings.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use curated_core::{Listing, ListingId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::routes::Layout;
use crate::state::AppState;

const DELETE_FAILED: &str = "We couldn't delete that item. Please try again.";

/// Query parameters for the profile page.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileParams {
    pub error: Option<String>,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub layout: Layout,
    pub user: CurrentUser,
    pub listings: Vec<Listing>,
    pub error: Option<String>,
}

impl ProfileTemplate {
    fn avatar(&self) -> String {
        match self.user.avatar() {
            "" => format!(
                "https://picsum.photos/seed/{}/200",
                urlencoding::encode(self.user.email.as_str())
            ),
            avatar => avatar.to_string(),
        }
    }
}

/// Display the signed-in user's profile and listings.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Query(params): Query<ProfileParams>,
) -> impl IntoResponse {
    let listings = state.listings().by_seller(&auth.user.id);
    let error = (params.error.as_deref() == Some("delete")).then(|| DELETE_FAILED.to_string());

    ProfileTemplate {
        layout: Layout::new(&state, Some(auth.user.clone())),
        user: auth.user,
        listings,
        error,
    }
}

/// Delete one of the signed-in user's own listings.
///
/// A listing that is present but belongs to someone else is refused. The
/// store only changes after the backend confirms the delete.
#[instrument(skip(state, auth), fields(user_id = %auth.user.id))]
pub async fn delete_listing(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = ListingId::new(id);

    if let Some(listing) = state.listings().get(&id)
        && listing.seller_id != auth.user.id
    {
        tracing::warn!(listing_id = %id, "Refusing to delete another seller's listing");
        return Err(AppError::Forbidden("not your listing".to_string()));
    }

    match state
        .supabase()
        .delete_listing(&id, auth.access_token())
        .await
    {
        Ok(()) => {
            let removed = state.listings().remove(&id);
            tracing::info!(listing_id = %id, removed, "Listing deleted");
            Ok(Redirect::to("/me"))
        }
        Err(e) => {
            tracing::error!(listing_id = %id, error = %e, "Failed to delete listing");
            Ok(Redirect::to("/me?error=delete"))
        }
    }
}
