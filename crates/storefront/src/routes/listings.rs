//! Listing detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use curated_core::{Listing, ListingId};

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::Layout;
use crate::state::AppState;

/// Image shown when a listing has no images at all.
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1459411552884-841db9b3cc2a?auto=format&fit=crop&w=800&q=80";

/// Query parameters for the detail page.
#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    /// Index into the listing's images.
    pub image: Option<usize>,
}

/// Listing detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "listings/show.html")]
pub struct ListingTemplate {
    pub layout: Layout,
    pub listing: Listing,
    pub images: Vec<String>,
    pub selected: usize,
}

impl ListingTemplate {
    fn main_image(&self) -> &str {
        self.images
            .get(self.selected)
            .map_or(DEFAULT_IMAGE, String::as_str)
    }

    fn paragraphs(&self) -> Vec<&str> {
        self.listing
            .description
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Shown when the id is not in the store.
#[derive(Template, WebTemplate)]
#[template(path = "listings/not_found.html")]
pub struct ListingNotFoundTemplate {
    pub layout: Layout,
}

/// Display a single listing.
///
/// An out-of-range `?image=` index falls back to the first image.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<String>,
    Query(params): Query<DetailParams>,
) -> Response {
    let layout = Layout::new(&state, user);

    let Some(listing) = state.listings().get(&ListingId::new(id)) else {
        return (StatusCode::NOT_FOUND, ListingNotFoundTemplate { layout }).into_response();
    };

    let images = if listing.images.is_empty() {
        vec![DEFAULT_IMAGE.to_string()]
    } else {
        listing.images.clone()
    };
    let selected = params.image.filter(|i| *i < images.len()).unwrap_or(0);

    ListingTemplate {
        layout,
        listing,
        images,
        selected,
    }
    .into_response()
}
