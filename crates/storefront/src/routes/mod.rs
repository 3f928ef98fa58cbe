//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Home page (?category=slug, ?q=text)
//! GET  /theme.css                - Accent color stylesheet
//! GET  /p/{id}                   - Listing detail (?image=index)
//!
//! # Join
//! GET  /join                     - Sign in / register page
//! POST /join/login               - Sign in
//! POST /join/register            - Register
//! POST /logout                   - Sign out
//!
//! # Selling (requires auth)
//! GET  /sell                     - Sell form
//! POST /sell                     - Create listing
//! POST /sell/assist              - Fill category and description from the title
//! GET  /me                       - Profile and own listings
//! POST /me/listings/{id}/delete  - Delete own listing
//!
//! # Admin (requires a staff role)
//! GET  /admin                    - Overview
//! GET  /admin/design             - Home block editor
//! POST /admin/design/{index}/up  - Move block up
//! POST /admin/design/{index}/down - Move block down
//! POST /admin/design/blocks/{id}/toggle - Show/hide block
//! GET  /admin/theme              - Theme form
//! POST /admin/theme              - Save theme
//! GET  /admin/items              - Inventory
//! POST /admin/items/{id}/delete  - Delete any listing
//! ```

pub mod admin;
pub mod home;
pub mod join;
pub mod listings;
pub mod profile;
pub mod sell;

use axum::{
    Router,
    routing::{get, post},
};
use curated_core::Capability;

use crate::models::CurrentUser;
use crate::state::AppState;

/// Data every page's header and footer need.
#[derive(Debug, Clone)]
pub struct Layout {
    pub site_name: String,
    pub user: Option<CurrentUser>,
    pub is_admin: bool,
}

impl Layout {
    /// Build the layout for the current settings and visitor.
    #[must_use]
    pub fn new(state: &AppState, user: Option<CurrentUser>) -> Self {
        let is_admin = user
            .as_ref()
            .is_some_and(|u| u.can(Capability::ManageListings));
        Self {
            site_name: state.settings().snapshot().site_name,
            user,
            is_admin,
        }
    }
}

/// Create the join routes router.
pub fn join_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(join::page))
        .route("/login", post(join::login))
        .route("/register", post(join::register))
}

/// Create the sell routes router.
pub fn sell_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sell::page).post(sell::create))
        .route("/assist", post(sell::assist))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show))
        .route("/listings/{id}/delete", post(profile::delete_listing))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::overview))
        .route("/design", get(admin::design))
        .route("/design/{index}/{direction}", post(admin::move_block))
        .route("/design/blocks/{id}/toggle", post(admin::toggle_block))
        .route("/theme", get(admin::theme).post(admin::update_theme))
        .route("/items", get(admin::items))
        .route("/items/{id}/delete", post(admin::delete_item))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/theme.css", get(home::theme_css))
        .route("/p/{id}", get(listings::show))
        .route("/logout", post(join::logout))
        .nest("/join", join_routes())
        .nest("/sell", sell_routes())
        .nest("/me", profile_routes())
        .nest("/admin", admin_routes())
}
