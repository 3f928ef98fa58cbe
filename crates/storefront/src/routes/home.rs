//! Home page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use tracing::instrument;

use curated_core::{Category, Listing};

use crate::catalog::{FeedParams, FeedQuery, HomeSection, HomeView, compose_home};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::Layout;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub categories: &'static [Category],
    pub active_category: Option<Category>,
    pub query: String,
    pub view: HomeView,
}

impl HomeTemplate {
    fn is_active(&self, category: &Category) -> bool {
        self.active_category == Some(*category)
    }

    fn greeting_name(&self) -> &str {
        self.layout
            .user
            .as_ref()
            .map_or("Maker", |u| u.display_name())
    }
}

/// Display the home page.
///
/// With `?category=` or `?q=` set, shows the flat browsing grid; otherwise
/// renders the visible page blocks in order.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(params): Query<FeedParams>,
) -> impl IntoResponse {
    let query = FeedQuery::from_params(&params);
    let listings: Vec<Listing> = state.listings().snapshot();
    let settings = state.settings().snapshot();

    let view = compose_home(&listings, &settings, &query, &mut rand::rng());

    HomeTemplate {
        layout: Layout::new(&state, user),
        categories: &Category::ALL,
        active_category: query.category,
        query: query.query,
        view,
    }
}

/// Stylesheet carrying the configured accent color.
///
/// Served as a file rather than an inline style so the CSP can stay strict.
pub async fn theme_css(State(state): State<AppState>) -> impl IntoResponse {
    let settings = state.settings().snapshot();
    let accent = settings.accent_color;
    let css = format!(
        ":root {{\n  --color-primary: {accent};\n  --color-primary-soft: color-mix(in srgb, {accent} 12%, white);\n  --color-primary-hover: color-mix(in srgb, {accent} 85%, black);\n}}\n"
    );
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        css,
    )
}
