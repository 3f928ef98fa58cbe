//! Sell flow route handlers: the listing form, creation and AI assist.
//!
//! The form posts to `/sell` to list an item; its AI ASSIST button posts the
//! same fields to `/sell/assist`, which re-renders the form filled in.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use curated_core::{Category, NewListing, Price};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::routes::Layout;
use crate::services::assist;
use crate::state::AppState;

/// Location prefilled on a new listing.
pub const DEFAULT_LOCATION: &str = "Portland, OR";

/// Image prefilled on a new listing.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1459411552884-841db9b3cc2a?auto=format&fit=crop&w=800&q=80";

/// Seller avatar used when the account has none.
pub const DEFAULT_SELLER_AVATAR: &str =
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=200&h=200&q=80";

const DEFAULT_CONDITION: &str = "New";

const SAVE_FAILED: &str = "Something went wrong saving your masterpiece.";
const TITLE_REQUIRED: &str = "What are you making? Enter a title first!";

// =============================================================================
// Form Types
// =============================================================================

/// Sell form data, shared by create and assist.
#[derive(Debug, Clone, Deserialize)]
pub struct SellForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub condition: String,
}

impl Default for SellForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            category: Category::default().slug().to_string(),
            description: String::new(),
            location: DEFAULT_LOCATION.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            condition: DEFAULT_CONDITION.to_string(),
        }
    }
}

impl SellForm {
    fn category(&self) -> Category {
        self.category.parse().unwrap_or_default()
    }

    fn condition(&self) -> &str {
        let condition = self.condition.trim();
        if condition.is_empty() {
            DEFAULT_CONDITION
        } else {
            condition
        }
    }

    /// Build the create payload, taking seller fields from the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns a message for the form when the price does not parse or the
    /// listing fails validation.
    pub fn to_new_listing(&self, seller: &CurrentUser) -> Result<NewListing, String> {
        let price = Price::parse(&self.price).map_err(|e| e.to_string())?;

        let location = match self.location.trim() {
            "" => DEFAULT_LOCATION,
            location => location,
        };
        let image_url = match self.image_url.trim() {
            "" => DEFAULT_IMAGE_URL,
            url => url,
        };
        let seller_avatar = match seller.avatar() {
            "" => DEFAULT_SELLER_AVATAR,
            avatar => avatar,
        };

        let listing = NewListing {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            category: self.category(),
            location: location.to_string(),
            images: vec![image_url.to_string()],
            seller_id: seller.id.clone(),
            seller_name: seller.display_name().to_string(),
            seller_avatar: seller_avatar.to_string(),
            verified: true,
            discount: None,
        };
        listing.validate().map_err(|e| e.to_string())?;
        Ok(listing)
    }
}

/// Query parameters for the sell page.
#[derive(Debug, Default, Deserialize)]
pub struct SellParams {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Sell page template.
#[derive(Template, WebTemplate)]
#[template(path = "sell.html")]
pub struct SellTemplate {
    pub layout: Layout,
    pub seller_email: String,
    pub categories: &'static [Category],
    pub form: SellForm,
    pub error: Option<String>,
    /// Suggested price range from the last assist.
    pub price_hint: Option<String>,
}

impl SellTemplate {
    fn new(state: &AppState, user: CurrentUser, form: SellForm) -> Self {
        Self {
            seller_email: user.email.to_string(),
            layout: Layout::new(state, Some(user)),
            categories: &Category::ALL,
            form,
            error: None,
            price_hint: None,
        }
    }

    fn is_selected(&self, category: &Category) -> bool {
        self.form.category() == *category
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the sell form.
pub async fn page(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Query(params): Query<SellParams>,
) -> impl IntoResponse {
    let mut page = SellTemplate::new(&state, auth.user, SellForm::default());
    if params.error.as_deref() == Some("save") {
        page.error = Some(SAVE_FAILED.to_string());
    }
    page
}

/// Create a listing as the signed-in user.
///
/// Invalid input re-renders the form. A rejected write redirects back with
/// a generic message and leaves the store untouched.
#[instrument(skip(state, auth, form), fields(user_id = %auth.user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(form): Form<SellForm>,
) -> Response {
    let draft = match form.to_new_listing(&auth.user) {
        Ok(draft) => draft,
        Err(message) => {
            let mut page = SellTemplate::new(&state, auth.user, form);
            page.error = Some(message);
            return page.into_response();
        }
    };

    match state
        .supabase()
        .insert_listing(&draft, auth.access_token())
        .await
    {
        Ok(listing) => {
            tracing::info!(listing_id = %listing.id, "Listing created");
            state.listings().prepend(listing);
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save listing");
            Redirect::to("/sell?error=save").into_response()
        }
    }
}

/// Suggest a category and price range, then draft a description.
///
/// Never fails: without a configured model, or when the model errors, the
/// form is filled with fallbacks.
#[instrument(skip(state, auth, form), fields(title = %form.title))]
pub async fn assist(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(mut form): Form<SellForm>,
) -> impl IntoResponse {
    let title = form.title.trim().to_string();
    if title.is_empty() {
        let mut page = SellTemplate::new(&state, auth.user, form);
        page.error = Some(TITLE_REQUIRED.to_string());
        return page;
    }

    let draft = assist::assist(state.gemini(), &title, form.condition()).await;
    form.category = draft.suggestion.category.slug().to_string();
    form.description = draft.description;

    let mut page = SellTemplate::new(&state, auth.user, form);
    page.price_hint = Some(draft.suggestion.price_range);
    page
}
