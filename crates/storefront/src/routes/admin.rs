//! Admin route handlers: overview, home page designer, theme and inventory.
//!
//! Every page requires [`Capability::ManageListings`]. The designer and theme
//! pages change the whole site and additionally require
//! [`Capability::ManageSite`]. Site edits live in memory only.

use std::collections::HashSet;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use curated_core::{
    BlockContent, BlockId, Capability, Listing, ListingId, MoveDirection, PageBlock, SiteSettings,
};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::Layout;
use crate::site::editor::MAX_SITE_NAME_LEN;
use crate::state::AppState;

// =============================================================================
// Navigation
// =============================================================================

/// Sections of the admin sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    Overview,
    Design,
    Theme,
    Items,
}

impl AdminSection {
    /// Sidebar entries, in display order.
    pub const ALL: [Self; 4] = [Self::Overview, Self::Design, Self::Theme, Self::Items];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Design => "Design",
            Self::Theme => "Theme",
            Self::Items => "Inventory",
        }
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Overview => "/admin",
            Self::Design => "/admin/design",
            Self::Theme => "/admin/theme",
            Self::Items => "/admin/items",
        }
    }

    /// Whether a user with `can_manage_site` sees this entry.
    const fn visible(self, can_manage_site: bool) -> bool {
        match self {
            Self::Design | Self::Theme => can_manage_site,
            Self::Overview | Self::Items => true,
        }
    }
}

/// Sidebar state shared by every admin page.
#[derive(Debug, Clone)]
pub struct AdminNav {
    pub active: AdminSection,
    pub sections: Vec<AdminSection>,
}

impl AdminNav {
    fn new(admin: &RequireAdmin, active: AdminSection) -> Self {
        let can_manage_site = admin.0.user.can(Capability::ManageSite);
        Self {
            active,
            sections: AdminSection::ALL
                .into_iter()
                .filter(|s| s.visible(can_manage_site))
                .collect(),
        }
    }

    fn is_active(&self, section: &AdminSection) -> bool {
        self.active == *section
    }
}

fn admin_layout(state: &AppState, admin: &RequireAdmin) -> Layout {
    Layout::new(state, Some(admin.0.user.clone()))
}

/// Title shown for a block in the designer.
fn block_label(block: &PageBlock) -> String {
    let kind = block.kind().tag().replace('_', " ");
    match &block.content {
        BlockContent::Hero { title, .. }
        | BlockContent::Collections { title }
        | BlockContent::Deals { title }
        | BlockContent::Feed { title }
        | BlockContent::CustomText {
            title: Some(title), ..
        } => format!("{kind}: {title}"),
        _ => kind,
    }
}

// =============================================================================
// Overview
// =============================================================================

/// Admin overview template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/overview.html")]
pub struct OverviewTemplate {
    pub layout: Layout,
    pub nav: AdminNav,
    pub total_listings: usize,
    pub verified_makers: usize,
    pub visible_sections: usize,
}

/// Display store totals.
pub async fn overview(State(state): State<AppState>, admin: RequireAdmin) -> impl IntoResponse {
    let listings = state.listings().snapshot();
    let settings = state.settings().snapshot();

    let verified_makers = listings
        .iter()
        .filter(|l| l.verified)
        .map(|l| &l.seller_id)
        .collect::<HashSet<_>>()
        .len();

    OverviewTemplate {
        layout: admin_layout(&state, &admin),
        nav: AdminNav::new(&admin, AdminSection::Overview),
        total_listings: listings.len(),
        verified_makers,
        visible_sections: settings.visible_blocks().len(),
    }
}

// =============================================================================
// Design
// =============================================================================

/// Home page designer template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/design.html")]
pub struct DesignTemplate {
    pub layout: Layout,
    pub nav: AdminNav,
    pub blocks: Vec<PageBlock>,
}

impl DesignTemplate {
    fn label(&self, block: &PageBlock) -> String {
        block_label(block)
    }
}

/// Display the home page blocks in list order.
pub async fn design(State(state): State<AppState>, admin: RequireAdmin) -> Result<impl IntoResponse> {
    admin.require(Capability::ManageSite)?;

    Ok(DesignTemplate {
        layout: admin_layout(&state, &admin),
        nav: AdminNav::new(&admin, AdminSection::Design),
        blocks: state.settings().snapshot().home_blocks,
    })
}

/// Move a block one position up or down.
#[instrument(skip(state, admin), fields(user_id = %admin.0.user.id))]
pub async fn move_block(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path((index, direction)): Path<(usize, String)>,
) -> Result<Redirect> {
    admin.require(Capability::ManageSite)?;

    let direction: MoveDirection = direction.parse().map_err(AppError::BadRequest)?;
    state.settings().move_block(index, direction);
    Ok(Redirect::to(AdminSection::Design.path()))
}

/// Show or hide a block.
#[instrument(skip(state, admin), fields(user_id = %admin.0.user.id))]
pub async fn toggle_block(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Redirect> {
    admin.require(Capability::ManageSite)?;

    state.settings().toggle_visibility(&BlockId::new(id));
    Ok(Redirect::to(AdminSection::Design.path()))
}

// =============================================================================
// Theme
// =============================================================================

/// Theme form data.
#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub site_name: String,
    pub accent_color: String,
}

/// Query parameters for the theme page.
#[derive(Debug, Default, Deserialize)]
pub struct ThemeParams {
    pub saved: Option<String>,
}

/// Theme editor template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/theme.html")]
pub struct ThemeTemplate {
    pub layout: Layout,
    pub nav: AdminNav,
    pub site_name: String,
    pub accent_color: String,
    pub max_name_len: usize,
    pub saved: bool,
    pub error: Option<String>,
}

impl ThemeTemplate {
    fn new(state: &AppState, admin: &RequireAdmin, settings: &SiteSettings) -> Self {
        Self {
            layout: admin_layout(state, admin),
            nav: AdminNav::new(admin, AdminSection::Theme),
            site_name: settings.site_name.clone(),
            accent_color: settings.accent_color.to_string(),
            max_name_len: MAX_SITE_NAME_LEN,
            saved: false,
            error: None,
        }
    }
}

/// Display the theme form.
pub async fn theme(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Query(params): Query<ThemeParams>,
) -> Result<impl IntoResponse> {
    admin.require(Capability::ManageSite)?;

    let mut page = ThemeTemplate::new(&state, &admin, &state.settings().snapshot());
    page.saved = params.saved.is_some();
    Ok(page)
}

/// Save the site name and accent color.
///
/// Both values are validated before either is applied; an invalid form
/// re-renders with the submitted values.
#[instrument(skip(state, admin, form), fields(user_id = %admin.0.user.id))]
pub async fn update_theme(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Form(form): Form<ThemeForm>,
) -> Result<Response> {
    admin.require(Capability::ManageSite)?;

    match state
        .settings()
        .update_theme(&form.site_name, &form.accent_color)
    {
        Ok(()) => Ok(Redirect::to("/admin/theme?saved=1").into_response()),
        Err(e) => {
            tracing::info!(error = %e, "Theme update rejected");
            let mut page = ThemeTemplate::new(&state, &admin, &state.settings().snapshot());
            page.site_name = form.site_name;
            page.accent_color = form.accent_color;
            page.error = Some(e.to_string());
            Ok(page.into_response())
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Query parameters for the inventory page.
#[derive(Debug, Default, Deserialize)]
pub struct ItemsParams {
    pub error: Option<String>,
}

/// Inventory template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/items.html")]
pub struct ItemsTemplate {
    pub layout: Layout,
    pub nav: AdminNav,
    pub listings: Vec<Listing>,
    pub error: Option<String>,
}

/// Display every listing in the store.
pub async fn items(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Query(params): Query<ItemsParams>,
) -> impl IntoResponse {
    let error = (params.error.as_deref() == Some("delete"))
        .then(|| "The listing could not be deleted. Please try again.".to_string());

    ItemsTemplate {
        layout: admin_layout(&state, &admin),
        nav: AdminNav::new(&admin, AdminSection::Items),
        listings: state.listings().snapshot(),
        error,
    }
}

/// Delete any listing.
///
/// The store only changes after the backend confirms the delete.
#[instrument(skip(state, admin), fields(user_id = %admin.0.user.id))]
pub async fn delete_item(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Redirect {
    let id = ListingId::new(id);

    match state
        .supabase()
        .delete_listing(&id, admin.0.access_token())
        .await
    {
        Ok(()) => {
            let removed = state.listings().remove(&id);
            tracing::info!(listing_id = %id, removed, "Listing deleted by admin");
            Redirect::to(AdminSection::Items.path())
        }
        Err(e) => {
            tracing::error!(listing_id = %id, error = %e, "Admin delete failed");
            Redirect::to("/admin/items?error=delete")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_label() {
        let blocks = SiteSettings::default_blocks();
        let labels: Vec<String> = blocks.iter().map(block_label).collect();
        assert_eq!(labels[0], "hero: Gifts with a Soul. Directly from the Maker.");
        assert_eq!(labels[2], "categories");

        let text = PageBlock::new(
            "t1",
            BlockContent::CustomText {
                title: None,
                body: "Hi".to_string(),
            },
            9,
        );
        assert_eq!(block_label(&text), "custom text");
    }

    #[test]
    fn test_section_visibility() {
        assert!(AdminSection::Items.visible(false));
        assert!(!AdminSection::Design.visible(false));
        assert!(AdminSection::Theme.visible(true));
    }
}
