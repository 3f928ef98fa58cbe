//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::ListingStore;
use crate::config::StorefrontConfig;
use crate::gemini::{GeminiClient, GeminiError};
use crate::site::SettingsStore;
use crate::supabase::SupabaseClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// remote clients and the in-memory listing and settings stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    supabase: SupabaseClient,
    gemini: Option<GeminiClient>,
    listings: ListingStore,
    settings: SettingsStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The listing store is passed in already built so that startup decides
    /// when (and whether) the remote fetch happens.
    ///
    /// # Errors
    ///
    /// Returns an error if a generative-text key is configured but unusable.
    pub fn new(
        config: StorefrontConfig,
        supabase: SupabaseClient,
        listings: ListingStore,
        settings: SettingsStore,
    ) -> Result<Self, GeminiError> {
        let gemini = config.gemini.as_ref().map(GeminiClient::new).transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                supabase,
                gemini,
                listings,
                settings,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client.
    #[must_use]
    pub fn supabase(&self) -> &SupabaseClient {
        &self.inner.supabase
    }

    /// The generative-text client, if a key is configured.
    #[must_use]
    pub fn gemini(&self) -> Option<&GeminiClient> {
        self.inner.gemini.as_ref()
    }

    /// Get a reference to the listing store.
    #[must_use]
    pub fn listings(&self) -> &ListingStore {
        &self.inner.listings
    }

    /// Get a reference to the site settings store.
    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }
}
