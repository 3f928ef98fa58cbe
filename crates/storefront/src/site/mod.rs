//! Site settings: the in-memory store and the edits the admin views make.
//!
//! Settings live only for the lifetime of the process. Every restart begins
//! from [`SiteSettings::default`].

pub mod editor;

use std::sync::{PoisonError, RwLock};

use curated_core::{BlockId, MoveDirection, SiteSettings};

pub use editor::SettingsError;

/// Shared, lock-protected [`SiteSettings`].
#[derive(Debug, Default)]
pub struct SettingsStore {
    settings: RwLock<SiteSettings>,
}

impl SettingsStore {
    /// Create a store with the given settings.
    #[must_use]
    pub const fn new(settings: SiteSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// A copy of the current settings.
    #[must_use]
    pub fn snapshot(&self) -> SiteSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update<T>(&self, edit: impl FnOnce(&mut SiteSettings) -> T) -> T {
        let mut settings = self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        edit(&mut settings)
    }

    /// See [`editor::move_block`].
    pub fn move_block(&self, index: usize, direction: MoveDirection) -> bool {
        let moved = self.update(|s| editor::move_block(&mut s.home_blocks, index, direction));
        tracing::info!(index, ?direction, moved, "Home block moved");
        moved
    }

    /// See [`editor::toggle_visibility`].
    pub fn toggle_visibility(&self, id: &BlockId) -> Option<bool> {
        let visible = self.update(|s| editor::toggle_visibility(&mut s.home_blocks, id));
        tracing::info!(block_id = %id, ?visible, "Home block visibility toggled");
        visible
    }

    /// See [`editor::set_accent_color`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidColor`] for a malformed color.
    pub fn set_accent_color(&self, color: &str) -> Result<(), SettingsError> {
        self.update(|s| editor::set_accent_color(s, color))
    }

    /// See [`editor::set_site_name`].
    ///
    /// # Errors
    ///
    /// Returns an error for a blank or overlong name.
    pub fn set_site_name(&self, name: &str) -> Result<(), SettingsError> {
        self.update(|s| editor::set_site_name(s, name))
    }

    /// Apply a theme form: both fields are validated before either is stored.
    ///
    /// # Errors
    ///
    /// Returns the first validation error; nothing is changed in that case.
    pub fn update_theme(&self, site_name: &str, accent_color: &str) -> Result<(), SettingsError> {
        self.update(|s| {
            let mut draft = s.clone();
            editor::set_site_name(&mut draft, site_name)?;
            editor::set_accent_color(&mut draft, accent_color)?;
            *s = draft;
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_theme_is_all_or_nothing() {
        let store = SettingsStore::default();
        assert!(store.update_theme("Maker Row", "not-a-color").is_err());
        assert_eq!(store.snapshot(), SiteSettings::default());

        store.update_theme("Maker Row", "#123").unwrap();
        let settings = store.snapshot();
        assert_eq!(settings.site_name, "Maker Row");
        assert_eq!(settings.accent_color.as_str(), "#123");
    }

    #[test]
    fn test_store_edits_blocks() {
        let store = SettingsStore::default();
        assert!(store.move_block(1, MoveDirection::Up));
        assert_eq!(store.snapshot().home_blocks[0].id.as_str(), "b6");
        assert_eq!(store.toggle_visibility(&BlockId::new("b6")), Some(false));
        assert_eq!(store.snapshot().visible_blocks()[0].id.as_str(), "b0");
    }
}
