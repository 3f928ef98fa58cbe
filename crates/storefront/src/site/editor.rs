//! Home page block editor and theme edits.
//!
//! Pure functions over [`SiteSettings`]; [`super::SettingsStore`] applies
//! them under its write lock.

use curated_core::{AccentColor, BlockId, ColorError, MoveDirection, PageBlock, SiteSettings};
use thiserror::Error;

/// Longest accepted site name, in characters.
pub const MAX_SITE_NAME_LEN: usize = 40;

/// Errors from theme edits. Block edits never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Accent color is not a hex color.
    #[error("invalid accent color: {0}")]
    InvalidColor(#[from] ColorError),

    /// Site name is blank after trimming.
    #[error("site name cannot be empty")]
    EmptySiteName,

    /// Site name is longer than [`MAX_SITE_NAME_LEN`].
    #[error("site name cannot exceed {max} characters")]
    SiteNameTooLong { max: usize },
}

/// Swap the block at `index` with its neighbour, then renumber orders to
/// list positions.
///
/// Moving the first block up, the last block down, or an out-of-range index
/// leaves the blocks untouched. Returns whether anything moved.
pub fn move_block(blocks: &mut [PageBlock], index: usize, direction: MoveDirection) -> bool {
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => index.checked_add(1),
    };
    let Some(target) = target.filter(|t| *t < blocks.len() && index < blocks.len()) else {
        return false;
    };

    blocks.swap(index, target);
    for (position, block) in blocks.iter_mut().enumerate() {
        block.order = i32::try_from(position).unwrap_or(i32::MAX);
    }
    true
}

/// Flip the visibility of the block with `id`. Order keys are untouched.
///
/// Returns the new visibility, or `None` if no block has that id.
pub fn toggle_visibility(blocks: &mut [PageBlock], id: &BlockId) -> Option<bool> {
    let block = blocks.iter_mut().find(|b| &b.id == id)?;
    block.visible = !block.visible;
    Some(block.visible)
}

/// Validate and set the accent color.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidColor`] if `color` is not `#rgb`/`#rrggbb`.
pub fn set_accent_color(settings: &mut SiteSettings, color: &str) -> Result<(), SettingsError> {
    settings.accent_color = AccentColor::parse(color)?;
    Ok(())
}

/// Trim and set the site name.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or too long.
pub fn set_site_name(settings: &mut SiteSettings, name: &str) -> Result<(), SettingsError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SettingsError::EmptySiteName);
    }
    if name.chars().count() > MAX_SITE_NAME_LEN {
        return Err(SettingsError::SiteNameTooLong {
            max: MAX_SITE_NAME_LEN,
        });
    }
    settings.site_name = name.to_string();
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use curated_core::BlockContent;

    use super::*;

    fn hero_and_deals() -> Vec<PageBlock> {
        vec![
            PageBlock::new(
                "b0",
                BlockContent::Hero {
                    title: "t".to_string(),
                    subtitle: "s".to_string(),
                },
                0,
            ),
            PageBlock::new(
                "b3",
                BlockContent::Deals {
                    title: "d".to_string(),
                },
                1,
            ),
        ]
    }

    #[test]
    fn test_move_up_swaps_and_renumbers() {
        let mut blocks = hero_and_deals();
        assert!(move_block(&mut blocks, 1, MoveDirection::Up));
        let ids: Vec<(&str, i32)> = blocks.iter().map(|b| (b.id.as_str(), b.order)).collect();
        assert_eq!(ids, vec![("b3", 0), ("b0", 1)]);
    }

    #[test]
    fn test_move_at_edges_is_noop() {
        let mut blocks = SiteSettings::default_blocks();
        let before = blocks.clone();
        assert!(!move_block(&mut blocks, 0, MoveDirection::Up));
        let last = blocks.len() - 1;
        assert!(!move_block(&mut blocks, last, MoveDirection::Down));
        assert!(!move_block(&mut blocks, 99, MoveDirection::Up));
        assert!(!move_block(&mut blocks, usize::MAX, MoveDirection::Down));
        assert_eq!(blocks, before);
    }

    #[test]
    fn test_move_renumbers_sparse_orders() {
        let mut blocks = hero_and_deals();
        blocks[0].order = 10;
        blocks[1].order = 40;
        assert!(move_block(&mut blocks, 0, MoveDirection::Down));
        assert_eq!(blocks[0].order, 0);
        assert_eq!(blocks[1].order, 1);
        assert_eq!(blocks[1].id.as_str(), "b0");
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut blocks = SiteSettings::default_blocks();
        let id = BlockId::new("b4");
        assert_eq!(toggle_visibility(&mut blocks, &id), Some(false));
        assert_eq!(blocks[4].order, 4);
        assert_eq!(toggle_visibility(&mut blocks, &id), Some(true));
        assert_eq!(blocks, SiteSettings::default_blocks());
        assert_eq!(toggle_visibility(&mut blocks, &BlockId::new("nope")), None);
    }

    #[test]
    fn test_theme_edits() {
        let mut settings = SiteSettings::default();
        set_accent_color(&mut settings, "#336699").unwrap();
        assert_eq!(settings.accent_color.as_str(), "#336699");
        assert!(matches!(
            set_accent_color(&mut settings, "blue"),
            Err(SettingsError::InvalidColor(ColorError::MissingHash))
        ));
        assert_eq!(settings.accent_color.as_str(), "#336699");

        set_site_name(&mut settings, "  Maker Row ").unwrap();
        assert_eq!(settings.site_name, "Maker Row");
        assert_eq!(set_site_name(&mut settings, "   "), Err(SettingsError::EmptySiteName));
        assert!(set_site_name(&mut settings, &"x".repeat(41)).is_err());
    }
}
