//! Site-wide display settings.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::block::{BlockContent, PageBlock};

/// Errors from parsing an [`AccentColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Missing the leading `#`.
    #[error("color must start with #")]
    MissingHash,
    /// Not 3 or 6 hex digits after the `#`.
    #[error("color must be #rgb or #rrggbb")]
    InvalidLength,
    /// Contains a non-hex character.
    #[error("color contains a non-hex digit")]
    InvalidDigit,
}

/// A CSS hex color (`#rgb` or `#rrggbb`), stored as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor(String);

impl AccentColor {
    /// Parse a hex color.
    ///
    /// # Errors
    ///
    /// Returns a [`ColorError`] if the input is not `#rgb` or `#rrggbb`.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let input = input.trim();
        let digits = input.strip_prefix('#').ok_or(ColorError::MissingHash)?;
        if digits.len() != 3 && digits.len() != 6 {
            return Err(ColorError::InvalidLength);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit);
        }
        Ok(Self(input.to_owned()))
    }

    /// The color as a CSS value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        Self(SiteSettings::DEFAULT_ACCENT.to_owned())
    }
}

impl TryFrom<String> for AccentColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccentColor> for String {
    fn from(color: AccentColor) -> Self {
        color.0
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An additional page made of blocks.
///
/// Part of the settings model; no route renders these yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPage {
    pub title: String,
    pub path: String,
    pub blocks: Vec<PageBlock>,
}

/// Display name, accent color and home page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub accent_color: AccentColor,
    pub site_name: String,
    pub home_blocks: Vec<PageBlock>,
    #[serde(default)]
    pub custom_pages: Vec<CustomPage>,
}

impl SiteSettings {
    /// Default accent color (earthy terracotta).
    pub const DEFAULT_ACCENT: &'static str = "#C2714F";
    /// Default site name.
    pub const DEFAULT_NAME: &'static str = "CURATED";

    /// The home page layout a fresh process starts with.
    #[must_use]
    pub fn default_blocks() -> Vec<PageBlock> {
        vec![
            PageBlock::new(
                "b0",
                BlockContent::Hero {
                    title: "Gifts with a Soul. Directly from the Maker.".to_string(),
                    subtitle: "Join a community of 50k+ independent US artisans selling their crafts to the world.".to_string(),
                },
                0,
            ),
            PageBlock::new(
                "b6",
                BlockContent::Collections {
                    title: "Curated Collections".to_string(),
                },
                1,
            ),
            PageBlock::new("b2", BlockContent::Categories, 2),
            PageBlock::new(
                "b3",
                BlockContent::Deals {
                    title: "Handpicked for You".to_string(),
                },
                3,
            ),
            PageBlock::new("b4", BlockContent::Trending, 4),
            PageBlock::new(
                "b5",
                BlockContent::Feed {
                    title: "Discover Recent Arrivals".to_string(),
                },
                5,
            ),
        ]
    }

    /// Visible blocks sorted by order key.
    ///
    /// The sort is stable, so blocks sharing an order key keep list order.
    #[must_use]
    pub fn visible_blocks(&self) -> Vec<&PageBlock> {
        let mut blocks: Vec<&PageBlock> = self.home_blocks.iter().filter(|b| b.visible).collect();
        blocks.sort_by_key(|b| b.order);
        blocks
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            accent_color: AccentColor::default(),
            site_name: Self::DEFAULT_NAME.to_string(),
            home_blocks: Self::default_blocks(),
            custom_pages: Vec::new(),
        }
    }
}
