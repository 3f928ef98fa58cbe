//! Marketplace categories.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string names no known category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// The fixed set of listing categories.
///
/// Serialized by display label, which is what the listing table stores and
/// what the generative-text service is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[serde(rename = "Jewelry & Accessories")]
    Jewelry,
    #[serde(rename = "Home & Living")]
    HomeLiving,
    #[serde(rename = "Art & Collectibles")]
    ArtCollectibles,
    #[serde(rename = "Wellness & Bath")]
    WellnessBath,
    #[serde(rename = "Personalized Gifts")]
    Personalized,
    #[serde(rename = "Clothing")]
    Clothing,
    #[serde(rename = "Toys & Games")]
    ToysGames,
    #[default]
    #[serde(rename = "Craft Supplies")]
    Supplies,
}

impl Category {
    /// Every category, in category-bar order.
    pub const ALL: [Self; 8] = [
        Self::Jewelry,
        Self::HomeLiving,
        Self::ArtCollectibles,
        Self::WellnessBath,
        Self::Personalized,
        Self::Clothing,
        Self::ToysGames,
        Self::Supplies,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jewelry => "Jewelry & Accessories",
            Self::HomeLiving => "Home & Living",
            Self::ArtCollectibles => "Art & Collectibles",
            Self::WellnessBath => "Wellness & Bath",
            Self::Personalized => "Personalized Gifts",
            Self::Clothing => "Clothing",
            Self::ToysGames => "Toys & Games",
            Self::Supplies => "Craft Supplies",
        }
    }

    /// URL-safe slug used in `?category=` query strings.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Jewelry => "jewelry",
            Self::HomeLiving => "home-living",
            Self::ArtCollectibles => "art-collectibles",
            Self::WellnessBath => "wellness-bath",
            Self::Personalized => "personalized",
            Self::Clothing => "clothing",
            Self::ToysGames => "toys-games",
            Self::Supplies => "supplies",
        }
    }

    /// Look up a category by slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Look up a category by its exact label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    /// Accepts either the label or the slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_label(s)
            .or_else(|| Self::from_slug(s))
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}
