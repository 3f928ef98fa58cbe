//! Marketplace listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::id::{ListingId, UserId};
use super::price::Price;

/// Validation errors for a listing about to be created.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// Title is empty after trimming.
    #[error("title cannot be empty")]
    EmptyTitle,
    /// Description is empty after trimming.
    #[error("description cannot be empty")]
    EmptyDescription,
    /// No image, or the primary image is not an absolute http(s) URL.
    #[error("a listing needs an http(s) image URL")]
    MissingImage,
    /// Discount outside 1..=99 percent.
    #[error("discount must be between 1 and 99 percent")]
    InvalidDiscount,
}

/// Returns true if `url` starts with an `http://` or `https://` scheme.
#[must_use]
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A single marketplace item for sale.
///
/// Field names follow the `listings` table columns. Optional columns default
/// so that partially filled rows still deserialize; such rows are usually
/// dropped later by [`Listing::has_displayable_image`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub location: String,
    /// Image URLs; the first one is the thumbnail.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub seller_id: UserId,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_avatar: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub verified: bool,
    /// Discount percentage, if the listing is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
}

impl Listing {
    /// The thumbnail image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the listing can be shown: its first image is an absolute http(s) URL.
    #[must_use]
    pub fn has_displayable_image(&self) -> bool {
        self.primary_image().is_some_and(is_http_url)
    }

    /// Case-insensitive substring match against title or description.
    ///
    /// An empty needle matches everything.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    /// The discount percentage, treating `Some(0)` as no discount.
    #[must_use]
    pub fn active_discount(&self) -> Option<u8> {
        self.discount.filter(|d| *d > 0)
    }

    /// The price before the active discount, if there is one.
    #[must_use]
    pub fn original_price(&self) -> Option<Price> {
        self.active_discount().map(|d| self.price.before_discount(d))
    }

    /// The city portion of the location (`"Austin, Texas"` -> `"Austin"`).
    #[must_use]
    pub fn city(&self) -> &str {
        self.location.split(',').next().unwrap_or_default().trim()
    }
}

/// Payload for creating a listing; the backend assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub location: String,
    pub images: Vec<String>,
    pub seller_id: UserId,
    pub seller_name: String,
    pub seller_avatar: String,
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
}

impl NewListing {
    /// Check the payload before it is sent to the listing store.
    ///
    /// # Errors
    ///
    /// Returns the first [`ListingError`] found.
    pub fn validate(&self) -> Result<(), ListingError> {
        if self.title.trim().is_empty() {
            return Err(ListingError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ListingError::EmptyDescription);
        }
        if !self.images.first().is_some_and(|url| is_http_url(url)) {
            return Err(ListingError::MissingImage);
        }
        if let Some(discount) = self.discount
            && !(1..=99).contains(&discount)
        {
            return Err(ListingError::InvalidDiscount);
        }
        Ok(())
    }

    /// Attach the server-assigned fields.
    #[must_use]
    pub fn into_listing(self, id: ListingId, created_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            location: self.location,
            images: self.images,
            seller_id: self.seller_id,
            seller_name: self.seller_name,
            seller_avatar: self.seller_avatar,
            created_at,
            verified: self.verified,
            discount: self.discount,
        }
    }
}

impl From<Listing> for NewListing {
    /// Drop the server-assigned fields, e.g. to re-insert a bundled listing.
    fn from(listing: Listing) -> Self {
        Self {
            title: listing.title,
            description: listing.description,
            price: listing.price,
            category: listing.category,
            location: listing.location,
            images: listing.images,
            seller_id: listing.seller_id,
            seller_name: listing.seller_name,
            seller_avatar: listing.seller_avatar,
            verified: listing.verified,
            discount: listing.discount,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> NewListing {
        NewListing {
            title: "Speckled Mug".to_string(),
            description: "Wheel-thrown stoneware.".to_string(),
            price: Price::from_cents(4200),
            category: Category::HomeLiving,
            location: "Asheville, NC".to_string(),
            images: vec!["https://img.example/mug.jpg".to_string()],
            seller_id: UserId::new("u3"),
            seller_name: "Earth & Ember".to_string(),
            seller_avatar: String::new(),
            verified: true,
            discount: None,
        }
    }

    #[test]
    fn test_displayable_image_requires_http_scheme() {
        let mut listing = draft().into_listing(ListingId::new("l3"), Utc::now());
        assert!(listing.has_displayable_image());

        listing.images = vec!["/static/mug.jpg".to_string()];
        assert!(!listing.has_displayable_image());

        listing.images.clear();
        assert!(!listing.has_displayable_image());

        listing.images = vec!["http://img.example/a.jpg".to_string()];
        assert!(listing.has_displayable_image());
    }

    #[test]
    fn test_matches_text_is_case_insensitive() {
        let listing = draft().into_listing(ListingId::new("l3"), Utc::now());
        assert!(listing.matches_text("MUG"));
        assert!(listing.matches_text("stoneware"));
        assert!(listing.matches_text(""));
        assert!(!listing.matches_text("candle"));
    }

    #[test]
    fn test_original_price() {
        let mut listing = draft().into_listing(ListingId::new("l3"), Utc::now());
        assert_eq!(listing.original_price(), None);
        listing.discount = Some(0);
        assert_eq!(listing.original_price(), None);
        listing.discount = Some(20);
        assert_eq!(listing.original_price(), Some(listing.price.before_discount(20)));
    }

    #[test]
    fn test_city() {
        let listing = draft().into_listing(ListingId::new("l3"), Utc::now());
        assert_eq!(listing.city(), "Asheville");
    }

    #[test]
    fn test_validate() {
        assert!(draft().validate().is_ok());

        let mut bad = draft();
        bad.title = "  ".to_string();
        assert_eq!(bad.validate(), Err(ListingError::EmptyTitle));

        let mut bad = draft();
        bad.images = vec!["ftp://img.example/mug.jpg".to_string()];
        assert_eq!(bad.validate(), Err(ListingError::MissingImage));

        let mut bad = draft();
        bad.discount = Some(100);
        assert_eq!(bad.validate(), Err(ListingError::InvalidDiscount));
    }

    #[test]
    fn test_deserialize_sparse_row() {
        let json = r#"{
            "id": "9b1e",
            "title": "Knit Scarf",
            "price": 55,
            "created_at": "2026-01-02T03:04:05Z"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.category, Category::Supplies);
        assert!(listing.images.is_empty());
        assert!(!listing.has_displayable_image());
        assert_eq!(listing.active_discount(), None);
    }
}
