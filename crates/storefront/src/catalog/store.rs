//! In-memory listing store.
//!
//! Built once at startup from the remote table plus the bundled listings,
//! then kept in step with successful remote writes. Readers take a snapshot;
//! the lock is never held across an `.await`.

use std::collections::HashSet;
use std::fmt::Display;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use curated_core::{Listing, ListingId, UserId};

use super::fallback::bundled_listings;

/// Merge remote rows ahead of the bundled rows.
///
/// The first occurrence of an id wins, so a remote row shadows a bundled row
/// with the same id. Rows without a displayable image are dropped.
#[must_use]
pub fn merge_listings(remote: Vec<Listing>, bundled: Vec<Listing>) -> Vec<Listing> {
    let mut seen = HashSet::new();
    remote
        .into_iter()
        .chain(bundled)
        .filter(|listing| seen.insert(listing.id.clone()))
        .filter(Listing::has_displayable_image)
        .collect()
}

/// Listings currently known to this process.
#[derive(Debug, Default)]
pub struct ListingStore {
    listings: RwLock<Vec<Listing>>,
}

impl ListingStore {
    /// Create a store holding exactly `listings`.
    #[must_use]
    pub const fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings: RwLock::new(listings),
        }
    }

    /// Build the store from the outcome of the startup fetch.
    ///
    /// On success the remote rows are merged with the bundled listings. On
    /// failure the bundled listings are used as-is and the error is logged.
    pub fn from_fetch<E: Display>(fetched: Result<Vec<Listing>, E>, now: DateTime<Utc>) -> Self {
        let listings = match fetched {
            Ok(remote) => {
                let remote_count = remote.len();
                let merged = merge_listings(remote, bundled_listings(now));
                tracing::info!(
                    remote = remote_count,
                    total = merged.len(),
                    "Listing store initialized"
                );
                merged
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch listings, using bundled listings");
                bundled_listings(now)
            }
        };
        Self::new(listings)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Listing>> {
        self.listings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Listing>> {
        self.listings.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of every listing, in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Listing> {
        self.read().clone()
    }

    /// Number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Look up a listing by id.
    #[must_use]
    pub fn get(&self, id: &ListingId) -> Option<Listing> {
        self.read().iter().find(|l| &l.id == id).cloned()
    }

    /// Put a newly created listing at the front.
    pub fn prepend(&self, listing: Listing) {
        self.write().insert(0, listing);
    }

    /// Remove a listing by id. Returns whether anything was removed.
    pub fn remove(&self, id: &ListingId) -> bool {
        let mut listings = self.write();
        let before = listings.len();
        listings.retain(|l| &l.id != id);
        listings.len() != before
    }

    /// Every listing sold by `seller_id`, in display order.
    #[must_use]
    pub fn by_seller(&self, seller_id: &UserId) -> Vec<Listing> {
        self.read()
            .iter()
            .filter(|l| &l.seller_id == seller_id)
            .cloned()
            .collect()
    }
}
