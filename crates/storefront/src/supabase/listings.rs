//! `listings` table operations.

use curated_core::{Listing, ListingId, NewListing};

use super::{SupabaseClient, SupabaseError};

const TABLE: &str = "listings";

impl SupabaseClient {
    /// Fetch every listing, newest first.
    ///
    /// Rows that do not parse as a [`Listing`] are logged and skipped; the
    /// rest are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a JSON array.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_listings(&self) -> Result<Vec<Listing>, SupabaseError> {
        let request = self
            .http()
            .get(self.rest(TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let response = self.authorize(request, None).send().await?;
        let body = Self::read_body(response).await?;
        let rows: Vec<serde_json::Value> = serde_json::from_str(&body)?;
        let total = rows.len();
        let listings = parse_rows(rows);

        tracing::debug!(count = listings.len(), skipped = total - listings.len(), "Fetched listings");
        Ok(listings)
    }

    /// Insert a listing as the signed-in user and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the row (for example through
    /// row-level security) or returns no representation.
    #[tracing::instrument(skip(self, listing, access_token), fields(title = %listing.title))]
    pub async fn insert_listing(
        &self,
        listing: &NewListing,
        access_token: &str,
    ) -> Result<Listing, SupabaseError> {
        let request = self
            .http()
            .post(self.rest(TABLE))
            .header("Prefer", "return=representation")
            .json(&[listing]);

        let response = self.authorize(request, Some(access_token)).send().await?;
        let body = Self::read_body(response).await?;
        let mut rows: Vec<Listing> = serde_json::from_str(&body)?;

        if rows.is_empty() {
            return Err(SupabaseError::EmptyResponse);
        }
        let stored = rows.swap_remove(0);

        tracing::info!(listing_id = %stored.id, "Listing created");
        Ok(stored)
    }

    /// Delete a listing by id as the signed-in user.
    ///
    /// The table API answers a delete that matched nothing with success, so
    /// a missing row is not an error here.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[tracing::instrument(skip(self, access_token), fields(listing_id = %id))]
    pub async fn delete_listing(
        &self,
        id: &ListingId,
        access_token: &str,
    ) -> Result<(), SupabaseError> {
        let filter = format!("eq.{id}");
        let request = self
            .http()
            .delete(self.rest(TABLE))
            .query(&[("id", filter.as_str())]);

        let response = self.authorize(request, Some(access_token)).send().await?;
        Self::read_body(response).await?;

        tracing::info!("Listing deleted");
        Ok(())
    }
}

/// Parse table rows one at a time, dropping the ones that do not fit.
fn parse_rows(rows: Vec<serde_json::Value>) -> Vec<Listing> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row
                .get("id")
                .map(|id| id.as_str().map_or_else(|| id.to_string(), str::to_string))
                .unwrap_or_default();
            match serde_json::from_value::<Listing>(row) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    tracing::warn!(listing_id = %id, error = %e, "Skipping malformed listing row");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": "Beeswax Taper Pair",
            "description": "Hand-dipped.",
            "price": 18,
            "category": "Home & Living",
            "location": "Bend, OR",
            "images": ["https://img.example/taper.jpg"],
            "created_at": "2026-02-01T09:00:00Z"
        })
    }

    #[test]
    fn test_parse_rows_skips_bad_rows() {
        let mut unknown_category = row("bad-category");
        unknown_category["category"] = json!("Antiques");
        let mut null_price = row("bad-price");
        null_price["price"] = serde_json::Value::Null;
        let mut huge_discount = row("bad-discount");
        huge_discount["discount"] = json!(300);

        let listings = parse_rows(vec![
            row("good-1"),
            unknown_category,
            null_price,
            huge_discount,
            json!("not an object"),
            row("good-2"),
        ]);

        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["good-1", "good-2"]);
    }
}
