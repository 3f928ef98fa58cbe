//! Print the listing store.

use chrono::Utc;
use tracing::info;

use curated_core::Category;
use curated_storefront::catalog::ListingStore;

use super::supabase_from_env;

/// Fetch listings, merge them with the bundled catalog and print the result.
///
/// A failed fetch falls back to the bundled catalog, exactly as the server
/// does at startup.
///
/// # Errors
///
/// Returns an error if the backend is not configured or the category is
/// unknown.
pub async fn list(category: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let category: Option<Category> = category.map(str::parse).transpose()?;

    let client = supabase_from_env()?;
    let store = ListingStore::from_fetch(client.fetch_listings().await, Utc::now());

    let listings: Vec<_> = store
        .snapshot()
        .into_iter()
        .filter(|l| category.is_none_or(|c| l.category == c))
        .collect();

    info!("Listings ({} of {})", listings.len(), store.len());
    info!("========================");
    for listing in &listings {
        info!(
            "  {:<38} {:>9}  {:<24} {}",
            listing.id.as_str(),
            listing.price.to_string(),
            listing.category.label(),
            listing.title
        );
    }

    Ok(())
}
