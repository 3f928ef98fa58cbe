//! Seed the backend with the bundled listings.
//!
//! Inserts run one at a time as the signed-in user, so the backend's row
//! policies apply. A failed insert is reported and the rest continue.

use chrono::Utc;
use tracing::{error, info};

use curated_core::{Email, NewListing};
use curated_storefront::catalog::fallback::bundled_listings;

use super::supabase_from_env;

/// Insert every bundled listing.
///
/// # Errors
///
/// Returns an error if configuration is missing, sign-in fails, or any insert
/// fails.
pub async fn bundled(
    email: &str,
    password: &str,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let drafts: Vec<NewListing> = bundled_listings(Utc::now())
        .into_iter()
        .map(NewListing::from)
        .collect();

    if dry_run {
        info!("Dry run: {} listings would be inserted", drafts.len());
        for draft in &drafts {
            info!("  {} ({})", draft.title, draft.price);
        }
        return Ok(());
    }

    let email = Email::parse(email)?;
    let client = supabase_from_env()?;
    let session = client.sign_in(&email, password).await?;
    info!(user_id = %session.user.id, "Signed in");

    let mut inserted = 0_usize;
    let mut failures = Vec::new();
    for draft in &drafts {
        match client.insert_listing(draft, &session.access_token).await {
            Ok(listing) => {
                inserted += 1;
                info!("  + {} -> {}", draft.title, listing.id);
            }
            Err(e) => failures.push((draft.title.clone(), e)),
        }
    }

    if let Err(e) = client.sign_out(&session.access_token).await {
        error!("Sign-out failed: {e}");
    }

    info!("Seeding complete!");
    info!("  Listings inserted: {inserted}");

    if !failures.is_empty() {
        error!("  Errors: {}", failures.len());
        for (title, err) in &failures {
            error!("    - {title}: {err}");
        }
        return Err(format!("{} inserts failed", failures.len()).into());
    }

    Ok(())
}
