//! CLI command implementations.

pub mod listings;
pub mod seed;
pub mod suggest;

use curated_storefront::config::SupabaseConfig;
use curated_storefront::supabase::SupabaseClient;

/// Build a backend client from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
///
/// # Errors
///
/// Returns an error if either variable is missing or invalid.
pub fn supabase_from_env() -> Result<SupabaseClient, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = SupabaseConfig::from_env()?;
    Ok(SupabaseClient::new(&config)?)
}
