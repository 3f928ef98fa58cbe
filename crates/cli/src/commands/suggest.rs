//! Run the sell-form assist from the command line.

use tracing::{info, warn};

use curated_storefront::config::GeminiConfig;
use curated_storefront::gemini::GeminiClient;
use curated_storefront::services::assist;

/// Suggest a category and price range for `title`, then draft a description.
///
/// Without `GEMINI_API_KEY` this prints the fallbacks the sell form would show.
///
/// # Errors
///
/// Returns an error if the generative-text configuration is invalid.
pub async fn run(title: &str, condition: &str) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let client = GeminiConfig::from_env()?
        .map(|config| GeminiClient::new(&config))
        .transpose()?;
    if client.is_none() {
        warn!("GEMINI_API_KEY not set, showing fallbacks");
    }

    let draft = assist::assist(client.as_ref(), title, condition).await;

    info!("Category:    {}", draft.suggestion.category);
    info!("Price range: {}", draft.suggestion.price_range);
    info!("Description: {}", draft.description);

    Ok(())
}
