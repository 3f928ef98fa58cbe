//! Listing assist: category/price suggestion and description drafting.
//!
//! Both operations are best-effort. A missing client or any failure yields a
//! fixed fallback so the sell form always has something to show; failures are
//! logged, never surfaced.

use serde::Deserialize;

use curated_core::Category;

use crate::gemini::GeminiClient;

/// Price range shown when no suggestion is available.
pub const FALLBACK_PRICE_RANGE: &str = "Price on request";

/// A suggested category and a free-form price range such as `"$40 - $60"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub category: Category,
    pub price_range: String,
}

impl Default for Suggestion {
    fn default() -> Self {
        Self {
            category: Category::Supplies,
            price_range: FALLBACK_PRICE_RANGE.to_string(),
        }
    }
}

/// Suggestion followed by a description written for the suggested category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistDraft {
    pub suggestion: Suggestion,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionResponse {
    category: String,
    suggested_price_range: String,
}

/// Templated description used when generation fails.
#[must_use]
pub fn fallback_description(title: &str) -> String {
    format!("A unique, handcrafted {title} perfect for your collection.")
}

/// Map a model-provided category label onto a known category.
///
/// Unknown labels fall back to [`Category::Supplies`].
#[must_use]
pub fn resolve_category(label: &str) -> Category {
    let label = label.trim();
    Category::from_label(label)
        .or_else(|| Category::from_slug(label))
        .unwrap_or_default()
}

fn suggestion_prompt(title: &str) -> String {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    format!(
        "Suggest the most appropriate category and a realistic price range (in US Dollars $) \
         for a handmade, artisanal item with the title: \"{title}\". Categories are: {}. \
         Consider US market trends for small-batch handmade goods.",
        categories.join(", ")
    )
}

fn suggestion_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "category": { "type": "STRING" },
            "suggestedPriceRange": { "type": "STRING" }
        },
        "required": ["category", "suggestedPriceRange"]
    })
}

fn description_prompt(title: &str, category: Category, condition: &str) -> String {
    format!(
        "Write a compelling, storytelling description for a handmade/artisanal item for a US audience:\n\
         Title: {title}\n\
         Category: {category}\n\
         Condition: {condition}\n\
         Focus on craftsmanship, quality materials, and the unique story behind the item. \
         Avoid generic corporate language; use a warm, personal, maker-centric tone. \
         Keep it concise but soulful."
    )
}

/// Suggest a category and price range for a listing title.
pub async fn suggest_category_and_price(client: Option<&GeminiClient>, title: &str) -> Suggestion {
    let Some(client) = client else {
        tracing::warn!("Generative assist not configured, using fallback suggestion");
        return Suggestion::default();
    };

    match client
        .generate_json::<SuggestionResponse>(&suggestion_prompt(title), suggestion_schema())
        .await
    {
        Ok(response) => Suggestion {
            category: resolve_category(&response.category),
            price_range: response.suggested_price_range.trim().to_string(),
        },
        Err(e) => {
            tracing::error!(error = %e, "Category suggestion failed");
            Suggestion::default()
        }
    }
}

/// Draft a description for a listing.
pub async fn generate_description(
    client: Option<&GeminiClient>,
    title: &str,
    category: Category,
    condition: &str,
) -> String {
    let Some(client) = client else {
        tracing::warn!("Generative assist not configured, using fallback description");
        return fallback_description(title);
    };

    match client
        .generate_text(&description_prompt(title, category, condition))
        .await
    {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => fallback_description(title),
        Err(e) => {
            tracing::error!(error = %e, "Description generation failed");
            fallback_description(title)
        }
    }
}

/// Run the suggestion, then draft a description for the suggested category.
#[tracing::instrument(skip(client))]
pub async fn assist(client: Option<&GeminiClient>, title: &str, condition: &str) -> AssistDraft {
    let suggestion = suggest_category_and_price(client, title).await;
    let description = generate_description(client, title, suggestion.category, condition).await;
    AssistDraft {
        suggestion,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_category() {
        assert_eq!(resolve_category("Jewelry"), Category::Jewelry);
        assert_eq!(resolve_category(" Home & Living "), Category::HomeLiving);
        assert_eq!(resolve_category("home-living"), Category::HomeLiving);
        assert_eq!(resolve_category("Furniture"), Category::Supplies);
    }

    #[test]
    fn test_fallback_description() {
        assert_eq!(
            fallback_description("Oak Bowl"),
            "A unique, handcrafted Oak Bowl perfect for your collection."
        );
    }

    #[test]
    fn test_suggestion_prompt_lists_every_category() {
        let prompt = suggestion_prompt("Oak Bowl");
        for category in Category::ALL {
            assert!(prompt.contains(category.label()));
        }
        assert!(prompt.contains("\"Oak Bowl\""));
    }

    #[tokio::test]
    async fn test_unconfigured_assist_falls_back() {
        let draft = assist(None, "Oak Bowl", "New").await;
        assert_eq!(draft.suggestion, Suggestion::default());
        assert_eq!(draft.suggestion.price_range, "Price on request");
        assert_eq!(draft.description, fallback_description("Oak Bowl"));
    }
}
