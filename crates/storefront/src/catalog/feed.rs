//! Home feed composition.
//!
//! The home page is either a flat browsing grid (a category or search term is
//! active) or the curated layout built from the visible page blocks.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use curated_core::{BlockContent, Category, Countdown, Listing, SiteSettings};

/// Maximum number of listings in the deals rail.
pub const DEALS_LIMIT: usize = 10;

/// Search tags shown in the trending rail.
pub const TRENDING_TAGS: [&str; 6] = ["Pottery", "Leather", "Candles", "Knits", "Jewelry", "Art"];

/// A tile in the collections grid. Clicking it searches for [`Self::search_term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionTile {
    pub title: &'static str,
    pub image_url: &'static str,
}

impl CollectionTile {
    /// The first word of the title.
    #[must_use]
    pub fn search_term(&self) -> &'static str {
        self.title.split_whitespace().next().unwrap_or(self.title)
    }
}

pub const COLLECTIONS: [CollectionTile; 6] = [
    CollectionTile {
        title: "Boho Chic",
        image_url: "https://images.unsplash.com/photo-1520006403909-838d6b92c22e?auto=format&fit=crop&w=300&q=80",
    },
    CollectionTile {
        title: "Modern Pottery",
        image_url: "https://images.unsplash.com/photo-1513584684374-8bdb7489feef?auto=format&fit=crop&w=300&q=80",
    },
    CollectionTile {
        title: "Slow Living",
        image_url: "https://images.unsplash.com/photo-1505944270255-bd2b896e7546?auto=format&fit=crop&w=300&q=80",
    },
    CollectionTile {
        title: "Artisan Jewelry",
        image_url: "https://images.unsplash.com/photo-1535632066927-ab7c9ab60908?auto=format&fit=crop&w=300&q=80",
    },
    CollectionTile {
        title: "Leather Goods",
        image_url: "https://images.unsplash.com/photo-1517315003714-a071486bd9ea?auto=format&fit=crop&w=300&q=80",
    },
    CollectionTile {
        title: "Small Batch",
        image_url: "https://images.unsplash.com/photo-1474635332397-f735e7316682?auto=format&fit=crop&w=300&q=80",
    },
];

/// Raw `?category=&q=` query string of the home page.
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

/// Active feed filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub category: Option<Category>,
    /// Search text, trimmed. Empty means no text filter.
    pub query: String,
}

impl FeedQuery {
    /// Build a filter from the page's query string.
    ///
    /// Unknown category slugs are ignored rather than rejected.
    #[must_use]
    pub fn from_params(params: &FeedParams) -> Self {
        Self {
            category: params
                .category
                .as_deref()
                .filter(|s| !s.is_empty())
                .and_then(|s| s.parse().ok()),
            query: params.q.as_deref().unwrap_or_default().trim().to_string(),
        }
    }

    /// Whether a category or search term is active.
    #[must_use]
    pub fn is_browsing(&self) -> bool {
        self.category.is_some() || !self.query.is_empty()
    }

    /// Whether a listing passes both filters.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.category.is_none_or(|c| listing.category == c) && listing.matches_text(&self.query)
    }

    /// Heading for the browsing grid.
    #[must_use]
    pub fn heading(&self) -> String {
        match self.category {
            Some(category) => category.label().to_string(),
            None => format!("Results for \"{}\"", self.query),
        }
    }
}

/// Listings that pass `query`, in store order.
#[must_use]
pub fn filter_listings(listings: &[Listing], query: &FeedQuery) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| query.matches(l))
        .cloned()
        .collect()
}

/// A uniform random sample of up to `limit` listings.
pub fn sample_deals<R: Rng + ?Sized>(listings: &[Listing], limit: usize, rng: &mut R) -> Vec<Listing> {
    let mut deals = listings.to_vec();
    deals.shuffle(rng);
    deals.truncate(limit);
    deals
}

/// One rendered section of the curated home page.
#[derive(Debug, Clone)]
pub enum HomeSection {
    Hero {
        title: String,
        subtitle: String,
    },
    Collections {
        title: String,
        tiles: &'static [CollectionTile],
    },
    Categories,
    Deals {
        title: String,
        listings: Vec<Listing>,
        countdown: Countdown,
    },
    Trending {
        tags: &'static [&'static str],
    },
    Feed {
        title: String,
        listings: Vec<Listing>,
    },
    Banner {
        image_url: String,
        alt: String,
        link: Option<String>,
    },
    CustomText {
        title: Option<String>,
        body: String,
    },
}

/// What the home page shows.
#[derive(Debug, Clone)]
pub enum HomeView {
    /// Flat grid for an active category or search.
    Browsing {
        heading: String,
        results: Vec<Listing>,
    },
    /// The visible blocks, in order.
    Curated { sections: Vec<HomeSection> },
}

/// Compose the home page for the given listings, settings and filter.
///
/// The deals rail is re-sampled on every call.
pub fn compose_home<R: Rng + ?Sized>(
    listings: &[Listing],
    settings: &SiteSettings,
    query: &FeedQuery,
    rng: &mut R,
) -> HomeView {
    if query.is_browsing() {
        return HomeView::Browsing {
            heading: query.heading(),
            results: filter_listings(listings, query),
        };
    }

    let sections = settings
        .visible_blocks()
        .into_iter()
        .filter_map(|block| match &block.content {
            BlockContent::Hero { title, subtitle } => Some(HomeSection::Hero {
                title: title.clone(),
                subtitle: subtitle.clone(),
            }),
            BlockContent::Collections { title } => Some(HomeSection::Collections {
                title: title.clone(),
                tiles: &COLLECTIONS,
            }),
            BlockContent::Categories => Some(HomeSection::Categories),
            BlockContent::Deals { title } => Some(HomeSection::Deals {
                title: title.clone(),
                listings: sample_deals(listings, DEALS_LIMIT, rng),
                countdown: Countdown::DEALS_START,
            }),
            BlockContent::Trending => Some(HomeSection::Trending {
                tags: &TRENDING_TAGS,
            }),
            BlockContent::Feed { title } => Some(HomeSection::Feed {
                title: title.clone(),
                listings: filter_listings(listings, query),
            }),
            BlockContent::Banner {
                image_url,
                alt,
                link,
            } => Some(HomeSection::Banner {
                image_url: image_url.clone(),
                alt: alt.clone(),
                link: link.clone(),
            }),
            BlockContent::CustomText { title, body } => Some(HomeSection::CustomText {
                title: title.clone(),
                body: body.clone(),
            }),
            BlockContent::Unknown => None,
        })
        .collect();

    HomeView::Curated { sections }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use curated_core::{BlockKind, PageBlock};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::fallback::bundled_listings;

    fn query(category: Option<Category>, text: &str) -> FeedQuery {
        FeedQuery {
            category,
            query: text.to_string(),
        }
    }

    #[test]
    fn test_from_params() {
        let q = FeedQuery::from_params(&FeedParams {
            category: Some("home-living".to_string()),
            q: Some("  mug ".to_string()),
        });
        assert_eq!(q.category, Some(Category::HomeLiving));
        assert_eq!(q.query, "mug");

        let q = FeedQuery::from_params(&FeedParams {
            category: Some("no-such-thing".to_string()),
            q: None,
        });
        assert_eq!(q, FeedQuery::default());
        assert!(!q.is_browsing());
    }

    #[test]
    fn test_filter_by_category() {
        let listings = bundled_listings(Utc::now());
        let results = filter_listings(&listings, &query(Some(Category::HomeLiving), ""));
        let ids: Vec<&str> = results.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["l1", "l3"]);
    }

    #[test]
    fn test_filter_by_text_searches_description() {
        let listings = bundled_listings(Utc::now());
        let results = filter_listings(&listings, &query(None, "EMERALD"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "l5");

        let results = filter_listings(&listings, &query(None, "asheville"));
        assert_eq!(results[0].id.as_str(), "l3");
    }

    #[test]
    fn test_filter_combines_category_and_text() {
        let listings = bundled_listings(Utc::now());
        assert!(filter_listings(&listings, &query(Some(Category::Jewelry), "candle")).is_empty());
        assert_eq!(
            filter_listings(&listings, &query(Some(Category::HomeLiving), "candle")).len(),
            1
        );
    }

    #[test]
    fn test_sample_deals_is_bounded_and_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut listings = bundled_listings(Utc::now());
        for n in 0..10 {
            let mut extra = listings[0].clone();
            extra.id = format!("x{n}").into();
            listings.push(extra);
        }

        let deals = sample_deals(&listings, DEALS_LIMIT, &mut rng);
        assert_eq!(deals.len(), DEALS_LIMIT);
        let ids: HashSet<_> = deals.iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids.len(), DEALS_LIMIT);

        let few = sample_deals(&listings[..3], DEALS_LIMIT, &mut rng);
        assert_eq!(few.len(), 3);
    }

    #[test]
    fn test_sample_deals_is_deterministic_for_a_seed() {
        let listings = bundled_listings(Utc::now());
        let a = sample_deals(&listings, 4, &mut StdRng::seed_from_u64(42));
        let b = sample_deals(&listings, 4, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_browsing_mode_ignores_blocks() {
        let listings = bundled_listings(Utc::now());
        let view = compose_home(
            &listings,
            &SiteSettings::default(),
            &query(None, "wallet"),
            &mut StdRng::seed_from_u64(1),
        );
        match view {
            HomeView::Browsing { heading, results } => {
                assert_eq!(heading, "Results for \"wallet\"");
                assert_eq!(results.len(), 1);
            }
            HomeView::Curated { .. } => panic!("expected browsing view"),
        }
    }

    #[test]
    fn test_curated_mode_follows_visible_blocks() {
        let listings = bundled_listings(Utc::now());
        let mut settings = SiteSettings::default();
        settings.home_blocks[1].visible = false;
        settings
            .home_blocks
            .push(PageBlock::new("b9", BlockContent::Unknown, 9));

        let view = compose_home(
            &listings,
            &settings,
            &FeedQuery::default(),
            &mut StdRng::seed_from_u64(1),
        );
        let HomeView::Curated { sections } = view else {
            panic!("expected curated view");
        };
        assert_eq!(sections.len(), 5);
        assert!(matches!(sections[0], HomeSection::Hero { .. }));
        assert!(matches!(sections[1], HomeSection::Categories));
        match &sections[4] {
            HomeSection::Feed { listings: feed, .. } => assert_eq!(feed.len(), 6),
            other => panic!("expected feed, got {other:?}"),
        }
        assert_eq!(settings.visible_blocks().last().unwrap().kind(), BlockKind::Unknown);
    }

    #[test]
    fn test_collection_tile_search_term() {
        assert_eq!(COLLECTIONS[1].search_term(), "Modern");
        assert_eq!(COLLECTIONS[5].search_term(), "Small");
    }
}
