//! Listing store merge, browsing filter and the startup fetch.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use curated_core::{Category, ListingId, SiteSettings};
use serde_json::json;

use curated_integration_tests::backend::{self, StubConfig};
use curated_integration_tests::{client_for, fixed_time, listing};
use curated_storefront::catalog::fallback::bundled_listings;
use curated_storefront::catalog::store::merge_listings;
use curated_storefront::catalog::{FeedQuery, HomeView, ListingStore, compose_home, filter_listings};

#[test]
fn merged_store_has_unique_ids_and_http_images() {
    let mut shadow = listing("l1", Category::Clothing, "Remote Override");
    shadow.price = curated_core::Price::from_cents(100);
    let mut relative = listing("r2", Category::Jewelry, "No Scheme");
    relative.images = vec!["/uploads/r2.jpg".to_string()];
    let mut bare = listing("r3", Category::Jewelry, "No Images");
    bare.images.clear();

    let remote = vec![
        shadow.clone(),
        listing("r1", Category::Jewelry, "Silver Ring"),
        listing("r1", Category::Jewelry, "Duplicate Ring"),
        relative,
        bare,
    ];
    let merged = merge_listings(remote, bundled_listings(fixed_time()));

    let ids: HashSet<&ListingId> = merged.iter().map(|l| &l.id).collect();
    assert_eq!(ids.len(), merged.len());
    assert!(merged.iter().all(|l| {
        let first = l.images.first().unwrap();
        first.starts_with("http://") || first.starts_with("https://")
    }));

    // Remote rows come first and win over bundled rows with the same id.
    assert_eq!(merged[0], shadow);
    assert_eq!(merged[1].title, "Silver Ring");
    assert!(!ids.contains(&ListingId::new("r2")));
    assert!(!ids.contains(&ListingId::new("r3")));
}

#[test]
fn failed_fetch_uses_bundled_listings_unmerged() {
    let store = ListingStore::from_fetch::<&str>(Err("connection refused"), fixed_time());
    assert_eq!(store.snapshot(), bundled_listings(fixed_time()));
}

#[test]
fn successful_fetch_puts_remote_first() {
    let remote = vec![listing("new-1", Category::ToysGames, "Wooden Top")];
    let store = ListingStore::from_fetch::<&str>(Ok(remote), fixed_time());
    assert_eq!(store.len(), bundled_listings(fixed_time()).len() + 1);
    assert_eq!(store.snapshot()[0].id, ListingId::new("new-1"));
}

#[test]
fn browsing_returns_exactly_the_matching_subset() {
    let listings = vec![
        listing("a", Category::Jewelry, "Beaded Necklace"),
        listing("b", Category::Clothing, "Linen Shirt"),
        listing("c", Category::Jewelry, "Copper Cuff"),
        listing("d", Category::HomeLiving, "Copper Kettle"),
    ];

    let query = FeedQuery {
        category: Some(Category::Jewelry),
        query: String::new(),
    };
    let filtered = filter_listings(&listings, &query);
    let ids: Vec<&str> = filtered
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "c"]);

    let query = FeedQuery {
        category: None,
        query: "COPPER".to_string(),
    };
    let expected: Vec<_> = listings
        .iter()
        .filter(|l| {
            l.title.to_lowercase().contains("copper")
                || l.description.to_lowercase().contains("copper")
        })
        .cloned()
        .collect();
    assert_eq!(filter_listings(&listings, &query), expected);

    let query = FeedQuery {
        category: Some(Category::Jewelry),
        query: "copper".to_string(),
    };
    let filtered = filter_listings(&listings, &query);
    let ids: Vec<&str> = filtered
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(ids, vec!["c"]);
}

#[test]
fn category_filter_example() {
    let listings = vec![
        listing("a", Category::Jewelry, "Pendant"),
        listing("b", Category::Clothing, "Scarf"),
    ];
    let query = FeedQuery {
        category: Some(Category::Jewelry),
        query: String::new(),
    };

    let HomeView::Browsing { results, .. } = compose_home(
        &listings,
        &SiteSettings::default(),
        &query,
        &mut StdRng::seed_from_u64(1),
    ) else {
        panic!("expected browsing view");
    };
    assert_eq!(results, vec![listings[0].clone()]);
}

#[test]
fn remove_of_absent_id_is_a_no_op() {
    let store = ListingStore::new(bundled_listings(fixed_time()));
    let before = store.snapshot();
    assert!(!store.remove(&ListingId::new("missing")));
    assert_eq!(store.snapshot(), before);

    assert!(store.remove(&ListingId::new("l1")));
    assert!(!store.remove(&ListingId::new("l1")));
    assert_eq!(store.len(), before.len() - 1);
}

#[tokio::test]
async fn fetch_keeps_good_rows_when_one_is_malformed() {
    let good = json!({
        "id": "r-good",
        "title": "Raku Tea Bowl",
        "description": "Crackle glaze.",
        "price": 64,
        "category": "Home & Living",
        "location": "Santa Fe, NM",
        "images": ["https://img.example/raku.jpg"],
        "seller_id": "u-7",
        "seller_name": "Kiln Hill",
        "created_at": "2026-02-20T10:00:00Z",
        "verified": true
    });
    let mut bad = good.clone();
    bad["id"] = json!("r-bad");
    bad["category"] = json!("Antiques");

    let stub = backend::spawn(StubConfig {
        rows: vec![good, bad],
        ..StubConfig::default()
    })
    .await;

    let fetched = client_for(&stub.url).fetch_listings().await;
    let remote = fetched.as_ref().unwrap();
    assert_eq!(remote.len(), 1);

    let store = ListingStore::from_fetch(fetched, fixed_time());
    assert!(store.get(&ListingId::new("r-good")).is_some());
    assert!(store.get(&ListingId::new("r-bad")).is_none());
    assert_eq!(store.len(), bundled_listings(fixed_time()).len() + 1);
}
