//! Router-level page responses.
//!
//! The backend is unreachable in most of these tests, so they cover every
//! page that renders from the in-memory stores and every guard that
//! redirects before a remote call is made. Pages that depend on who is
//! signed in use the local backend stub to sign in first.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use curated_integration_tests::backend::{self, StubConfig};
use curated_integration_tests::{get, request, send, sign_in, state_for, test_app, test_state};
use curated_storefront::catalog::ListingStore;
use curated_storefront::catalog::fallback::bundled_listings;

#[tokio::test]
async fn health_is_ok() {
    let response = get(test_app(test_state()), "/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn readiness_reports_unreachable_backend() {
    let response = get(test_app(test_state()), "/health/ready").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn home_renders_curated_sections() {
    let response = get(test_app(test_state()), "/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Gifts with a Soul."));
    assert!(response.body.contains("Handpicked for You"));
    assert!(response.body.contains("Discover Recent Arrivals"));
    assert!(response.body.contains("data-countdown"));
}

#[tokio::test]
async fn home_hides_hidden_blocks() {
    let state = test_state();
    state
        .settings()
        .toggle_visibility(&curated_core::BlockId::new("b3"));

    let response = get(test_app(state), "/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("Handpicked for You"));
}

#[tokio::test]
async fn category_browsing_shows_only_that_category() {
    let response = get(test_app(test_state()), "/?category=personalized").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Horween Leather"));
    assert!(!response.body.contains("Soy Candle"));
    assert!(!response.body.contains("Discover Recent Arrivals"));
}

#[tokio::test]
async fn search_browsing_matches_text() {
    let response = get(test_app(test_state()), "/?q=candle").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Soy Candle"));
    assert!(!response.body.contains("Horween Leather"));
}

#[tokio::test]
async fn listing_detail_renders() {
    let response = get(test_app(test_state()), "/p/l1?image=2").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Soy Candle"));
    assert!(response.body.contains("Ready to ship from Portland, Oregon"));
}

#[tokio::test]
async fn unknown_listing_is_not_found() {
    let response = get(test_app(test_state()), "/p/missing").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("This piece has already found a home."));
}

#[tokio::test]
async fn theme_stylesheet_uses_accent_color() {
    let state = test_state();
    state.settings().set_accent_color("#336699").unwrap();

    let response = get(test_app(state), "/theme.css").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("--color-primary: #336699;"));
}

#[tokio::test]
async fn site_name_appears_in_layout() {
    let state = test_state();
    state.settings().set_site_name("Makers Row").unwrap();

    let response = get(test_app(state), "/").await;
    assert!(response.body.contains("Makers Row"));
}

#[tokio::test]
async fn protected_pages_redirect_to_join() {
    for (method, uri) in [
        ("GET", "/sell"),
        ("GET", "/me"),
        ("GET", "/admin"),
        ("GET", "/admin/design"),
        ("POST", "/admin/design/0/down"),
        ("POST", "/admin/items/l1/delete"),
        ("POST", "/me/listings/l1/delete"),
    ] {
        let response = send(test_app(test_state()), method, uri).await;
        assert!(
            response.status.is_redirection(),
            "{method} {uri} returned {}",
            response.status
        );
        assert_eq!(response.location(), Some("/join"), "{method} {uri}");
    }
}

#[tokio::test]
async fn join_page_renders_both_tabs() {
    let app = test_app(test_state());
    let response = get(app.clone(), "/join").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("/join/login"));

    let response = get(app, "/join?mode=register").await;
    assert!(response.body.contains("/join/register"));
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let response = get(test_app(test_state()), "/").await;
    assert!(response.headers.contains_key("x-request-id"));
    assert!(response.headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn static_assets_are_served() {
    let response = get(test_app(test_state()), "/static/js/countdown.js").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn collections_greet_visitor_as_maker() {
    let response = get(test_app(test_state()), "/").await;
    assert!(response.body.contains("Happy browsing, <span class=\"accent\">Maker!</span>"));
    assert!(response.body.contains("Explore curated collections from US workshops."));
}

#[tokio::test]
async fn collections_greet_signed_in_user_by_name() {
    let stub = backend::spawn(StubConfig::default()).await;
    let state = state_for(
        &stub.url,
        ListingStore::new(bundled_listings(curated_integration_tests::fixed_time())),
    );
    let app = test_app(state);
    let cookie = sign_in(&app).await;

    let response = request(app, "GET", "/", Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Happy browsing, <span class=\"accent\">Stub Maker!</span>"));
}

#[tokio::test]
async fn category_bar_everything_pill_clears_filter() {
    let home = get(test_app(test_state()), "/").await;
    assert!(home.body.contains("category-pill category-pill-all active\" href=\"/\""));

    let browsing = get(test_app(test_state()), "/?category=clothing").await;
    assert!(browsing.body.contains("category-pill category-pill-all\" href=\"/\""));
    assert!(browsing.body.contains(">Everything</span>"));
}
