//! Integration tests for Curated.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p curated-integration-tests
//! ```
//!
//! No external backend is needed. The router is driven in-process with
//! `tower::ServiceExt::oneshot`. By default the backend URL points at a
//! closed local port, so any remote call fails fast the way an outage would;
//! tests that need answers start a [`backend`] stub instead.
//!
//! # Test Categories
//!
//! - `catalog` - Listing store merge, browsing filter and the startup fetch
//! - `site_editor` - Home block editor and theme edits
//! - `routes` - Router-level responses for anonymous visitors
//! - `mutations` - Signed-in listing creation and deletion

pub mod backend;

use std::net::{IpAddr, Ipv4Addr};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::{DateTime, TimeZone, Utc};
use secrecy::SecretString;
use tower::ServiceExt;
use url::Url;

use curated_core::{Category, Listing, ListingId, Price, UserId};
use curated_storefront::catalog::ListingStore;
use curated_storefront::catalog::fallback::bundled_listings;
use curated_storefront::config::{StorefrontConfig, SupabaseConfig};
use curated_storefront::site::SettingsStore;
use curated_storefront::state::AppState;
use curated_storefront::supabase::SupabaseClient;

/// Nothing listens here; connections are refused immediately.
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

/// A fixed timestamp so listings compare equal across runs.
///
/// # Panics
///
/// Never; the date is valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// Storefront configuration pointing at an unreachable backend, AI disabled.
///
/// # Panics
///
/// Never; the URL literal is valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_config() -> StorefrontConfig {
    config_for(&Url::parse(UNREACHABLE_BACKEND).unwrap())
}

/// Storefront configuration pointing at `backend`, AI disabled.
#[must_use]
pub fn config_for(backend: &Url) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        supabase: SupabaseConfig {
            url: backend.clone(),
            anon_key: SecretString::from("test-anon-key"),
        },
        gemini: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Application state holding the given store and default site settings.
///
/// # Panics
///
/// Never; no generative-text key is configured.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn state_with(listings: ListingStore) -> AppState {
    state_from(test_config(), listings)
}

/// Application state talking to `backend` and holding the given store.
#[must_use]
pub fn state_for(backend: &Url, listings: ListingStore) -> AppState {
    state_from(config_for(backend), listings)
}

/// Backend client for `backend`.
///
/// # Panics
///
/// Never; the test key is a valid header value.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn client_for(backend: &Url) -> SupabaseClient {
    SupabaseClient::new(&config_for(backend).supabase).unwrap()
}

#[allow(clippy::unwrap_used)]
fn state_from(config: StorefrontConfig, listings: ListingStore) -> AppState {
    let supabase = SupabaseClient::new(&config.supabase).unwrap();
    AppState::new(config, supabase, listings, SettingsStore::default()).unwrap()
}

/// Application state with the bundled catalog, as after a failed fetch.
#[must_use]
pub fn test_state() -> AppState {
    state_with(ListingStore::new(bundled_listings(fixed_time())))
}

/// The full router over `state`.
#[must_use]
pub fn test_app(state: AppState) -> Router {
    curated_storefront::app(state)
}

/// A minimal listing with a displayable image.
#[must_use]
pub fn listing(id: &str, category: Category, title: &str) -> Listing {
    Listing {
        id: ListingId::new(id),
        title: title.to_string(),
        description: format!("Handmade {title}."),
        price: Price::from_cents(2500),
        category,
        location: "Tulsa, OK".to_string(),
        images: vec![format!("https://img.example/{id}.jpg")],
        seller_id: UserId::new("seller-1"),
        seller_name: "Test Maker".to_string(),
        seller_avatar: String::new(),
        created_at: fixed_time(),
        verified: true,
        discount: None,
    }
}

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get("location")
            .and_then(|v| v.to_str().ok())
    }
}

/// Send one request through the router.
pub async fn send(app: Router, method: &str, uri: &str) -> TestResponse {
    request(app, method, uri, None, None).await
}

/// Send one request with an optional session cookie and urlencoded form body.
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be read.
#[allow(clippy::unwrap_used)]
pub async fn request(
    app: Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    form: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// Shorthand for a GET.
pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, "GET", uri).await
}

/// Sign in through the join form and return the session cookie.
///
/// The router must be backed by a [`backend`] stub.
///
/// # Panics
///
/// Panics if the sign-in does not redirect or sets no cookie.
#[allow(clippy::unwrap_used)]
pub async fn sign_in(app: &Router) -> String {
    let form = format!(
        "email={}&password=hunter22",
        backend::STUB_EMAIL.replace('@', "%40")
    );
    let response = request(app.clone(), "POST", "/join/login", None, Some(&form)).await;
    assert_eq!(response.location(), Some("/"), "sign-in did not redirect: {}", response.body);

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}
