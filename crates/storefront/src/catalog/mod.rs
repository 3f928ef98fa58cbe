//! Listing catalog: the in-memory store, bundled listings and home feed.

pub mod fallback;
pub mod feed;
pub mod store;

pub use feed::{FeedParams, FeedQuery, HomeSection, HomeView, compose_home, filter_listings};
pub use store::ListingStore;
