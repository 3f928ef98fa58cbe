//! Curated Core - Shared domain types.
//!
//! This crate provides the types used across all Curated components:
//! - `storefront` - The marketplace web server (home feed, sell flow, admin)
//! - `cli` - Command-line tools for inspecting and seeding listings
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations on them - no I/O,
//! no HTTP clients. Remote storage and auth live in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Listings, categories, prices, page blocks, site settings and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
