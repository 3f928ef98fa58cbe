//! Domain types for the Curated marketplace.
//!
//! This module provides type-safe wrappers for marketplace concepts.

pub mod block;
pub mod category;
pub mod countdown;
pub mod email;
pub mod id;
pub mod listing;
pub mod price;
pub mod role;
pub mod settings;

pub use block::{BlockContent, BlockKind, MoveDirection, PageBlock};
pub use category::{Category, CategoryError};
pub use countdown::Countdown;
pub use email::{Email, EmailError};
pub use id::*;
pub use listing::{Listing, ListingError, NewListing};
pub use price::{Price, PriceError};
pub use role::{Capability, Role};
pub use settings::{AccentColor, ColorError, CustomPage, SiteSettings};
