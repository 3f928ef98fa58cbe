//! Storefront-side models that live in the session.

pub mod session;

pub use session::{CurrentUser, SessionTokens, keys as session_keys};
