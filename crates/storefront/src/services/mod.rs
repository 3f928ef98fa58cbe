//! Business logic that sits between route handlers and the remote clients.
//!
//! - `assist` - Generative category/price suggestions and descriptions, with
//!   fixed fallbacks when the generative service is unavailable.

pub mod assist;
