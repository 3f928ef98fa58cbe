//! User roles and the capabilities they grant.

use serde::{Deserialize, Serialize};

/// A user's role, read from the auth service's server-controlled app metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Manager,
    Admin,
}

/// Something a signed-in user may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create listings and delete their own.
    Sell,
    /// Delete any listing from the inventory view.
    ManageListings,
    /// Edit the home page layout, theme color and site name.
    ManageSite,
}

impl Role {
    /// Parse a role tag, treating anything unrecognised as [`Role::User`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "manager" => Self::Manager,
            _ => Self::User,
        }
    }

    /// Whether this role grants `capability`.
    #[must_use]
    pub const fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::Sell => true,
            Capability::ManageListings => matches!(self, Self::Manager | Self::Admin),
            Capability::ManageSite => matches!(self, Self::Admin),
        }
    }
}
