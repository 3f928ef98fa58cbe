//! Home page blocks.
//!
//! A [`PageBlock`] is one configurable, orderable, show/hide-able section of
//! the home page. Its payload is a tagged enum keyed by the block type so
//! every type carries exactly the fields it renders.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::BlockId;

/// Block payload, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    /// Headline banner with the search box.
    Hero { title: String, subtitle: String },
    /// Grid of collection tiles that seed a search.
    Collections { title: String },
    /// Category icon bar.
    Categories,
    /// Horizontally scrolling rail of sampled listings.
    Deals { title: String },
    /// Static rail of trending search tags.
    Trending,
    /// Grid of all (filtered) listings.
    Feed { title: String },
    /// Full-width promotional image.
    Banner {
        image_url: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        link: Option<String>,
    },
    /// Free-form text section.
    CustomText {
        #[serde(default)]
        title: Option<String>,
        body: String,
    },
    /// A type tag this build does not know. Renders nothing.
    #[serde(other)]
    Unknown,
}

impl BlockContent {
    /// The type tag of this payload.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Hero { .. } => BlockKind::Hero,
            Self::Collections { .. } => BlockKind::Collections,
            Self::Categories => BlockKind::Categories,
            Self::Deals { .. } => BlockKind::Deals,
            Self::Trending => BlockKind::Trending,
            Self::Feed { .. } => BlockKind::Feed,
            Self::Banner { .. } => BlockKind::Banner,
            Self::CustomText { .. } => BlockKind::CustomText,
            Self::Unknown => BlockKind::Unknown,
        }
    }
}

/// The type tag of a block, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Hero,
    Collections,
    Categories,
    Deals,
    Trending,
    Feed,
    Banner,
    CustomText,
    Unknown,
}

impl BlockKind {
    /// The serialized tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Collections => "collections",
            Self::Categories => "categories",
            Self::Deals => "deals",
            Self::Trending => "trending",
            Self::Feed => "feed",
            Self::Banner => "banner",
            Self::CustomText => "custom_text",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A configurable section of the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBlock {
    pub id: BlockId,
    pub content: BlockContent,
    pub visible: bool,
    /// Sort key. Not required to be contiguous; ties keep list order.
    pub order: i32,
}

impl PageBlock {
    /// Create a visible block.
    #[must_use]
    pub fn new(id: impl Into<BlockId>, content: BlockContent, order: i32) -> Self {
        Self {
            id: id.into(),
            content,
            visible: true,
            order,
        }
    }

    /// The block's type tag.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        self.content.kind()
    }
}

/// Direction for moving a block in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}
