//! Feed items displayed by the demo container.

use crate::model::error::FeedError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One card / row in the content area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Primary label.
    pub title: String,
    /// Secondary text, shown in comfortable lists and the detail panel.
    #[serde(default)]
    pub detail: String,
}

impl FeedItem {
    /// Create a feed item.
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Item prepended after a successful refresh.
    pub fn refreshed_at(at: DateTime<Local>, sequence: usize) -> Self {
        Self::new(
            format!("Update #{sequence}"),
            format!("Fetched at {}", at.format("%H:%M:%S")),
        )
    }
}

/// Load a JSON array of feed items from disk.
///
/// # Errors
///
/// Returns [`FeedError`] if the file cannot be read or is not valid JSON.
pub fn load_feed(path: &Path) -> Result<Vec<FeedItem>, FeedError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| FeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Built-in feed used when no file is given.
pub fn sample_feed() -> Vec<FeedItem> {
    [
        ("Weekly digest", "Five posts you missed this week"),
        ("Karma milestone", "You reached 1,000 karma"),
        ("New follower", "Someone started following you"),
        ("Bookmark saved", "Added to Reading List"),
        ("Moderation queue", "3 reports awaiting review"),
        ("Call ended", "Duration 12m 40s"),
        ("Trending", "Rust 2024 edition retrospective"),
        ("Badge earned", "Helpful answer x10"),
        ("Reply", "Thanks, that fixed it!"),
        ("Analytics", "Profile views up 18%"),
        ("Mention", "You were mentioned in #general"),
        ("Event", "Community call starts in 1 hour"),
    ]
    .into_iter()
    .map(|(title, detail)| FeedItem::new(title, detail))
    .collect()
}
