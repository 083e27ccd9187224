use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// One video entry derived from a listing-page anchor.
///
/// `link` is the canonical form (absolute, tracking parameter stripped) and
/// doubles as the deduplication key. `title` is always populated; everything
/// else is best-effort and omitted when the page gives us nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoItem {
    pub title: String,
    pub link: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<ItemMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Thumbnail mirrored as both a preview and an image content representation,
/// the shape feed assemblers expect for media enclosures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemMedia {
    pub thumbnail_url: Url,
    pub content_url: Url,
    pub medium: String,
}

impl ItemMedia {
    pub fn image(url: Url) -> Self {
        Self {
            thumbnail_url: url.clone(),
            content_url: url,
            medium: "image".to_string(),
        }
    }
}

/// The assembled feed payload handed to the serialization layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelFeed {
    pub title: String,
    pub link: Url,
    pub items: Vec<VideoItem>,
}
