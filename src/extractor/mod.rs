pub mod dates;
pub mod dedup;
pub mod item;
pub mod model;
pub mod scope;
pub mod title;

#[cfg(test)]
mod tests;

pub use model::{ChannelFeed, ItemMedia, VideoItem};

use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::config::Config;

/// Anchors that link out to a single video from the listing.
static VIDEO_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".videostream__link").unwrap());

/// Pure extraction pass over a parsed listing page.
///
/// Enumerates every candidate video anchor, derives a record from each,
/// drops the unusable ones and deduplicates by canonical link. `page_url`
/// becomes the feed's own link.
pub fn extract_feed(document: &Html, page_url: &Url, config: &Config) -> ChannelFeed {
    let channel_title = title::extract_title(document, config.site_name());
    let now = Utc::now();

    let candidates: Vec<VideoItem> = document
        .select(&VIDEO_LINK)
        .filter_map(|anchor| item::extract_item(anchor, config.origin(), now))
        .collect();
    let total = candidates.len();
    let items = dedup::dedup_by_link(candidates);

    debug!(
        candidates = total,
        items = items.len(),
        "extracted listing items"
    );

    ChannelFeed {
        title: format!("{} - {}", config.site_name(), channel_title),
        link: page_url.clone(),
        items,
    }
}
