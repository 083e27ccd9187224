//! Channel-page orchestration: build the listing URL, fetch, parse, extract.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use scraper::Html;
use tracing::info;
use url::Url;

use crate::config::Config;
use crate::extractor::{self, ChannelFeed};
use crate::fetcher::{FetchClient, FetchError};

/// Characters left intact when the slug is embedded as a path segment
/// (RFC 3986 unreserved).
const SLUG_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Listing URL for a channel slug: `<origin>/c/<slug>`, slug percent-encoded.
pub fn channel_url(origin: &Url, slug: &str) -> Result<Url, FetchError> {
    let path = format!("/c/{}", utf8_percent_encode(slug, SLUG_SET));
    Ok(origin.join(&path)?)
}

/// Build the normalized feed for one channel.
///
/// One sequential pipeline per call: fetch (with the client's single 403
/// retry), parse, extract. A failed fetch fails the whole request; there is
/// no partial feed and nothing is cached across calls.
pub async fn channel_feed(
    config: &Config,
    client: &FetchClient,
    slug: &str,
) -> Result<ChannelFeed, FetchError> {
    let page_url = channel_url(config.origin(), slug)?;
    let response = client.fetch_page(&page_url).await?;

    let document = Html::parse_document(&response.body);
    let feed = extractor::extract_feed(&document, &page_url, config);

    info!(channel = slug, items = feed.items.len(), "built channel feed");
    Ok(feed)
}
