//! Per-anchor record derivation, the core of the extraction engine.
//!
//! Each video anchor gets a content block (the smallest container grouping
//! its link, thumbnail and metadata), and every field is resolved through an
//! ordered list of fallbacks within that block, widening to the anchor's
//! ancestors only when the narrow search comes up empty.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::extractor::dates;
use crate::extractor::model::{ItemMedia, VideoItem};
use crate::extractor::scope::SearchScope;

/// Query parameter the site appends for click tracking. Stripping it keeps
/// two anchors to the same video deduplicable.
const TRACKING_PARAM: &str = "e9s";

/// Path fragment present in per-video thumbnail assets, as opposed to
/// avatars and site chrome.
const VIDEO_ASSET_PATH: &str = "/video/";

/// Class of the card container grouping one video's link and metadata.
const CARD_CLASS: &str = "videostream";

static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static TIME_WITH_DATETIME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time[datetime]").unwrap());

/// Derive one [`VideoItem`] from a candidate anchor.
///
/// Anchors without an `href` are decorative and yield `None`; so do anchors
/// whose `href` cannot be resolved against the origin. Missing images and
/// timestamps are field omissions, never failures.
pub fn extract_item(
    anchor: ElementRef<'_>,
    origin: &Url,
    now: DateTime<Utc>,
) -> Option<VideoItem> {
    let href = anchor.value().attr("href")?;
    let mut link = origin.join(href).ok()?;
    strip_tracking_param(&mut link);

    let block = content_block(anchor);
    let scope = SearchScope::new(block, anchor);

    let image = resolve_image(block, origin);
    let title = image
        .as_ref()
        .and_then(|img| img.alt.clone())
        .unwrap_or_else(|| link.path().to_string());

    let published_at = resolve_published_at(&scope, now);

    let (description, thumbnail_url, media) = match image {
        Some(img) => (
            Some(format!(r#"<p><img src="{}"></p>"#, img.url)),
            Some(img.url.clone()),
            Some(ItemMedia::image(img.url)),
        ),
        None => (None, None, None),
    };

    Some(VideoItem {
        title,
        link,
        description,
        thumbnail_url,
        media,
        published_at,
    })
}

/// Remove the tracking query parameter, preserving all other parameters in
/// their original order.
fn strip_tracking_param(url: &mut Url) {
    if url.query().is_none() {
        return;
    }
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key.as_ref() != TRACKING_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if retained.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(retained);
    }
}

/// The smallest enclosing element that semantically groups this video's
/// link, thumbnail and metadata: the nearest `videostream` card ancestor,
/// else the anchor's direct parent. Bounding field searches to this block
/// prevents cross-contamination from neighboring cards.
fn content_block(anchor: ElementRef<'_>) -> ElementRef<'_> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|class| class == CARD_CLASS))
        .or_else(|| anchor.parent().and_then(ElementRef::wrap))
        .unwrap_or(anchor)
}

struct ResolvedImage {
    url: Url,
    alt: Option<String>,
}

/// Tiered image lookup: a descendant `img` whose source points at a
/// per-video asset beats document order; failing that, the first `img` of
/// any kind. No image at all is fine.
fn resolve_image(block: ElementRef<'_>, origin: &Url) -> Option<ResolvedImage> {
    let images: Vec<ElementRef<'_>> = block.select(&IMG).collect();
    let chosen = images
        .iter()
        .find(|img| image_source(img).is_some_and(|src| src.contains(VIDEO_ASSET_PATH)))
        .or_else(|| images.first())
        .copied()?;

    let url = origin.join(image_source(&chosen)?).ok()?;
    let alt = chosen
        .value()
        .attr("alt")
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(str::to_string);
    Some(ResolvedImage { url, alt })
}

/// `src` wins over the deferred-load `data-src`.
fn image_source<'a>(img: &ElementRef<'a>) -> Option<&'a str> {
    let element = img.value();
    element.attr("src").or_else(|| element.attr("data-src"))
}

/// Tiered timestamp lookup. The machine-readable `datetime` attribute wins
/// over the visible relative phrase; an unparsable attribute leaves the
/// field empty rather than falling through to the weaker tier.
fn resolve_published_at(scope: &SearchScope<'_>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let machine = scope.find_map(|el| {
        el.select(&TIME_WITH_DATETIME)
            .next()
            .and_then(|time| time.value().attr("datetime"))
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
    });
    if let Some(raw) = machine {
        return dates::parse_absolute(&raw);
    }

    let relative = scope.find_map(|el| {
        let text = el.text().collect::<String>();
        dates::RELATIVE_TIME_RE
            .find(&text)
            .map(|m| m.as_str().to_string())
    });
    relative.and_then(|phrase| dates::parse_relative(&phrase, now))
}
