use std::fs;

use chrono::{Duration, Utc};
use scraper::Html;
use url::Url;

use crate::config::Config;
use crate::extractor::extract_feed;

fn test_config() -> Config {
    Config::new(
        Url::parse("https://rumble.com").unwrap(),
        "test-agent",
        "Rumble",
    )
}

fn page_url() -> Url {
    Url::parse("https://rumble.com/c/Timcast").unwrap()
}

#[test]
fn channel_listing_end_to_end() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/channel.html")
        .expect("Failed to read test fixture");
    let document = Html::parse_document(&html);

    let feed = extract_feed(&document, &page_url(), &test_config());

    assert_eq!(feed.title, "Rumble - Timcast");
    assert_eq!(feed.link, page_url());

    // Four anchors carry an href; the featured and listing copies of the
    // announcement normalize to the same link, and the nav anchor without
    // an href contributes nothing.
    assert_eq!(feed.items.len(), 3);

    let announcement = &feed.items[0];
    assert_eq!(announcement.title, "Big Announcement");
    assert_eq!(
        announcement.link.as_str(),
        "https://rumble.com/v5abc12-big-announcement.html"
    );
    assert_eq!(
        announcement.thumbnail_url.as_ref().unwrap().as_str(),
        "https://rumble.com/i/s/video/v5abc12.oq1b.jpg"
    );
    let one_day = announcement.published_at.expect("relative time resolved");
    assert!((one_day - (Utc::now() - Duration::days(1))).num_seconds().abs() < 60);

    let live_show = &feed.items[1];
    assert_eq!(live_show.title, "Live Show Episode 42");
    assert_eq!(
        live_show.thumbnail_url.as_ref().unwrap().as_str(),
        "https://rumble.com/i/s/video/v6def34.z9x2.jpg"
    );
    let three_hours = live_show.published_at.expect("relative time resolved");
    let expected = Utc::now() - Duration::hours(3);
    assert!((three_hours - expected).num_seconds().abs() < 60);

    let audio_only = &feed.items[2];
    assert_eq!(audio_only.title, "/v7ghi56-audio-only.html");
    assert!(audio_only.thumbnail_url.is_none());
    assert!(audio_only.description.is_none());
    assert!(audio_only.published_at.is_some());
}

#[test]
fn featured_copy_wins_over_listing_copy() {
    // First occurrence in document order is kept; the featured card carries
    // the avatar image too, and the /video/ path still wins inside it.
    let html = fs::read_to_string("src/extractor/tests/fixtures/channel.html")
        .expect("Failed to read test fixture");
    let document = Html::parse_document(&html);

    let feed = extract_feed(&document, &page_url(), &test_config());
    let announcement = &feed.items[0];
    assert!(
        announcement
            .thumbnail_url
            .as_ref()
            .unwrap()
            .path()
            .contains("/video/")
    );
}

#[test]
fn page_without_headings_uses_default_title() {
    let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");
    let feed = extract_feed(&document, &page_url(), &test_config());
    assert_eq!(feed.title, "Rumble - Rumble");
    assert!(feed.items.is_empty());
}

#[test]
fn hrefless_anchors_never_panic() {
    let document = Html::parse_document(
        r#"<html><body>
             <a class="videostream__link">one</a>
             <a class="videostream__link">two</a>
           </body></html>"#,
    );
    let feed = extract_feed(&document, &page_url(), &test_config());
    assert!(feed.items.is_empty());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_feed_never_panics(html in ".*") {
            let document = Html::parse_document(&html);
            let feed = extract_feed(&document, &page_url(), &test_config());
            // Links are canonical: absolute and free of the tracking param
            for item in &feed.items {
                prop_assert!(!item.title.is_empty());
                prop_assert!(item.link.query_pairs().all(|(k, _)| k != "e9s"));
            }
        }
    }
}
