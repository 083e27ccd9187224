//! Rumble channel pages turned into a normalized video feed.
//!
//! One request drives one sequential pipeline: fetch the channel listing
//! page, parse it, derive a [`extractor::VideoItem`] from every video anchor,
//! deduplicate by canonical link, and hand back a [`extractor::ChannelFeed`]
//! for whatever serialization layer sits on top (RSS, Atom, JSON).
//!
//! The interesting part lives in [`extractor`]: listing pages are not
//! uniformly structured, so every per-item field (title, thumbnail,
//! timestamp) is resolved through an ordered list of fallback strategies.

pub mod channel;
pub mod config;
pub mod extractor;
pub mod fetcher;

pub use channel::channel_feed;
pub use config::Config;
pub use extractor::{ChannelFeed, VideoItem};
pub use fetcher::{FetchClient, FetchError};
