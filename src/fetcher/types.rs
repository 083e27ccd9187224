use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// A fetched listing page, decoded to UTF-8 and ready for parsing.
#[derive(Debug)]
pub struct PageResponse {
    /// URL after redirects.
    pub url_final: Url,
    pub status: StatusCode,
    pub body_raw: Bytes,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}
