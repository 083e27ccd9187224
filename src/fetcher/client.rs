use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, ClientBuilder, StatusCode, header};
use tracing::{instrument, warn};
use url::Url;

use crate::config::Config;
use crate::fetcher::{decode, errors::FetchError, types::PageResponse};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
/// Pause before the single 403 retry; immediate re-requests tend to hit the
/// same block.
const FORBIDDEN_RETRY_DELAY: Duration = Duration::from_millis(500);

/// HTTP client for fetching listing pages, carrying the configured identity.
pub struct FetchClient {
    http: Client,
}

impl FetchClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(config.user_agent())
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_HTML));
                headers
            })
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetch one listing page and decode it to UTF-8.
    ///
    /// The target site intermittently answers 403 based on request volume;
    /// a single automatic retry usually gets through. Any other failure is
    /// surfaced unchanged.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch_page(&self, url: &Url) -> Result<PageResponse, FetchError> {
        let mut response = self.send(url).await?;

        if response.status() == StatusCode::FORBIDDEN {
            warn!("got 403 from listing page, retrying once");
            tokio::time::sleep(FORBIDDEN_RETRY_DELAY).await;
            response = self.send(url).await?;
        }

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let url_final = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::http(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body_raw = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        // Check again in case Content-Length was missing
        if body_raw.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body_raw.len() as u64));
        }

        let body = decode::decode_body(&content_type, &body_raw)?;

        Ok(PageResponse {
            url_final,
            status,
            body_raw,
            body,
            fetched_at: Utc::now(),
        })
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        self.http
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)
    }
}
