//! Configuration handling for the feed builder.
//!
//! Everything here is process-wide read-only configuration fixed at startup.
//! The orchestrator takes a `Config` explicitly instead of reading ambient
//! global state, which keeps the extraction functions pure and testable
//! against hand-built page fragments.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use url::Url;

/// Environment variable names. Keeping them public lets tests refer to them.
pub const ENV_ORIGIN: &str = "RUMBLEFEED_ORIGIN";
pub const ENV_USER_AGENT: &str = "RUMBLEFEED_USER_AGENT";
pub const ENV_SITE_NAME: &str = "RUMBLEFEED_SITE_NAME";

const DEFAULT_ORIGIN: &str = "https://rumble.com";
/// The site serves 403 to clients that do not look like a real browser, so
/// the default identity is a plain desktop browser string.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
const DEFAULT_SITE_NAME: &str = "Rumble";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    origin: Url,
    user_agent: String,
    site_name: String,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(origin: Url, user_agent: impl Into<String>, site_name: impl Into<String>) -> Self {
        Self {
            origin,
            user_agent: user_agent.into(),
            site_name: site_name.into(),
        }
    }

    /// Load from environment variables, falling back to the built-in
    /// defaults. Fails only when an override is present but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let origin_raw = env::var(ENV_ORIGIN).unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        let origin = Url::parse(&origin_raw).map_err(|e| ConfigError::InvalidValue {
            field: ENV_ORIGIN,
            reason: e.to_string(),
        })?;
        let user_agent =
            env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let site_name = env::var(ENV_SITE_NAME).unwrap_or_else(|_| DEFAULT_SITE_NAME.to_string());
        Ok(Self {
            origin,
            user_agent,
            site_name,
        })
    }

    /// Base origin of the target site; relative hrefs resolve against it.
    pub fn origin(&self) -> &Url {
        &self.origin
    }
    /// Identity sent in the `User-Agent` header of every page fetch.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    /// Display name of the site, used as the feed-title prefix and as the
    /// last-resort page title.
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Built-in defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        // not a `Default` impl yet to keep explicit semantics
        Self::new(
            Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid url"),
            DEFAULT_USER_AGENT,
            DEFAULT_SITE_NAME,
        )
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
