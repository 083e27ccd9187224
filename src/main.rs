use anyhow::{Context, Result};

use rumblefeed::{channel, config::Config, fetcher::FetchClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let slug = std::env::args()
        .nth(1)
        .context("usage: rumblefeed <channel-slug>")?;

    let config = Config::from_env()?;
    let client = FetchClient::new(&config)?;

    let feed = channel::channel_feed(&config, &client, &slug).await?;
    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}
