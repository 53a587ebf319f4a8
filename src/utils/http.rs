use anyhow::Result;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::ExtractError;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

pub fn create_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

/// Single GET for the page body. No retries and no caching.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, ExtractError> {
    let network = |source: reqwest::Error| ExtractError::Network {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url.clone())
        .header(ACCEPT, HTML_ACCEPT)
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await
        .map_err(|e| {
            error!("Request failed for {}: {}", url, e);
            network(e)
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!("HTTP error {}: {}", status, url);
        return Err(ExtractError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let html = response.text().await.map_err(network)?;
    info!("Fetched {} bytes from {}", html.len(), url);
    Ok(html)
}
