use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::ExtractError;
use crate::models::Product;
use crate::parsers::{parse_payload, resolve_product_node, scanner_for, HtmlScanner};
use crate::scrapers::fields::PageSources;
use crate::scrapers::ProductScraper;
use crate::utils::http::fetch_page;
use crate::utils::url::validate_product_url;

pub struct MercadoLibreScraper {
    config: Arc<Config>,
    scanner: Box<dyn HtmlScanner>,
}

impl MercadoLibreScraper {
    pub fn new(config: Arc<Config>) -> Self {
        let scanner = scanner_for(config.scanner);
        Self { config, scanner }
    }

    pub fn with_scanner(config: Arc<Config>, scanner: Box<dyn HtmlScanner>) -> Self {
        Self { config, scanner }
    }

    pub fn validate_url(&self, raw: &str) -> Result<Url, ExtractError> {
        validate_product_url(raw, &self.config.marketplace_domain)
    }

    /// Build a [`Product`] from an already fetched page.
    ///
    /// Pure in `(url, html)`: JSON-LD product data is preferred field by
    /// field, meta tags fill whatever is still missing, and only a missing
    /// name is an error.
    pub fn extract_from_html(&self, html: &str, url: &Url) -> Result<Product, ExtractError> {
        let candidates = self.scanner.jsonld_candidates(html);
        let parsed: Vec<Value> = candidates.iter().filter_map(|c| parse_payload(c)).collect();
        let product_node = resolve_product_node(&parsed);

        if product_node.is_none() {
            debug!(
                candidates = candidates.len(),
                parsed = parsed.len(),
                "No structured product data, falling back to meta tags"
            );
        }

        let page = PageSources {
            html,
            product_node,
            scanner: self.scanner.as_ref(),
        };

        let name = page.resolve("name", PageSources::name);
        let description = page.resolve("description", PageSources::description);
        let images = page.resolve("images", PageSources::images).unwrap_or_default();
        let offer = page.resolve("price", PageSources::offer);

        let Some(name) = name else {
            warn!("No product name found on {}", url);
            return Err(ExtractError::ExtractionIncomplete);
        };

        let (price, currency) = match offer {
            Some(offer) => (Some(offer.price), offer.currency),
            None => (None, None),
        };

        Ok(Product {
            name,
            description,
            price,
            currency,
            images,
            source_url: url.to_string(),
        })
    }
}

#[async_trait]
impl ProductScraper for MercadoLibreScraper {
    async fn scrape(&self, client: &Client, url: &str) -> Result<Product, ExtractError> {
        let url = self.validate_url(url)?;
        info!("Scraping {} product page: {}", self.marketplace(), url);

        let html = fetch_page(client, &url).await?;
        let product = self.extract_from_html(&html, &url)?;

        info!(
            "Extracted \"{}\" from {} ({} images, price {})",
            product.name,
            url,
            product.images.len(),
            product
                .price
                .map_or_else(|| "unknown".to_string(), |price| price.to_string())
        );
        Ok(product)
    }

    fn marketplace(&self) -> &str {
        "Mercado Libre"
    }
}
