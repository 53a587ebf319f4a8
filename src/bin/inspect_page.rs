//! Dump what the extractor sees on a page: `inspect_page <url | saved.html>`.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use url::Url;

use meli_scraper::parsers::{find_product_node, parse_payload, scanner_for};
use meli_scraper::utils::http::{create_client, fetch_page};
use meli_scraper::{Config, MercadoLibreScraper};

const META_KEYS: [&str; 6] = [
    "og:title",
    "og:description",
    "og:image",
    "og:price:amount",
    "og:price:currency",
    "product:price:amount",
];

#[tokio::main]
async fn main() -> Result<()> {
    let Some(target) = std::env::args().nth(1) else {
        bail!("usage: inspect_page <product-url | path/to/page.html>");
    };

    let config = Arc::new(Config::load()?);
    let scraper = MercadoLibreScraper::new(config.clone());

    let (html, url) = if Path::new(&target).exists() {
        println!("Reading saved page {}...", target);
        let html = fs::read_to_string(&target).with_context(|| format!("Failed to read {}", target))?;
        let url = Url::parse("https://articulo.mercadolibre.com.ar/saved-page")?;
        (html, url)
    } else {
        let url = scraper.validate_url(&target)?;
        println!("Fetching {}...", url);
        let client = create_client(&config)?;
        let html = fetch_page(&client, &url).await?;
        fs::write("inspected_page.html", &html)?;
        (html, url)
    };

    let scanner = scanner_for(config.scanner);
    let candidates = scanner.jsonld_candidates(&html);
    println!("Found {} JSON-LD blocks ({} scanner)", candidates.len(), scanner.label());

    for (idx, candidate) in candidates.iter().enumerate() {
        match parse_payload(candidate) {
            Some(value) => match find_product_node(&value) {
                Some(node) => println!(
                    "  block {}: Product node\n{}",
                    idx,
                    serde_json::to_string_pretty(node)?
                ),
                None => println!("  block {}: parsed, no Product node", idx),
            },
            None => println!("  block {}: unparseable ({} bytes)", idx, candidate.len()),
        }
    }

    println!("\nMeta tags:");
    for key in META_KEYS {
        match scanner.meta_content(&html, key) {
            Some(value) => println!("  {:<22} {}", key, value),
            None => println!("  {:<22} -", key),
        }
    }

    println!("\nExtraction result:");
    match scraper.extract_from_html(&html, &url) {
        Ok(product) => println!("{}", serde_json::to_string_pretty(&product)?),
        Err(e) => println!("  error: {}", e),
    }

    Ok(())
}
