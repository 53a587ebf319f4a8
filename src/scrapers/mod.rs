use async_trait::async_trait;
use reqwest::Client;

use crate::error::ExtractError;
use crate::models::Product;

mod fields;
mod mercado_libre;

pub use fields::FieldSource;
pub use mercado_libre::MercadoLibreScraper;

#[async_trait]
pub trait ProductScraper: Send + Sync {
    /// Validate `url`, fetch it once and extract a [`Product`].
    async fn scrape(&self, client: &Client, url: &str) -> Result<Product, ExtractError>;
    fn marketplace(&self) -> &str;
}
