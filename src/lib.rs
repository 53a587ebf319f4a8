//! Product data extraction for Mercado Libre item pages.
//!
//! A page is fetched once, JSON-LD `Product` data is preferred field by
//! field, and social-preview meta tags fill whatever is still missing.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod utils;

pub use config::Config;
pub use error::ExtractError;
pub use models::Product;
pub use scrapers::{MercadoLibreScraper, ProductScraper};
