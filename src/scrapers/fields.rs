//! Per-field source chain: each product field is looked up in the JSON-LD
//! product node first and in the social-preview meta tags second.

use serde_json::{Map, Value};
use tracing::debug;

use crate::parsers::{normalize_price, parse_price_text, HtmlScanner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    StructuredData,
    MetaTag,
}

impl FieldSource {
    pub const CHAIN: [FieldSource; 2] = [FieldSource::StructuredData, FieldSource::MetaTag];
}

const META_TITLE: &str = "og:title";
const META_DESCRIPTION: &str = "og:description";
const META_IMAGE: &str = "og:image";
const META_PRICE_AMOUNT: [&str; 2] = ["og:price:amount", "product:price:amount"];
const META_PRICE_CURRENCY: [&str; 2] = ["og:price:currency", "product:price:currency"];

/// Price together with the currency reported by the same source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Offer {
    pub price: f64,
    pub currency: Option<String>,
}

/// Everything a field lookup may read from one fetched page.
pub(crate) struct PageSources<'a> {
    pub html: &'a str,
    pub product_node: Option<&'a Map<String, Value>>,
    pub scanner: &'a dyn HtmlScanner,
}

impl PageSources<'_> {
    /// First value produced along [`FieldSource::CHAIN`].
    pub fn resolve<T>(
        &self,
        field: &str,
        lookup: impl Fn(&Self, FieldSource) -> Option<T>,
    ) -> Option<T> {
        FieldSource::CHAIN.iter().find_map(|&source| {
            let value = lookup(self, source)?;
            debug!(field, ?source, "Field resolved");
            Some(value)
        })
    }

    pub fn name(&self, source: FieldSource) -> Option<String> {
        match source {
            FieldSource::StructuredData => self.node_text("name"),
            FieldSource::MetaTag => self.meta_text(META_TITLE),
        }
    }

    pub fn description(&self, source: FieldSource) -> Option<String> {
        match source {
            FieldSource::StructuredData => self.node_text("description"),
            FieldSource::MetaTag => self.meta_text(META_DESCRIPTION),
        }
    }

    /// Non-empty image list, or `None` so the next source is tried.
    pub fn images(&self, source: FieldSource) -> Option<Vec<String>> {
        let images: Vec<String> = match source {
            FieldSource::StructuredData => match self.product_node?.get("image")? {
                Value::String(url) => vec![url.clone()],
                Value::Array(entries) => entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                _ => Vec::new(),
            },
            FieldSource::MetaTag => self.meta_text(META_IMAGE).into_iter().collect(),
        };

        let images: Vec<String> = images.into_iter().filter(|url| !url.is_empty()).collect();
        (!images.is_empty()).then_some(images)
    }

    pub fn offer(&self, source: FieldSource) -> Option<Offer> {
        match source {
            FieldSource::StructuredData => self.structured_offer(),
            FieldSource::MetaTag => {
                let price = META_PRICE_AMOUNT
                    .iter()
                    .filter_map(|key| self.scanner.meta_content(self.html, key))
                    .find_map(|raw| parse_price_text(&raw))?;
                let currency = META_PRICE_CURRENCY
                    .iter()
                    .find_map(|key| self.meta_text(key));
                Some(Offer { price, currency })
            }
        }
    }

    /// First offer whose `price` normalizes; `offers` may be one object or a list.
    fn structured_offer(&self) -> Option<Offer> {
        let offers: Vec<&Value> = match self.product_node?.get("offers")? {
            Value::Array(items) => items.iter().collect(),
            single @ Value::Object(_) => vec![single],
            _ => return None,
        };

        offers
            .into_iter()
            .filter_map(Value::as_object)
            .find_map(|offer| {
                let price = normalize_price(offer.get("price")?)?;
                let currency = offer
                    .get("priceCurrency")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(Offer { price, currency })
            })
    }

    fn node_text(&self, key: &str) -> Option<String> {
        self.product_node?
            .get(key)?
            .as_str()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    }

    fn meta_text(&self, key: &str) -> Option<String> {
        self.scanner
            .meta_content(self.html, key)
            .filter(|text| !text.trim().is_empty())
    }
}
