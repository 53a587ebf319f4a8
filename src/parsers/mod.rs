pub mod jsonld;
pub mod meta;
pub mod price;
pub mod scanner;

pub use jsonld::*;
pub use meta::*;
pub use price::*;
pub use scanner::*;

use html_escape::decode_html_entities;

/// Decode HTML character references (`&amp;`, `&lt;`, `&gt;`, `&quot;`, `&#39;` and friends).
pub fn decode_entities(text: &str) -> String {
    decode_html_entities(text).into_owned()
}
