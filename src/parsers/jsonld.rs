//! JSON-LD handling: locating `<script type="application/ld+json">` blocks,
//! parsing them with one recovery pass, and finding the first `Product` node.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

/// Deepest object/array nesting the product search will descend into.
pub const MAX_TRAVERSAL_DEPTH: usize = 64;

static JSON_LD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<script\b[^>]*?\stype\s*=\s*["']?application/ld\+json(?:["'\s][^>]*)?>(.*?)</script\s*>"#,
    )
    .expect("Invalid JSON-LD regex")
});

/// Inner text of every JSON-LD script block, in document order.
pub fn locate_candidates(html: &str) -> Vec<String> {
    JSON_LD_REGEX
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parse one candidate payload, retrying once with newlines and tabs flattened.
///
/// Returns `None` for blank payloads and for payloads that fail both attempts.
pub fn parse_payload(payload: &str) -> Option<Value> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    // Raw control characters inside string literals are the usual culprit
    let flattened = trimmed.replace(|c: char| matches!(c, '\n' | '\r' | '\t'), " ");
    match serde_json::from_str::<Value>(&flattened) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Discarding unparseable JSON-LD block");
            None
        }
    }
}

#[derive(Debug)]
struct DepthExceeded;

/// Depth-first search for the first object whose `@type` names `Product`.
///
/// Objects are tested before their children, and children are visited in
/// document order. Nesting beyond [`MAX_TRAVERSAL_DEPTH`] abandons the search.
pub fn find_product_node(root: &Value) -> Option<&Map<String, Value>> {
    match search(root, 0) {
        Ok(found) => found,
        Err(DepthExceeded) => {
            debug!(
                max_depth = MAX_TRAVERSAL_DEPTH,
                "JSON-LD nesting too deep, skipping candidate"
            );
            None
        }
    }
}

/// First product node across candidates, scanned in order.
pub fn resolve_product_node(candidates: &[Value]) -> Option<&Map<String, Value>> {
    candidates.iter().find_map(find_product_node)
}

fn search(value: &Value, depth: usize) -> Result<Option<&Map<String, Value>>, DepthExceeded> {
    match value {
        Value::Array(items) => {
            if depth >= MAX_TRAVERSAL_DEPTH {
                return Err(DepthExceeded);
            }
            for item in items {
                if let Some(found) = search(item, depth + 1)? {
                    return Ok(Some(found));
                }
            }
            Ok(None)
        }
        Value::Object(map) => {
            if depth >= MAX_TRAVERSAL_DEPTH {
                return Err(DepthExceeded);
            }
            if map.get("@type").is_some_and(names_product) {
                return Ok(Some(map));
            }
            for child in map.values() {
                if let Some(found) = search(child, depth + 1)? {
                    return Ok(Some(found));
                }
            }
            Ok(None)
        }
        _ => Ok(None),
    }
}

/// `@type` may be a single string or a list; non-string entries are ignored.
fn names_product(type_value: &Value) -> bool {
    match type_value {
        Value::String(kind) => kind.eq_ignore_ascii_case("product"),
        Value::Array(kinds) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| kind.eq_ignore_ascii_case("product")),
        _ => false,
    }
}
