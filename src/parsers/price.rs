use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static NON_PRICE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9.,]")
        .expect("Invalid price cleanup regex")
});

/// Normalize a JSON-LD or meta-tag price into a decimal value.
///
/// Numbers pass through as long as they are finite and non-negative.
/// Strings go through [`parse_price_text`]. Anything else yields `None`.
pub fn normalize_price(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(number) => number
            .as_f64()
            .filter(|price| price.is_finite() && *price >= 0.0),
        Value::String(text) => parse_price_text(text),
        _ => None,
    }
}

/// Parse a price string using dot as thousands separator and comma as decimal separator.
///
/// `"$ 1.234,56"` becomes `1234.56`. Plain decimal-point strings such as
/// `"99.99"` are read under the same convention and become `9999`.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned = NON_PRICE_CHARS.replace_all(text, "");
    if cleaned.is_empty() {
        return None;
    }

    let normalized = cleaned.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn thousands_dot_and_decimal_comma() {
        assert_eq!(parse_price_text("1.234,56"), Some(1234.56));
        assert_eq!(parse_price_text("$ 12.999"), Some(12999.0));
        assert_eq!(parse_price_text("ARS 45,5"), Some(45.5));
    }

    #[test]
    fn no_digits_yields_nothing() {
        assert_eq!(parse_price_text("no digits"), None);
        assert_eq!(parse_price_text(""), None);
    }

    #[test]
    fn malformed_after_normalization_yields_nothing() {
        assert_eq!(parse_price_text("1,2,3"), None);
        assert_eq!(parse_price_text("."), None);
        assert_eq!(parse_price_text(","), None);
    }

    #[test]
    fn decimal_point_strings_follow_locale_convention() {
        assert_eq!(parse_price_text("99.99"), Some(9999.0));
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(normalize_price(&json!(10.5)), Some(10.5));
        assert_eq!(normalize_price(&json!(0)), Some(0.0));
        assert_eq!(normalize_price(&json!(1500)), Some(1500.0));
    }

    #[test]
    fn negative_numbers_are_rejected() {
        assert_eq!(normalize_price(&json!(-3.0)), None);
    }

    #[test]
    fn other_json_kinds_yield_nothing() {
        assert_eq!(normalize_price(&json!(null)), None);
        assert_eq!(normalize_price(&json!(true)), None);
        assert_eq!(normalize_price(&json!({"value": 10})), None);
        assert_eq!(normalize_price(&json!(["10"])), None);
    }

    #[test]
    fn string_values_are_normalized() {
        assert_eq!(normalize_price(&json!("1.234,56")), Some(1234.56));
        assert_eq!(normalize_price(&json!("gratis")), None);
    }
}
