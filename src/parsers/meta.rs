use regex::Regex;

use super::decode_entities;

const KEY_ATTRIBUTES: [&str; 2] = ["property", "name"];
const ATTR_VALUE: &str = r#"(?:"([^"]*)"|'([^']*)')"#;

/// Value of the `content` attribute of the first `<meta>` tag keyed by `key`.
///
/// `property="key"` tags take precedence over `name="key"` tags. Matching is
/// case-insensitive and accepts `content` before or after the key attribute.
pub fn extract_meta_content(html: &str, key: &str) -> Option<String> {
    KEY_ATTRIBUTES
        .iter()
        .find_map(|attribute| match_meta(html, attribute, key))
        .map(|raw| decode_entities(&raw))
}

fn match_meta(html: &str, attribute: &str, key: &str) -> Option<String> {
    let key = regex::escape(key);
    let key_attr = format!(r#"\s{attribute}\s*=\s*["']{key}["']"#);
    let content_attr = format!(r"\scontent\s*=\s*{ATTR_VALUE}");

    let key_first = format!(r"(?i)<meta\b[^>]*?{key_attr}[^>]*?{content_attr}[^>]*>");
    let content_first = format!(r"(?i)<meta\b[^>]*?{content_attr}[^>]*?{key_attr}[^>]*>");

    [key_first, content_first].iter().find_map(|pattern| {
        let re = Regex::new(pattern).ok()?;
        // Tags with an empty content attribute do not count as a match
        let found = re.captures_iter(html).find_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        });
        found
    })
}
