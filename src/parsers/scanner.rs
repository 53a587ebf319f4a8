use scraper::{Html, Selector};

use super::{jsonld, meta};
use crate::config::ScannerKind;

/// Raw-HTML lookups the extraction pipeline needs.
///
/// Kept narrow so the pattern-based scanning can be swapped for a markup
/// parser without touching the rest of the pipeline.
pub trait HtmlScanner: Send + Sync {
    /// Inner text of each JSON-LD script block, in document order.
    fn jsonld_candidates(&self, html: &str) -> Vec<String>;

    /// Decoded `content` of the meta tag keyed by `key`, if any.
    fn meta_content(&self, html: &str, key: &str) -> Option<String>;

    fn label(&self) -> &'static str;
}

pub fn scanner_for(kind: ScannerKind) -> Box<dyn HtmlScanner> {
    match kind {
        ScannerKind::Pattern => Box::new(PatternScanner),
        ScannerKind::Dom => Box::new(DomScanner),
    }
}

/// Regex scanning over the raw text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternScanner;

impl HtmlScanner for PatternScanner {
    fn jsonld_candidates(&self, html: &str) -> Vec<String> {
        jsonld::locate_candidates(html)
    }

    fn meta_content(&self, html: &str, key: &str) -> Option<String> {
        meta::extract_meta_content(html, key)
    }

    fn label(&self) -> &'static str {
        "pattern"
    }
}

/// Full HTML5 parse via `scraper`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomScanner;

impl HtmlScanner for DomScanner {
    fn jsonld_candidates(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let Ok(script_selector) = Selector::parse("script[type]") else {
            return Vec::new();
        };

        document
            .select(&script_selector)
            .filter(|script| {
                script
                    .value()
                    .attr("type")
                    .is_some_and(|kind| kind.trim().eq_ignore_ascii_case("application/ld+json"))
            })
            .map(|script| script.text().collect::<String>())
            .collect()
    }

    fn meta_content(&self, html: &str, key: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let meta_selector = Selector::parse("meta[content]").ok()?;

        // The parser has already decoded entities inside attribute values
        ["property", "name"].iter().find_map(|attribute| {
            document
                .select(&meta_selector)
                .filter(|tag| {
                    tag.value()
                        .attr(attribute)
                        .is_some_and(|value| value.eq_ignore_ascii_case(key))
                })
                .filter_map(|tag| tag.value().attr("content"))
                .find(|content| !content.is_empty())
                .map(str::to_string)
        })
    }

    fn label(&self) -> &'static str {
        "dom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<html><head>
        <meta property="og:title" content="Taladro &amp; Mechas">
        <meta name="og:description" content="Inalámbrico">
        <script type="application/ld+json">{"@type":"Product","name":"Taladro"}</script>
        <script>var x = 1;</script>
        <script type="APPLICATION/LD+JSON">{"@type":"BreadcrumbList"}</script>
        </head><body></body></html>"#;

    #[test]
    fn scanners_agree_on_candidates() {
        let expected = vec![
            r#"{"@type":"Product","name":"Taladro"}"#.to_string(),
            r#"{"@type":"BreadcrumbList"}"#.to_string(),
        ];
        assert_eq!(PatternScanner.jsonld_candidates(PAGE), expected);
        assert_eq!(DomScanner.jsonld_candidates(PAGE), expected);
    }

    #[test]
    fn scanners_agree_on_meta_values() {
        for scanner in [scanner_for(ScannerKind::Pattern), scanner_for(ScannerKind::Dom)] {
            assert_eq!(
                scanner.meta_content(PAGE, "og:title").as_deref(),
                Some("Taladro & Mechas"),
                "scanner {}",
                scanner.label()
            );
            assert_eq!(
                scanner.meta_content(PAGE, "og:description").as_deref(),
                Some("Inalámbrico")
            );
            assert_eq!(scanner.meta_content(PAGE, "og:image"), None);
        }
    }

    #[test]
    fn empty_meta_content_is_skipped_by_both_scanners() {
        let html = r#"<head>
            <meta property="og:title" content="">
            <meta property="og:title" content="Real">
            </head>"#;
        for scanner in [scanner_for(ScannerKind::Pattern), scanner_for(ScannerKind::Dom)] {
            assert_eq!(
                scanner.meta_content(html, "og:title").as_deref(),
                Some("Real"),
                "scanner {}",
                scanner.label()
            );
        }
    }

    #[test]
    fn lookalike_jsonld_type_is_ignored() {
        let html = r#"<script type="application/ld+jsonp">{"a":1}</script>
            <script type="application/ld+json">{"b":2}</script>"#;
        let expected = vec![r#"{"b":2}"#.to_string()];
        assert_eq!(PatternScanner.jsonld_candidates(html), expected);
        assert_eq!(DomScanner.jsonld_candidates(html), expected);
    }
}
