use url::Url;

use crate::error::ExtractError;

/// Parse `raw` as an absolute http(s) URL whose host contains `domain_marker`.
pub fn validate_product_url(raw: &str, domain_marker: &str) -> Result<Url, ExtractError> {
    let invalid = |reason: String| ExtractError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", parsed.scheme())));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| invalid("URL has no host".to_string()))?;

    if !host
        .to_ascii_lowercase()
        .contains(&domain_marker.to_ascii_lowercase())
    {
        return Err(invalid(format!(
            "Provided URL is not a Mercado Libre product page (host \"{host}\")"
        )));
    }

    Ok(parsed)
}
