use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid product URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch product page (status {status}) from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to fetch product page {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unable to extract product information from Mercado Libre page")]
    ExtractionIncomplete,
}

impl ExtractError {
    /// True when the caller supplied bad input rather than the page or network failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ExtractError::InvalidUrl { .. })
    }

    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ExtractError::HttpStatus { .. } | ExtractError::Network { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_carries_code() {
        let err = ExtractError::HttpStatus {
            status: 404,
            url: "https://articulo.mercadolibre.com.ar/MLA-1".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.is_fetch_error());
        assert!(!err.is_client_error());
    }

    #[test]
    fn invalid_url_is_client_error() {
        let err = ExtractError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.is_client_error());
        assert!(!err.is_fetch_error());
    }
}
