use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::ExtractError;
use crate::models::Product;
use crate::scrapers::ProductScraper;

const MISSING_URL: &str = "Missing Mercado Libre URL";

#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub scraper: Arc<dyn ProductScraper>,
}

#[derive(Debug, Deserialize)]
struct ExtractRequest {
    #[serde(default)]
    url: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/mercado-libre", post(extract_product))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

/// Reads the body by hand so malformed JSON gets the same `{"error": ...}` shape.
async fn extract_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProductResponse>, ApiError> {
    let url = serde_json::from_slice::<ExtractRequest>(&body)
        .ok()
        .and_then(|request| request.url)
        .and_then(|url| url.as_str().map(str::to_string))
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, MISSING_URL))?;

    match state.scraper.scrape(&state.client, &url).await {
        Ok(product) => Ok(Json(ProductResponse { product })),
        Err(err) => {
            error!(
                "Failed to scrape {} product {}: {}",
                state.scraper.marketplace(),
                url,
                err
            );
            Err(err.into())
        }
    }
}
