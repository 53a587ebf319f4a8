use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use meli_scraper::api::{build_app, AppState};
use meli_scraper::utils::http::create_client;
use meli_scraper::{Config, MercadoLibreScraper};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Arc::new(Config::load()?);

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!("Starting Mercado Libre product extractor");

    // Initialize HTTP client with connection pooling
    let client = create_client(&config)?;
    let scraper = Arc::new(MercadoLibreScraper::new(config.clone()));

    let app = build_app(AppState { client, scraper });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, stopping");
}
