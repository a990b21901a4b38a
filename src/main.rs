use std::sync::Arc;

use anyhow::{Context, Result};
use storefront_rust::{config::Config, router::create_app_router, state::AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; credentials are required
    let config = Arc::new(Config::from_env().context("loading configuration")?);

    // Initialize application state
    let state = Arc::new(AppState::from_config(config.clone()).context("building ERP client")?);

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr = config.listen_addr();
    info!(%addr, erp = %config.erp_base_url, "storefront backend listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}
