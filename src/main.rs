// SPDX-License-Identifier: MIT

//! PR Tracker API server.
//!
//! Backend-for-frontend for the running personal record tracker: proxies
//! profile, record and avatar operations to the managed provider on
//! behalf of the signed-in user.

use pr_tracker::{
    config::Config,
    db::TableStore,
    services::{AuthClient, StorageClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting PR Tracker API");

    // Initialize provider clients
    let db = TableStore::new(&config);
    let auth = AuthClient::new(&config);
    let storage = StorageClient::new(&config);
    tracing::info!(
        provider = %config.provider_url,
        bucket = %config.avatar_bucket,
        "Provider clients initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        auth,
        storage,
    });

    // Build router
    let app = pr_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pr_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
