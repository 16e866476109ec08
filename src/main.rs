// SPDX-License-Identifier: MIT

//! Transport-Tracker API Server
//!
//! Records and retrieves per-user transport activity records (trips with
//! distance, fuel, and CO2-emission data).

use std::sync::Arc;
use transport_tracker::{
    config::{AuthMode, Config, StorageBackend},
    db::{FirestoreStore, InMemoryStore, SharedStore},
    services::TransportActivityController,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Transport-Tracker API");

    match config.auth_mode {
        AuthMode::Naive => {
            tracing::warn!("Using authentication: naive header trust (UNSAFE, local use only)")
        }
        AuthMode::Bearer => tracing::info!("Using authentication: bearer token"),
    }

    // Initialize the configured storage backend
    let store: SharedStore = match config.storage {
        StorageBackend::Memory => {
            tracing::info!("Using storage: in-memory (nothing survives a restart)");
            Arc::new(InMemoryStore::new())
        }
        StorageBackend::Firestore => {
            let store = FirestoreStore::new(&config.gcp_project_id)
                .await
                .expect("Failed to connect to Firestore");
            Arc::new(store)
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        controller: TransportActivityController::new(store),
    });

    // Build router
    let app = transport_tracker::routes::create_router(state);

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
                .add_directive("transport_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
