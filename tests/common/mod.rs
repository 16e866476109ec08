// SPDX-License-Identifier: MIT

use std::sync::Arc;
use transport_tracker::config::{AuthMode, Config};
use transport_tracker::db::InMemoryStore;
use transport_tracker::routes::create_router;
use transport_tracker::services::TransportActivityController;
use transport_tracker::AppState;

/// Create a test app with naive header-trust auth and an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_app_with_mode(AuthMode::Naive)
}

/// Create a test app with bearer-token auth and an in-memory store.
#[allow(dead_code)]
pub fn create_bearer_test_app() -> (axum::Router, Arc<AppState>) {
    create_app_with_mode(AuthMode::Bearer)
}

fn create_app_with_mode(auth_mode: AuthMode) -> (axum::Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.auth_mode = auth_mode;

    let store = Arc::new(InMemoryStore::new());
    let state = Arc::new(AppState {
        config,
        controller: TransportActivityController::new(store),
    });

    (create_router(state.clone()), state)
}

/// Create a test JWT for bearer-mode tests.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    transport_tracker::middleware::auth::create_jwt(user_id, signing_key)
        .expect("test JWT should encode")
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&body).expect("body should be JSON")
}
