// SPDX-License-Identifier: MIT

//! HTTP route handlers.

pub mod api;

use crate::config::AuthMode;
use crate::middleware::auth::{naive_auth, require_bearer};
use crate::AppState;
use axum::extract::Query;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(Deserialize)]
struct GreetingQuery {
    name: Option<String>,
}

/// Friendly landing response, handy as a smoke check.
async fn root(Query(query): Query<GreetingQuery>) -> String {
    format!("Hello {}!", query.name.as_deref().unwrap_or("World"))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no identity required)
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check));

    // Activity routes get the configured identity resolver. The naive
    // resolver never rejects (the controller answers 401); bearer rejects
    // invalid tokens before any handler runs.
    let activity_routes = match state.config.auth_mode {
        AuthMode::Naive => api::routes().route_layer(middleware::from_fn(naive_auth)),
        AuthMode::Bearer => {
            api::routes().route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        }
    };

    Router::new()
        .merge(public_routes)
        .merge(activity_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
