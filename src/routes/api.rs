// SPDX-License-Identifier: MIT

//! Transport activity endpoints.
//!
//! Handlers are thin: they translate HTTP requests into controller calls and
//! controller results into HTTP responses. Identity is resolved by the auth
//! middleware (applied in routes/mod.rs) before any handler runs.

use crate::error::Result;
use crate::middleware::Identity;
use crate::models::TransportActivity;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Transport activity routes. Auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/transport-activity", post(create).get(list))
        .route("/api/transport-activity/import", post(import))
        .route(
            "/api/transport-activity/{id}",
            get(details).put(update).delete(delete),
        )
}

/// POST /api/transport-activity
async fn create(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse> {
    let activity = state.controller.create(&identity, &payload).await?;
    let location = format!("/api/transport-activity/{}", activity.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(activity),
    ))
}

/// GET /api/transport-activity
async fn list(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>> {
    let query = json!(query);
    let items = state.controller.list(&identity, &query).await?;
    Ok(Json(items))
}

/// GET /api/transport-activity/:id
async fn details(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<TransportActivity>> {
    let activity = state
        .controller
        .details(&identity, &json!({ "id": id }))
        .await?;
    Ok(Json(activity))
}

/// PUT /api/transport-activity/:id
///
/// The path id wins over any id in the body, matching the
/// params-then-body merge order of the API contract.
async fn update(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(mut payload): Json<Value>,
) -> Result<Json<TransportActivity>> {
    if let Value::Object(body) = &mut payload {
        body.insert("id".to_string(), Value::String(id));
    }
    let activity = state.controller.update(&identity, &payload).await?;
    Ok(Json(activity))
}

/// DELETE /api/transport-activity/:id
async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .controller
        .delete(&identity, &json!({ "id": id }))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Import response message.
#[derive(Serialize)]
pub struct ImportResponse {
    pub message: String,
}

/// POST /api/transport-activity/import
async fn import(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<Value>,
) -> Result<Json<ImportResponse>> {
    let imported = state.controller.import(&identity, &payload).await?;
    Ok(Json(ImportResponse {
        message: format!("Imported {} transport activities.", imported),
    }))
}
