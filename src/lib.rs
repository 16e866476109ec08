// SPDX-License-Identifier: MIT

//! Transport-Tracker: record and retrieve per-user transport activities
//! with distance, fuel, and CO2-emission data.
//!
//! This crate provides the backend API: JSON-Schema-validated CRUD plus a
//! legacy import, scoped to the authenticated user, over a swappable
//! storage backend (in-memory or Firestore).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::TransportActivityController;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub controller: TransportActivityController,
}
