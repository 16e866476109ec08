// SPDX-License-Identifier: MIT

//! Storage layer for transport activities.
//!
//! Two interchangeable backends implement [`TransportActivityStore`]: an
//! in-memory store for tests/local use and a Firestore-backed store for
//! production. Both apply the same filter semantics, which is what lets the
//! in-memory store stand in for the document store in tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::InMemoryStore;

use crate::error::AppError;
use crate::models::TransportActivity;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const TRANSPORT_ACTIVITIES: &str = "transport_activities";
}

/// Filter for listing activities.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Owner equality filter
    pub created_by: Option<String>,
    /// Only activities strictly after this instant
    pub date_after: Option<DateTime<Utc>>,
}

/// Storage contract for transport activities.
///
/// The store enforces no ownership rules; the controller does. `save` is an
/// upsert keyed by `id`.
#[async_trait]
pub trait TransportActivityStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<TransportActivity>, AppError>;
    async fn list(&self, filter: &ListFilter) -> Result<Vec<TransportActivity>, AppError>;
    async fn save(&self, activity: &TransportActivity) -> Result<TransportActivity, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Shared handle to whichever backend was configured at startup.
pub type SharedStore = Arc<dyn TransportActivityStore>;
