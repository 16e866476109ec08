// SPDX-License-Identifier: MIT

//! Firestore-backed transport activity store.
//!
//! Documents mirror the entity fields 1:1, keyed by the activity `id`.

use crate::db::{collections, ListFilter, TransportActivityStore};
use crate::error::AppError;
use crate::models::{datetime_millis, TransportActivity};
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreStore {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

#[async_trait]
impl TransportActivityStore for FirestoreStore {
    async fn get(&self, id: &str) -> Result<Option<TransportActivity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TRANSPORT_ACTIVITIES)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<TransportActivity>, AppError> {
        let created_by = filter.created_by.clone();
        // Dates are stored as fixed-precision RFC3339 strings (see
        // models::datetime_millis), so Firestore's lexicographic string
        // comparison matches chronological order. The bound must be rendered
        // at the same precision.
        let date_after = filter.date_after.map(|d| datetime_millis::to_wire(&d));

        self.get_client()?
            .fluent()
            .select()
            .from(collections::TRANSPORT_ACTIVITIES)
            .filter(move |q| {
                let mut clauses = Vec::new();
                if let Some(created_by) = created_by.clone() {
                    clauses.push(q.field("createdBy").eq(created_by));
                }
                if let Some(date_after) = date_after.clone() {
                    clauses.push(q.field("date").greater_than(date_after));
                }
                q.for_all(clauses)
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn save(&self, activity: &TransportActivity) -> Result<TransportActivity, AppError> {
        // Load-then-merge rather than a blind overwrite: an existing document
        // keeps its immutable bookkeeping fields even if the caller passed a
        // partially populated entity.
        let existing: Option<TransportActivity> = self.get(&activity.id).await?;

        let merged = match existing {
            Some(stored) => {
                let mut merged = activity.clone();
                merged.id = stored.id;
                merged.created_by = stored.created_by;
                merged.created_at = stored.created_at;
                merged
            }
            None => activity.clone(),
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TRANSPORT_ACTIVITIES)
            .document_id(&merged.id)
            .object(&merged)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(merged)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TRANSPORT_ACTIVITIES)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
