// SPDX-License-Identifier: MIT

//! In-memory store, used by tests and local development.

use crate::db::{ListFilter, TransportActivityStore};
use crate::error::AppError;
use crate::models::TransportActivity;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory transport activity store.
///
/// Nothing survives a process restart. Mutation is serialized through a
/// `tokio::sync::RwLock`.
#[derive(Default)]
pub struct InMemoryStore {
    activities: RwLock<Vec<TransportActivity>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store for tests.
    pub fn with_activities(activities: Vec<TransportActivity>) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }
}

#[async_trait]
impl TransportActivityStore for InMemoryStore {
    async fn get(&self, id: &str) -> Result<Option<TransportActivity>, AppError> {
        let activities = self.activities.read().await;
        Ok(activities.iter().find(|item| item.id == id).cloned())
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<TransportActivity>, AppError> {
        let activities = self.activities.read().await;
        Ok(activities
            .iter()
            .filter(|item| {
                if let Some(created_by) = &filter.created_by {
                    if &item.created_by != created_by {
                        return false;
                    }
                }
                if let Some(date_after) = filter.date_after {
                    if item.date <= date_after {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect())
    }

    async fn save(&self, activity: &TransportActivity) -> Result<TransportActivity, AppError> {
        let mut activities = self.activities.write().await;
        match activities.iter_mut().find(|item| item.id == activity.id) {
            Some(existing) => *existing = activity.clone(),
            None => activities.push(activity.clone()),
        }
        Ok(activity.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut activities = self.activities.write().await;
        activities.retain(|item| item.id != id);
        Ok(())
    }
}
