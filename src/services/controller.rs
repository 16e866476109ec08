// SPDX-License-Identifier: MIT

//! Transport activity controller.
//!
//! One operation per use case, each shaped the same way:
//! authorize -> validate -> business-rule check -> act -> respond.
//! Status precedence is fixed: 401 -> 400 -> 404 -> 403 -> success.
//!
//! Authentication is resolved by the transport layer; operations receive a
//! pre-resolved [`Identity`] and never inspect credentials themselves.

use crate::db::{ListFilter, SharedStore};
use crate::error::{AppError, Result};
use crate::middleware::auth::Identity;
use crate::models::{CalcMode, FuelType, TrainType, TransportActivity, TransportMode};
use crate::services::{schemas, validator};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Orchestrates validation, ownership checks, and storage per operation.
pub struct TransportActivityController {
    store: SharedStore,
}

impl TransportActivityController {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Create a new transport activity owned by the caller.
    ///
    /// `id`, `created_by`, and `created_at` are injected server-side and are
    /// never accepted from client input (the schema rejects them outright).
    pub async fn create(&self, identity: &Identity, payload: &Value) -> Result<TransportActivity> {
        let user_id = authorize(identity)?;
        let body: ActivityBody = parse(&schemas::CREATE_BODY, payload)?;

        let activity = body.into_activity(
            Uuid::new_v4().to_string(),
            user_id.to_string(),
            Utc::now(),
            None,
        );

        tracing::info!(id = %activity.id, user = user_id, "Creating transport activity");
        self.store.save(&activity).await
    }

    /// Fetch a single activity by id, owner only.
    pub async fn details(&self, identity: &Identity, params: &Value) -> Result<TransportActivity> {
        let user_id = authorize(identity)?;
        let params: IdParams = parse(&schemas::ID_PARAMS, params)?;

        let activity = self.fetch_owned(&params.id, user_id).await?;
        Ok(activity)
    }

    /// List the caller's activities, optionally filtered, sorted by date,
    /// and projected to the requested fields.
    pub async fn list(&self, identity: &Identity, query: &Value) -> Result<Vec<Value>> {
        let user_id = authorize(identity)?;
        let query: ListQuery = parse(&schemas::LIST_QUERY, query)?;

        let filter = ListFilter {
            created_by: Some(user_id.to_string()),
            date_after: query.date_after,
        };
        let mut activities = self.store.list(&filter).await?;

        // Only date sort is supported, ascending by default.
        activities.sort_by_key(|a| a.date);
        if query.sort_direction.as_deref() == Some("DESC") {
            activities.reverse();
        }

        Ok(activities
            .iter()
            .map(|activity| query.project(activity))
            .collect())
    }

    /// Full replacement of every mutable field; stamps `updated_at`.
    pub async fn update(&self, identity: &Identity, payload: &Value) -> Result<TransportActivity> {
        let user_id = authorize(identity)?;
        let body: UpdateBody = parse(&schemas::UPDATE_BODY, payload)?;

        let existing = self.fetch_owned(&body.id, user_id).await?;

        let updated = body.activity.into_activity(
            existing.id,
            existing.created_by,
            existing.created_at,
            Some(Utc::now()),
        );

        tracing::info!(id = %updated.id, user = user_id, "Updating transport activity");
        self.store.save(&updated).await
    }

    /// Delete an activity by id, owner only.
    pub async fn delete(&self, identity: &Identity, params: &Value) -> Result<()> {
        let user_id = authorize(identity)?;
        let params: IdParams = parse(&schemas::ID_PARAMS, params)?;

        self.fetch_owned(&params.id, user_id).await?;

        tracing::info!(id = %params.id, user = user_id, "Deleting transport activity");
        self.store.delete(&params.id).await
    }

    /// Import an array of legacy-format records.
    ///
    /// Records not owned by the caller are silently dropped. Survivors are
    /// saved sequentially with no rollback: a persistence failure partway
    /// leaves the already-saved records in place.
    pub async fn import(&self, identity: &Identity, payload: &Value) -> Result<usize> {
        let user_id = authorize(identity)?;
        let records: Vec<LegacyRecord> = parse(&schemas::IMPORT_BODY, payload)?;

        let total = records.len();
        let mut imported = 0;
        for record in records
            .into_iter()
            .filter(|record| record.created_by == user_id)
        {
            self.store.save(&record.into_activity()).await?;
            imported += 1;
        }

        tracing::info!(user = user_id, imported, total, "Imported transport activities");
        Ok(imported)
    }

    /// Fetch an activity, mapping absence to 404 and foreign ownership to
    /// 403 (in that order).
    async fn fetch_owned(&self, id: &str, user_id: &str) -> Result<TransportActivity> {
        let activity = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transport activity {} not found", id)))?;

        if activity.created_by != user_id {
            return Err(AppError::Forbidden(
                "Transport activity belongs to another user".to_string(),
            ));
        }

        Ok(activity)
    }
}

/// 401 carries the authenticator's error code when one was recorded.
fn authorize(identity: &Identity) -> Result<&str> {
    identity
        .user_id
        .as_deref()
        .ok_or(AppError::Unauthorized(identity.error))
}

/// Validate against a schema, then deserialize into the typed body.
fn parse<T: DeserializeOwned>(schema: &jsonschema::Validator, payload: &Value) -> Result<T> {
    validator::validate(schema, payload).map_err(AppError::Validation)?;
    serde_json::from_value(payload.clone())
        .map_err(|e| AppError::BadRequest(format!("Malformed payload: {}", e)))
}

/// The mutable fields shared by create and update payloads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityBody {
    title: String,
    date: DateTime<Utc>,
    total_emissions: f64,
    distance: Option<f64>,
    specific_emissions: Option<f64>,
    fuel_type: Option<FuelType>,
    specific_fuel_consumption: Option<f64>,
    total_fuel_consumption: Option<f64>,
    calc_mode: Option<CalcMode>,
    persons: Option<u32>,
    transport_mode: Option<TransportMode>,
    train_type: Option<TrainType>,
    capacity_utilization: Option<f64>,
}

impl ActivityBody {
    fn into_activity(
        self,
        id: String,
        created_by: String,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> TransportActivity {
        TransportActivity {
            id,
            title: self.title,
            date: self.date,
            total_emissions: self.total_emissions,
            distance: self.distance,
            specific_emissions: self.specific_emissions,
            fuel_type: self.fuel_type,
            specific_fuel_consumption: self.specific_fuel_consumption,
            total_fuel_consumption: self.total_fuel_consumption,
            calc_mode: self.calc_mode,
            persons: self.persons,
            transport_mode: self.transport_mode,
            train_type: self.train_type,
            capacity_utilization: self.capacity_utilization,
            created_by,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdParams {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UpdateBody {
    id: String,
    #[serde(flatten)]
    activity: ActivityBody,
}

/// Optional filter/projection parameters for `list`.
///
/// Query values arrive as strings: each projection flag is the literal
/// string "true" to request inclusion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    title: Option<String>,
    total_emissions: Option<String>,
    date: Option<String>,
    date_after: Option<DateTime<Utc>>,
    #[allow(dead_code)]
    sort_by: Option<String>,
    sort_direction: Option<String>,
}

impl ListQuery {
    /// Project an activity to `{id}` plus the requested optional fields.
    fn project(&self, activity: &TransportActivity) -> Value {
        let mut item = Map::new();
        item.insert("id".to_string(), Value::String(activity.id.clone()));
        if self.title.as_deref() == Some("true") {
            item.insert("title".to_string(), Value::String(activity.title.clone()));
        }
        if self.total_emissions.as_deref() == Some("true") {
            item.insert(
                "totalEmissions".to_string(),
                serde_json::json!(activity.total_emissions),
            );
        }
        if self.date.as_deref() == Some("true") {
            item.insert(
                "date".to_string(),
                Value::String(crate::models::datetime_millis::to_wire(&activity.date)),
            );
        }
        Value::Object(item)
    }
}

/// Legacy export record: dates are wrapped in a `{"$date": ...}` envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyRecord {
    id: String,
    title: String,
    date: DateEnvelope,
    total_emissions: f64,
    distance: Option<f64>,
    specific_emissions: Option<f64>,
    fuel_type: Option<FuelType>,
    specific_fuel_consumption: Option<f64>,
    total_fuel_consumption: Option<f64>,
    calc_mode: Option<CalcMode>,
    persons: Option<u32>,
    transport_mode: Option<TransportMode>,
    train_type: Option<TrainType>,
    capacity_utilization: Option<f64>,
    created_by: String,
    created_at: DateEnvelope,
    updated_at: Option<DateEnvelope>,
}

#[derive(Debug, Deserialize)]
struct DateEnvelope {
    #[serde(rename = "$date")]
    date: DateTime<Utc>,
}

impl LegacyRecord {
    /// Legacy records keep their ids; save is an upsert.
    fn into_activity(self) -> TransportActivity {
        TransportActivity {
            id: self.id,
            title: self.title,
            date: self.date.date,
            total_emissions: self.total_emissions,
            distance: self.distance,
            specific_emissions: self.specific_emissions,
            fuel_type: self.fuel_type,
            specific_fuel_consumption: self.specific_fuel_consumption,
            total_fuel_consumption: self.total_fuel_consumption,
            calc_mode: self.calc_mode,
            persons: self.persons,
            transport_mode: self.transport_mode,
            train_type: self.train_type,
            capacity_utilization: self.capacity_utilization,
            created_by: self.created_by,
            created_at: self.created_at.date,
            updated_at: self.updated_at.map(|e| e.date),
        }
    }
}
