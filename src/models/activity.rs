// SPDX-License-Identifier: MIT

//! Transport activity model for storage and API.
//!
//! The wire shape (camelCase JSON) mirrors the stored document 1:1. Dates
//! are serialized at fixed millisecond precision so the stored strings
//! compare lexicographically in chronological order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed-precision RFC 3339 date serialization.
///
/// Chrono's default emits variable sub-second precision, which breaks
/// string-ordered range queries (`"...00.500Z" < "...00Z"`). Pinning to
/// milliseconds keeps lexicographic and chronological order identical.
pub mod datetime_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn to_wire(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_wire(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        DateTime::deserialize(deserializer)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.serialize_str(&super::to_wire(dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::deserialize(deserializer)
        }
    }
}

/// Fuel used for the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Diesel,
    Gasoline,
}

/// Which set of input fields the client used to derive emission values.
///
/// Derived fields are stored as provided; no server-side recomputation or
/// cross-field consistency check is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalcMode {
    SpecificEmissions,
    SpecificFuel,
    TotalFuel,
}

/// Means of transport for the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    Car,
    Train,
}

/// Train category, only meaningful when `transport_mode` is `Train`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainType {
    Local,
    LongDistance,
}

/// One recorded trip with emissions/fuel data.
///
/// `id` and `created_by` are assigned server-side at creation and never
/// change afterwards. `updated_at` is absent until the first update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportActivity {
    /// Opaque unique ID (also used as document ID)
    pub id: String,
    /// Trip title
    pub title: String,
    /// When the trip took place
    #[serde(with = "datetime_millis")]
    pub date: DateTime<Utc>,
    /// Total CO2 emissions in kg
    pub total_emissions: f64,
    /// Distance in km
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Emissions per km (kg/km)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_emissions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    /// Fuel consumption per 100 km
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_fuel_consumption: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fuel_consumption: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calc_mode: Option<CalcMode>,
    /// Number of persons sharing the trip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persons: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_type: Option<TrainType>,
    /// Seat utilization ratio for shared transport (0..=1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_utilization: Option<f64>,
    /// Owning user ID (never accepted from client input)
    pub created_by: String,
    #[serde(with = "datetime_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(
        with = "datetime_millis::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransportActivity {
        TransportActivity {
            id: "a-1".to_string(),
            title: "Car drive".to_string(),
            date: "2024-05-01T10:00:00Z".parse().unwrap(),
            total_emissions: 12.5,
            distance: Some(100.0),
            specific_emissions: Some(0.125),
            fuel_type: Some(FuelType::Diesel),
            specific_fuel_consumption: None,
            total_fuel_consumption: None,
            calc_mode: Some(CalcMode::SpecificEmissions),
            persons: Some(2),
            transport_mode: Some(TransportMode::Car),
            train_type: None,
            capacity_utilization: None,
            created_by: "user-1".to_string(),
            created_at: "2024-05-01T10:05:00Z".parse().unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["totalEmissions"], 12.5);
        assert_eq!(json["fuelType"], "Diesel");
        assert_eq!(json["calcMode"], "SpecificEmissions");
        assert_eq!(json["createdBy"], "user-1");
        // Absent optionals are omitted entirely, not serialized as null
        assert!(json.get("updatedAt").is_none());
        assert!(json.get("trainType").is_none());
    }

    #[test]
    fn test_dates_serialize_at_fixed_millisecond_precision() {
        let mut activity = sample();
        activity.date = "2024-05-01T10:00:00.500Z".parse().unwrap();

        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["date"], "2024-05-01T10:00:00.500Z");
        assert_eq!(json["createdAt"], "2024-05-01T10:05:00.000Z");

        // A sub-second date must sort after a whole-second lower bound when
        // both are rendered at the same precision (string-ordered range
        // queries rely on this).
        let bound = datetime_millis::to_wire(&"2024-05-01T10:00:00Z".parse().unwrap());
        assert!(json["date"].as_str().unwrap() > bound.as_str());
    }

    #[test]
    fn test_round_trips_through_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: TransportActivity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "a-1");
        assert_eq!(back.persons, Some(2));
        assert_eq!(back.fuel_type, Some(FuelType::Diesel));
        assert!(back.updated_at.is_none());
    }
}
