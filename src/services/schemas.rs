// SPDX-License-Identifier: MIT

//! Request schemas for the transport activity API.
//!
//! Compiled once on first use. Format assertions (`date-time`) are enabled
//! explicitly since draft 2020-12 treats `format` as an annotation by
//! default.

use jsonschema::Validator;
use serde_json::{json, Value};
use std::sync::LazyLock;

fn compile(schema: Value) -> Validator {
    jsonschema::options()
        .should_validate_formats(true)
        .build(&schema)
        .expect("request schema is static and must compile")
}

fn activity_properties() -> Value {
    json!({
        "title": { "type": "string" },
        "date": { "type": "string", "format": "date-time" },
        "totalEmissions": { "type": "number" },
        "distance": { "type": "number" },
        "specificEmissions": { "type": "number" },
        "fuelType": { "type": "string", "enum": ["Diesel", "Gasoline"] },
        "specificFuelConsumption": { "type": "number" },
        "totalFuelConsumption": { "type": "number" },
        "calcMode": { "type": "string", "enum": ["SpecificEmissions", "SpecificFuel", "TotalFuel"] },
        "persons": { "type": "integer", "minimum": 0, "maximum": u32::MAX },
        "transportMode": { "type": "string", "enum": ["Car", "Train"] },
        "trainType": { "type": "string", "enum": ["Local", "LongDistance"] },
        "capacityUtilization": { "type": "number" },
    })
}

/// POST /api/transport-activity body.
pub static CREATE_BODY: LazyLock<Validator> = LazyLock::new(|| {
    compile(json!({
        "type": "object",
        "properties": activity_properties(),
        "required": ["title", "date", "totalEmissions"],
        "additionalProperties": false,
    }))
});

/// Path params carrying a record id (details, update, delete).
pub static ID_PARAMS: LazyLock<Validator> = LazyLock::new(|| {
    compile(json!({
        "type": "object",
        "properties": { "id": { "type": "string" } },
        "required": ["id"],
    }))
});

/// GET /api/transport-activity query string.
///
/// Query values arrive as strings, so projection flags are the literal
/// string "true" rather than a boolean.
pub static LIST_QUERY: LazyLock<Validator> = LazyLock::new(|| {
    compile(json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "enum": ["true"] },
            "totalEmissions": { "type": "string", "enum": ["true"] },
            "date": { "type": "string", "enum": ["true"] },
            "dateAfter": { "type": "string", "format": "date-time" },
            "sortBy": { "type": "string", "enum": ["date"] },
            "sortDirection": { "type": "string", "enum": ["ASC", "DESC"] },
        },
        "additionalProperties": false,
    }))
});

/// PUT /api/transport-activity/:id body: a full replacement including `id`.
pub static UPDATE_BODY: LazyLock<Validator> = LazyLock::new(|| {
    let mut properties = activity_properties();
    properties["id"] = json!({ "type": "string" });
    compile(json!({
        "type": "object",
        "properties": properties,
        "required": ["id", "title", "date", "totalEmissions"],
        "additionalProperties": false,
    }))
});

/// POST /api/transport-activity/import body: an array of full legacy-format
/// records, dates wrapped in a `{"$date": ...}` envelope.
pub static IMPORT_BODY: LazyLock<Validator> = LazyLock::new(|| {
    let date_envelope = json!({
        "type": "object",
        "properties": { "$date": { "type": "string", "format": "date-time" } },
        "required": ["$date"],
        "additionalProperties": false,
    });

    let mut properties = activity_properties();
    properties["id"] = json!({ "type": "string" });
    properties["date"] = date_envelope.clone();
    properties["createdBy"] = json!({ "type": "string" });
    properties["createdAt"] = date_envelope.clone();
    properties["updatedAt"] = date_envelope;

    compile(json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": properties,
            "required": ["id", "title", "date", "totalEmissions", "createdBy", "createdAt"],
            "additionalProperties": false,
        },
    }))
});
