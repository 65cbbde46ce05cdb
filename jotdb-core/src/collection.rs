//! Collection and record types.
//!
//! A record is a schema-less JSON object carrying its unique identifier in
//! the [`ID_FIELD`] attribute. A collection maps identifiers to records; key
//! uniqueness is the core invariant. Insertion order carries no meaning, the
//! ordered map just keeps persisted snapshots deterministic.

use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// The record attribute holding the primary key.
pub const ID_FIELD: &str = "_id";

/// The full keyed set of records owned by one store instance.
pub type Collection = BTreeMap<String, Value>;

/// Returns the record's identifier, if it carries a non-empty string one.
pub fn record_id(record: &Value) -> Option<&str> {
    record
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// Ensures the record carries a usable identifier, assigning a fresh uuid v4
/// when it is absent, empty, or not a string. Returns the effective id.
///
/// # Errors
///
/// Returns [`StoreError::InvalidRecord`] if the value is not a JSON object.
pub fn stamp_id(record: &mut Value) -> StoreResult<String> {
    let map = record
        .as_object_mut()
        .ok_or_else(|| StoreError::InvalidRecord("record must be a JSON object".to_string()))?;

    let id = match map.get(ID_FIELD).and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            let id = Uuid::new_v4().to_string();
            map.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            id
        }
    };

    Ok(id)
}

/// Overwrites the record's identifier with `id`, guarding against a caller
/// (typically a `modify` transform) having changed or dropped it.
///
/// # Errors
///
/// Returns [`StoreError::InvalidRecord`] if the value is not a JSON object.
pub fn restamp_id(record: &mut Value, id: &str) -> StoreResult<()> {
    let map = record
        .as_object_mut()
        .ok_or_else(|| StoreError::InvalidRecord("record must be a JSON object".to_string()))?;

    map.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

    Ok(())
}
