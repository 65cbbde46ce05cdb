//! Snapshot serialization for collections.
//!
//! A persisted snapshot is the collection rendered as a JSON sequence of
//! `[identifier, record]` pairs. The pair layout (rather than one big JSON
//! object) keeps the persisted form an explicit ordered sequence whose entry
//! typing survives the textual round trip exactly.

use serde_json::Value;

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};

/// Renders the collection as JSON `[identifier, record]` pairs.
pub fn serialize(data: &Collection) -> StoreResult<Vec<u8>> {
    let pairs: Vec<(&String, &Value)> = data.iter().collect();

    Ok(serde_json::to_vec(&pairs)?)
}

/// Parses a persisted snapshot back into a collection.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] when the payload is not a valid pair
/// sequence. Corruption is distinct from absence; callers decide how loudly
/// to fail, but parsing never silently yields an empty collection.
pub fn parse(bytes: &[u8]) -> StoreResult<Collection> {
    let pairs: Vec<(String, Value)> =
        serde_json::from_slice(bytes).map_err(|err| StoreError::Corrupt(err.to_string()))?;

    Ok(pairs.into_iter().collect())
}

/// The empty-state fallback used when no snapshot exists yet.
pub fn empty() -> Collection {
    Collection::new()
}
