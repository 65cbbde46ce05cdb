//! Error types and result types for store operations.
//!
//! Use [`StoreResult<T>`] as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a store.
///
/// This enum covers construction-time configuration problems, snapshot
/// persistence failures, and record-level validation issues. Missing records
/// are never an error; lookups return `None` instead.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Invalid construction input (e.g. an empty or whitespace-only store name).
    /// Fatal to construction; never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The underlying snapshot storage failed to read or write (permission
    /// denied, disk full, missing directory).
    #[error("Persistence error: {0}")]
    Persistence(String),
    /// A persisted snapshot exists but could not be parsed. Corruption is
    /// reported loudly rather than being treated as an absent snapshot.
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
    /// Serialization/deserialization error while converting a collection to
    /// or from its persisted form.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The value handed to a mutating operation is not a JSON object.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// A specialized `Result` type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<IoError> for StoreError {
    fn from(err: IoError) -> Self {
        StoreError::Persistence(err.to_string())
    }
}
