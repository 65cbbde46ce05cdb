//! Storage adapter abstraction for persisted snapshots.
//!
//! An adapter moves one opaque snapshot payload between the store and its
//! resting place. Implementations decide where the bytes live (a file on
//! disk, a slot in process memory); the binding layered on top decides what
//! the bytes mean.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::StoreResult;

/// Byte-level access to one persisted snapshot unit.
///
/// # Atomicity
///
/// Durable implementations must make [`write`](SnapshotAdapter::write)
/// all-or-nothing: a crash mid-write leaves the previous payload intact and
/// a subsequent [`read`](SnapshotAdapter::read) never observes a partial
/// payload.
#[async_trait]
pub trait SnapshotAdapter: Send + Sync + Debug {
    /// Reads the current payload, or `None` if nothing was ever written
    /// (e.g. the backing file does not exist yet).
    async fn read(&self) -> StoreResult<Option<Vec<u8>>>;

    /// Replaces the payload wholesale.
    async fn write(&self, bytes: &[u8]) -> StoreResult<()>;
}
