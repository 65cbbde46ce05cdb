//! Persistence binding: one adapter paired with the snapshot serializer.
//!
//! The binding owns the live [`Collection`] it last loaded or was handed.
//! Reads come straight from that held collection; [`SnapshotBinding::write`]
//! serializes it through the adapter. There is deliberately no defensive
//! copying here — the store controller decides who may touch the held data.

use crate::adapter::SnapshotAdapter;
use crate::collection::Collection;
use crate::error::StoreResult;
use crate::snapshot;

/// Typed access to one persisted snapshot: adapter + serializer + held data.
#[derive(Debug)]
pub struct SnapshotBinding<A: SnapshotAdapter> {
    adapter: A,
    data: Collection,
}

impl<A: SnapshotAdapter> SnapshotBinding<A> {
    /// Creates a binding holding an empty collection. Call
    /// [`load`](SnapshotBinding::load) to populate it from the adapter.
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            data: snapshot::empty(),
        }
    }

    /// Reads the adapter and replaces the held collection.
    ///
    /// An absent payload falls back to the empty collection; a present but
    /// unparseable payload propagates
    /// [`StoreError::Corrupt`](crate::error::StoreError::Corrupt) instead of
    /// being mistaken for absence.
    pub async fn load(&mut self) -> StoreResult<&Collection> {
        self.data = match self.adapter.read().await? {
            Some(bytes) => snapshot::parse(&bytes)?,
            None => snapshot::empty(),
        };

        Ok(&self.data)
    }

    /// Serializes the held collection and writes it through the adapter.
    ///
    /// Adapter failures (disk full, permission denied) propagate to the
    /// caller; they are never swallowed here.
    pub async fn write(&self) -> StoreResult<()> {
        let bytes = snapshot::serialize(&self.data)?;

        self.adapter.write(&bytes).await
    }

    /// The held collection.
    pub fn data(&self) -> &Collection {
        &self.data
    }

    /// Mutable access to the held collection.
    pub fn data_mut(&mut self) -> &mut Collection {
        &mut self.data
    }

    /// Replaces the held collection wholesale.
    pub fn replace(&mut self, data: Collection) {
        self.data = data;
    }
}
