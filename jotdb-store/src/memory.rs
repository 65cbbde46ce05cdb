//! In-process snapshot adapter.
//!
//! Holds the most recently written snapshot bytes in memory. The store
//! controller uses one of these as the fast-path mirror so that every
//! completed mutation is immediately visible to same-process readers,
//! independent of the disk flush cadence.

use async_trait::async_trait;
use mea::rwlock::RwLock;

use jotdb_core::adapter::SnapshotAdapter;
use jotdb_core::error::StoreResult;

/// A process-local holder of the last written snapshot payload.
///
/// `read` returns `None` until the first `write`.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    data: RwLock<Option<Vec<u8>>>,
}

impl MemoryAdapter {
    /// Creates an adapter holding no payload.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotAdapter for MemoryAdapter {
    async fn read(&self) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.data.read().await.clone())
    }

    async fn write(&self, bytes: &[u8]) -> StoreResult<()> {
        *self.data.write().await = Some(bytes.to_vec());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_none_until_first_write() {
        let adapter = MemoryAdapter::new();
        assert_eq!(adapter.read().await.unwrap(), None);

        adapter.write(b"payload").await.unwrap();
        assert_eq!(adapter.read().await.unwrap(), Some(b"payload".to_vec()));

        adapter.write(b"replaced").await.unwrap();
        assert_eq!(adapter.read().await.unwrap(), Some(b"replaced".to_vec()));
    }
}
