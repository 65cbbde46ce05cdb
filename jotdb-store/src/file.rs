//! File-backed snapshot adapter with atomic replace semantics.
//!
//! Writes stage the payload into a sibling temp file, sync it, and rename it
//! over the target. A crash mid-write leaves the previous snapshot intact; a
//! subsequent read never observes a partial file.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use jotdb_core::adapter::SnapshotAdapter;
use jotdb_core::error::{StoreError, StoreResult};

/// Snapshot adapter backed by one JSON file.
#[derive(Debug)]
pub struct JsonFileAdapter {
    path: PathBuf,
}

impl JsonFileAdapter {
    /// Creates an adapter for the given file path. The file itself is only
    /// created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl SnapshotAdapter for JsonFileAdapter {
    async fn read(&self) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Persistence(format!(
                "failed to read {}: {err}",
                self.path.display()
            ))),
        }
    }

    async fn write(&self, bytes: &[u8]) -> StoreResult<()> {
        let temp_path = self.temp_path();

        let mut file = fs::File::create(&temp_path).await.map_err(|err| {
            StoreError::Persistence(format!("failed to create {}: {err}", temp_path.display()))
        })?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);

        // Atomic on POSIX: the old snapshot stays intact until the rename lands.
        fs::rename(&temp_path, &self.path).await.map_err(|err| {
            StoreError::Persistence(format!(
                "failed to replace {}: {err}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn absent_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let adapter = JsonFileAdapter::new(dir.path().join("missing.json"));

        assert_eq!(adapter.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let adapter = JsonFileAdapter::new(dir.path().join("data.json"));

        adapter.write(b"[[\"a\",{}]]").await.unwrap();
        assert_eq!(
            adapter.read().await.unwrap(),
            Some(b"[[\"a\",{}]]".to_vec())
        );
    }

    #[tokio::test]
    async fn write_replaces_without_leaving_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let adapter = JsonFileAdapter::new(&path);

        adapter.write(b"first").await.unwrap();
        adapter.write(b"second").await.unwrap();

        assert_eq!(adapter.read().await.unwrap(), Some(b"second".to_vec()));
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails_loudly() {
        let dir = tempdir().unwrap();
        let adapter = JsonFileAdapter::new(dir.path().join("no/such/dir/data.json"));

        assert!(matches!(
            adapter.write(b"payload").await,
            Err(StoreError::Persistence(_))
        ));
    }
}
