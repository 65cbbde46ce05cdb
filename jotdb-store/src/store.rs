//! The store controller: one named collection with write-through memory
//! mirroring and an eventually-consistent disk flush.
//!
//! Every mutation lands in the in-memory collection synchronously, so
//! same-process reads are always fresh; only the disk snapshot may lag. A
//! dedicated worker task drains a single-slot flush signal, and a mutex
//! around the disk binding keeps flushes single-flight. Callers that need
//! the disk current before a mutating call returns pass
//! [`WriteOptions::consistent`].
//!
//! # Example
//!
//! ```ignore
//! use jotdb_store::{Store, StoreOptions, WriteOptions};
//! use serde_json::json;
//!
//! let store = Store::open("users", StoreOptions::default()).await?;
//! let alice = store
//!     .upsert(json!({ "name": "Alice" }), WriteOptions::default())
//!     .await?;
//! let found = store.find_by_id(alice["_id"].as_str().unwrap()).await;
//! store.close().await?;
//! ```

use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, Ordering};

use mea::mutex::Mutex;
use mea::rwlock::RwLock;
use tokio::fs;
use tokio::sync::Notify;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use jotdb_core::binding::SnapshotBinding;
use jotdb_core::collection::{restamp_id, stamp_id};
use jotdb_core::error::{StoreError, StoreResult};
use jotdb_core::query::{self, FilterRequest, FilterResponse};

use crate::file::JsonFileAdapter;
use crate::memory::MemoryAdapter;

const DEFAULT_ROOT: &str = "./db";

/// Construction options for a [`Store`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Directory holding the persisted snapshot files. Created if missing.
    pub root: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

impl StoreOptions {
    /// Options with a custom root directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Per-call options for mutating operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// When set, the disk snapshot is flushed synchronously before the call
    /// returns. Off by default: the flush is handed to the worker task.
    pub consistent: bool,
}

impl WriteOptions {
    /// Options requesting a synchronous flush.
    pub fn consistent() -> Self {
        Self { consistent: true }
    }
}

struct StoreInner {
    name: String,
    /// The authoritative in-memory collection, held by its memory-mirror
    /// binding. Mutations go through the write lock and mirror the bytes
    /// before the lock is released.
    mem: RwLock<SnapshotBinding<MemoryAdapter>>,
    /// The durable binding. The mutex doubles as the single-flight guard;
    /// at most one flush ever runs per store.
    disk: Mutex<SnapshotBinding<JsonFileAdapter>>,
    dirty: AtomicBool,
    flush_signal: Notify,
    shutdown: AtomicBool,
    error_tx: mpsc::UnboundedSender<StoreError>,
}

impl StoreInner {
    /// Flushes the in-memory collection to disk if it is dirty.
    ///
    /// The disk mutex is acquired before the dirty flag is swapped and the
    /// snapshot taken, so overlapping flushes commit in order: a flush that
    /// started earlier can never overwrite a newer snapshot with a stale
    /// clone, and `!dirty` is only observed after the write that consumed
    /// the mark has finished. The flag is cleared when the snapshot is
    /// taken: a mutation that lands mid-write re-marks the store and
    /// triggers a follow-up flush. A failed write restores the flag so the
    /// data is not forgotten.
    async fn flush(&self) -> StoreResult<()> {
        let mut disk = self.disk.lock().await;

        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        let data = self.mem.read().await.data().clone();
        disk.replace(data);
        match disk.write().await {
            Ok(()) => {
                debug!(name = %self.name, records = disk.data().len(), "snapshot flushed");
                Ok(())
            }
            Err(err) => {
                self.dirty.store(true, Ordering::Release);
                Err(err)
            }
        }
    }
}

async fn flush_worker(inner: Arc<StoreInner>) {
    loop {
        inner.flush_signal.notified().await;

        if inner.shutdown.load(Ordering::Acquire) {
            break;
        }

        if let Err(err) = inner.flush().await {
            warn!(name = %inner.name, error = %err, "background flush failed");
            let _ = inner.error_tx.send(err);
        }
    }
}

/// An embedded, single-process document store over one named collection.
///
/// The store exclusively owns its canonical collection; reads hand out owned
/// copies of the matching records, never a live alias into the collection.
pub struct Store {
    inner: Arc<StoreInner>,
    worker: Option<JoinHandle<()>>,
    flush_errors: StdMutex<Option<mpsc::UnboundedReceiver<StoreError>>>,
}

impl Store {
    /// Opens the named collection, loading any snapshot persisted at
    /// `{root}/{name}.json`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Configuration`] if `name` is empty or whitespace-only.
    /// - [`StoreError::Corrupt`] if a snapshot file exists but cannot be
    ///   parsed. Only a truly absent file falls back to the empty collection.
    /// - [`StoreError::Persistence`] if the root directory or the snapshot
    ///   cannot be accessed.
    pub async fn open(name: &str, options: StoreOptions) -> StoreResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Configuration(
                "store name must not be empty".to_string(),
            ));
        }

        fs::create_dir_all(&options.root).await.map_err(|err| {
            StoreError::Persistence(format!(
                "failed to create {}: {err}",
                options.root.display()
            ))
        })?;

        let path = options.root.join(format!("{name}.json"));
        let mut disk = SnapshotBinding::new(JsonFileAdapter::new(path));
        disk.load().await?;

        let mut mem = SnapshotBinding::new(MemoryAdapter::new());
        mem.replace(disk.data().clone());
        mem.write().await?;

        let (error_tx, error_rx) = mpsc::unbounded_channel();
        let inner = Arc::new(StoreInner {
            name: name.to_string(),
            mem: RwLock::new(mem),
            disk: Mutex::new(disk),
            dirty: AtomicBool::new(false),
            flush_signal: Notify::new(),
            shutdown: AtomicBool::new(false),
            error_tx,
        });

        let worker = tokio::spawn(flush_worker(Arc::clone(&inner)));

        info!(name = %inner.name, records = inner.mem.read().await.data().len(), "store opened");

        Ok(Self {
            inner,
            worker: Some(worker),
            flush_errors: StdMutex::new(Some(error_rx)),
        })
    }

    /// Inserts or replaces one record, assigning a fresh `_id` when the
    /// record does not carry a usable one. Returns the stored record with
    /// its identifier populated.
    pub async fn upsert(&self, mut row: Value, options: WriteOptions) -> StoreResult<Value> {
        let id = stamp_id(&mut row)?;

        {
            let mut mem = self.inner.mem.write().await;
            mem.data_mut().insert(id, row.clone());
            mem.write().await?;
        }

        self.sync(options.consistent).await?;

        Ok(row)
    }

    /// Upserts a batch of records with a single flush at the end.
    pub async fn upsert_many(
        &self,
        rows: Vec<Value>,
        options: WriteOptions,
    ) -> StoreResult<Vec<Value>> {
        let mut stored = Vec::with_capacity(rows.len());

        {
            let mut mem = self.inner.mem.write().await;
            for mut row in rows {
                let id = stamp_id(&mut row)?;
                mem.data_mut().insert(id, row.clone());
                stored.push(row);
            }
            mem.write().await?;
        }

        self.sync(options.consistent).await?;

        Ok(stored)
    }

    /// Returns every record with paging statistics attached.
    pub async fn find_all(&self) -> FilterResponse {
        let mem = self.inner.mem.read().await;

        FilterResponse::with_statistics(mem.data().values().cloned().collect())
    }

    /// Looks up one record by identifier. A blank or unknown id is `None`,
    /// never an error.
    pub async fn find_by_id(&self, id: &str) -> Option<Value> {
        if id.trim().is_empty() {
            return None;
        }

        self.inner.mem.read().await.data().get(id).cloned()
    }

    /// Runs a filter request against the current collection.
    pub async fn filter(&self, request: &FilterRequest) -> FilterResponse {
        let mem = self.inner.mem.read().await;

        query::execute(mem.data().values(), request)
    }

    /// Applies `transform` to a copy of the record with the given id and
    /// stores the result. The identifier is re-stamped afterwards, so the
    /// transform cannot move the record to a different key. An absent id
    /// returns `None` and leaves the collection untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRecord`] if the transform result is not
    /// a JSON object.
    pub async fn modify(
        &self,
        id: &str,
        transform: impl FnOnce(Value) -> Value,
        options: WriteOptions,
    ) -> StoreResult<Option<Value>> {
        let updated = {
            let mut mem = self.inner.mem.write().await;

            let Some(current) = mem.data().get(id).cloned() else {
                return Ok(None);
            };

            let mut updated = transform(current);
            restamp_id(&mut updated, id)?;

            mem.data_mut().insert(id.to_string(), updated.clone());
            mem.write().await?;

            updated
        };

        self.sync(options.consistent).await?;

        Ok(Some(updated))
    }

    /// Removes the record with the given id, reporting whether a removal
    /// occurred. Syncs regardless of the outcome.
    pub async fn delete_by_id(&self, id: &str, options: WriteOptions) -> StoreResult<bool> {
        let removed = {
            let mut mem = self.inner.mem.write().await;
            let removed = mem.data_mut().remove(id).is_some();
            mem.write().await?;
            removed
        };

        self.sync(options.consistent).await?;

        Ok(removed)
    }

    /// Flushes the collection to disk now, if it is dirty.
    pub async fn flush(&self) -> StoreResult<()> {
        self.inner.flush().await
    }

    /// Takes the receiver for background flush failures. Errors from
    /// deferred flushes surface here (and in the log) instead of being
    /// thrown into unrelated later calls. Yields `None` after the first call.
    pub fn take_flush_errors(&self) -> Option<mpsc::UnboundedReceiver<StoreError>> {
        self.flush_errors
            .lock()
            .expect("flush error receiver lock poisoned")
            .take()
    }

    /// Drains any pending flush, stops the worker task, and closes the
    /// store. Once a mutating call has returned, its flush is guaranteed to
    /// have been attempted by the time `close` completes.
    pub async fn close(mut self) -> StoreResult<()> {
        self.inner.shutdown.store(true, Ordering::Release);
        self.inner.flush_signal.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }

        self.inner.flush().await
    }

    async fn sync(&self, consistent: bool) -> StoreResult<()> {
        self.inner.dirty.store(true, Ordering::Release);

        if consistent {
            self.inner.flush().await
        } else {
            // Notify keeps a single stored permit, which is exactly the
            // single-slot pending-flush queue: back-to-back mutations
            // coalesce into one wakeup.
            self.inner.flush_signal.notify_one();
            Ok(())
        }
    }
}

/// A store dropped without [`close`](Store::close) must not leave the worker
/// parked on the flush signal forever (it holds an `Arc` to the inner
/// state). Unflushed data is still lost on drop; `close` is the graceful
/// path.
impl Drop for Store {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}
