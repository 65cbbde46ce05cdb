//! jotdb: an embedded, single-process JSON document store.
//!
//! One named collection of schema-less records is held in memory, mirrored
//! to a JSON file on disk, queryable through a small structured-filter
//! language and sortable by attribute or custom comparator.
//!
//! # Features
//!
//! - **Write-through memory, eventual disk** - mutations are visible to
//!   same-process readers immediately; the disk snapshot follows via a
//!   single-flight background flush (or synchronously with
//!   `WriteOptions::consistent`)
//! - **Structured filters** - `$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`,
//!   `$in`, `$nin`, literal deep equality, or an arbitrary match function
//! - **Atomic snapshots** - the persisted file is replaced all-or-nothing,
//!   so a crash never corrupts the previous snapshot
//!
//! # Quick Start
//!
//! ```ignore
//! use jotdb::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::open("users", StoreOptions::default()).await?;
//!
//!     let alice = store
//!         .upsert(json!({ "name": "Alice", "age": 30 }), WriteOptions::default())
//!         .await?;
//!
//!     let adults = store
//!         .filter(
//!             &FilterRequest::builder()
//!                 .field("age", Condition::gte(18))
//!                 .sort("name", SortDirection::Asc)
//!                 .build(),
//!         )
//!         .await;
//!
//!     println!("{} adult(s), first is {}", adults.total_rows, alice["name"]);
//!
//!     store.close().await?;
//!     Ok(())
//! }
//! ```

pub mod prelude;

pub use jotdb_core::{adapter, binding, collection, error, query, snapshot};
pub use jotdb_store::{JsonFileAdapter, MemoryAdapter, Store, StoreOptions, WriteOptions};

// Re-export the JSON value types records are made of.
pub use serde_json::{self, Value, json};
