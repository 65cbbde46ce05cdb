//! Store controller and concrete snapshot adapters for jotdb.
//!
//! This crate pairs the building blocks from `jotdb-core` into a working
//! embedded store:
//!
//! - [`JsonFileAdapter`] - the durable snapshot file with atomic replace
//! - [`MemoryAdapter`] - the in-process fast-path mirror
//! - [`Store`] - CRUD + query surface with the dirty/flush protocol
//!
//! # Quick Start
//!
//! ```ignore
//! use jotdb_store::{Store, StoreOptions, WriteOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::open("users", StoreOptions::default()).await?;
//!
//!     store
//!         .upsert(json!({ "name": "Alice", "age": 30 }), WriteOptions::default())
//!         .await?;
//!
//!     let everyone = store.find_all().await;
//!     println!("{} record(s)", everyone.total_rows);
//!
//!     store.close().await?;
//!     Ok(())
//! }
//! ```

pub mod file;
pub mod memory;
pub mod store;

pub use file::JsonFileAdapter;
pub use memory::MemoryAdapter;
pub use store::{Store, StoreOptions, WriteOptions};
