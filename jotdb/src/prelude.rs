//! Convenient glob import for the common jotdb surface.
//!
//! ```ignore
//! use jotdb::prelude::*;
//! ```

pub use jotdb_core::collection::{Collection, ID_FIELD};
pub use jotdb_core::error::{StoreError, StoreResult};
pub use jotdb_core::query::{
    Condition, FilterRequest, FilterResponse, Selector, SortDirection, SortSpec,
};
pub use jotdb_store::{Store, StoreOptions, WriteOptions};
