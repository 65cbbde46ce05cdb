//! Core building blocks of the jotdb embedded document store.
//!
//! This crate provides the leaf components the store controller is built
//! from:
//!
//! - **Collection types** ([`collection`]) - schema-less records keyed by a unique identifier
//! - **Snapshot serializer** ([`snapshot`]) - the persisted `[identifier, record]` pair form
//! - **Storage adapter seam** ([`adapter`]) - byte-level snapshot read/write
//! - **Persistence binding** ([`binding`]) - one adapter paired with the serializer
//! - **Query engine** ([`query`]) - selector compilation, operator semantics, sort and limit
//! - **Error handling** ([`error`]) - the `StoreError` taxonomy and result alias

pub mod adapter;
pub mod binding;
pub mod collection;
pub mod error;
pub mod query;
pub mod snapshot;
