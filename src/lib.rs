// src/lib.rs

//! Sorted set command module for the Citrine in-memory key-value store.
//!
//! The crate owns the sorted set data type and the full command surface built
//! on top of it: argument parsing, per-key locking discipline, set algebra,
//! and RESP-style response serialization. The keyspace itself (storage,
//! locking primitives, connection handling) is external and is reached
//! through the [`keyspace::KeyspaceHost`] trait.

pub mod commands;
pub mod errors;
pub mod keyspace;
pub mod protocol;
pub mod score;
pub mod storage;

// Re-export
pub use crate::commands::dispatch;
pub use crate::commands::module::SortedSetModule;
pub use crate::errors::ZSetError;
pub use crate::keyspace::{DataValue, ExecutionContext, KeyspaceHost};
pub use crate::protocol::RespValue;
