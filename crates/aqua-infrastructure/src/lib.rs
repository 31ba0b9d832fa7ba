//! Infrastructure layer for the aqua client.
//!
//! Provides platform persistence for the domain layer: path management and
//! the durable/in-memory key-value stores backing the session manager.

pub mod file_key_value_store;
pub mod memory_key_value_store;
pub mod paths;
pub mod storage;

pub use crate::file_key_value_store::FileKeyValueStore;
pub use crate::memory_key_value_store::MemoryKeyValueStore;
pub use crate::paths::AquaPaths;
