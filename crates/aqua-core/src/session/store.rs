//! Key-value store trait.

use async_trait::async_trait;

use crate::error::Result;

/// Asynchronous durable storage for small string values.
///
/// Models the platform key-value store the session state is synchronized
/// with. Keys and values are opaque strings; a missing key is `Ok(None)`,
/// never an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Durably stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`. Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<()>;
}
