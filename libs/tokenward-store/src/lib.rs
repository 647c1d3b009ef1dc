//! Tokenward revocation record storage
//!
//! A uniform async store for token revocation records with:
//! - Namespaced keys so one logical store can be flushed in isolation
//! - A Redis adapter for shared deployments (SCAN-based flush, no KEYS)
//! - An in-memory adapter for tests and single-process fallback
//!
//! Records are arbitrary JSON documents; callers decide what a revocation
//! record carries (typically the revocation reason or a unit marker).

mod config;
mod error;
mod keys;
mod memory_store;
mod redis_store;

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use keys::{Namespace, DEFAULT_NAMESPACE};
pub use memory_store::InMemoryRevocationStore;
pub use redis_store::RedisRevocationStore;

use async_trait::async_trait;
use serde_json::Value;

/// Uniform contract for revocation record backends.
///
/// Absence is data, not failure: `get` reports a missing or expired record
/// as `Ok(None)`. Errors are reserved for backend trouble and always
/// propagate to the caller.
#[async_trait]
pub trait RevocationStorage: Send + Sync {
    /// Store `value` under `key`, expiring after `ttl_minutes`. A TTL of
    /// zero stores the record without an expiry.
    async fn put(&self, key: &str, value: &Value, ttl_minutes: u64) -> StorageResult<()>;

    /// Fetch the record under `key`.
    async fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Remove the record under `key`, reporting whether the backend removed
    /// anything. Callers must not read this as proof of prior presence.
    async fn destroy(&self, key: &str) -> StorageResult<bool>;

    /// Remove every record in this store's namespace. Concurrent `put`s are
    /// not isolated from a running flush.
    async fn flush(&self) -> StorageResult<()>;
}
