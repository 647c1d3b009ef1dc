//! Redis-backed revocation store
//!
//! Records are JSON strings under namespaced keys. Flushing SCANs the
//! namespace pattern and deletes in pipelined batches instead of a blocking
//! KEYS call.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Pipeline};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};
use crate::keys::Namespace;
use crate::RevocationStorage;

/// Keys requested per SCAN round during a flush.
const SCAN_COUNT: usize = 100;

/// Revocation store backed by Redis.
///
/// The connection manager is cloned per operation; clones share the
/// underlying multiplexed connection and reconnect on failure.
#[derive(Clone)]
pub struct RedisRevocationStore {
    redis: ConnectionManager,
    namespace: Namespace,
}

impl RedisRevocationStore {
    pub fn new(redis: ConnectionManager) -> Self {
        Self::with_namespace(redis, Namespace::default())
    }

    pub fn with_namespace(redis: ConnectionManager, namespace: Namespace) -> Self {
        Self { redis, namespace }
    }

    /// Connect to `url` under the default namespace.
    pub async fn connect(url: &str) -> StorageResult<Self> {
        Self::connect_with_namespace(url, Namespace::default()).await
    }

    pub async fn connect_with_namespace(url: &str, namespace: Namespace) -> StorageResult<Self> {
        let client = Client::open(url).map_err(StorageError::Redis)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(StorageError::Redis)?;
        Ok(Self::with_namespace(manager, namespace))
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }
}

#[async_trait]
impl RevocationStorage for RedisRevocationStore {
    async fn put(&self, key: &str, value: &Value, ttl_minutes: u64) -> StorageResult<()> {
        let data = serde_json::to_string(value).map_err(StorageError::Serialization)?;
        let storage_key = self.namespace.key(key);
        let mut conn = self.redis.clone();

        if ttl_minutes == 0 {
            // No deadline: the record lives until destroyed or flushed.
            redis::cmd("SET")
                .arg(&storage_key)
                .arg(data)
                .query_async::<_, ()>(&mut conn)
                .await
                .map_err(StorageError::Redis)?;
        } else {
            redis::cmd("SET")
                .arg(&storage_key)
                .arg(data)
                .arg("EX")
                .arg(ttl_minutes * 60)
                .query_async::<_, ()>(&mut conn)
                .await
                .map_err(StorageError::Redis)?;
        }

        debug!(key = %storage_key, ttl_minutes, "revocation record stored");
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        let storage_key = self.namespace.key(key);
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(&storage_key).await {
            Ok(Some(data)) => match serde_json::from_str::<Value>(&data) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!(key = %storage_key, error = %e, "corrupt revocation record; dropping");
                    let _ = conn.del::<_, ()>(&storage_key).await;
                    Ok(None)
                }
            },
            Ok(None) => Ok(None),
            Err(e) => {
                warn!(key = %storage_key, error = %e, "Redis get error");
                Err(StorageError::Redis(e))
            }
        }
    }

    async fn destroy(&self, key: &str) -> StorageResult<bool> {
        let storage_key = self.namespace.key(key);
        let mut conn = self.redis.clone();

        let removed: i64 = conn
            .del(&storage_key)
            .await
            .map_err(StorageError::Redis)?;

        debug!(key = %storage_key, removed, "revocation record destroyed");
        Ok(removed > 0)
    }

    async fn flush(&self) -> StorageResult<()> {
        let pattern = self.namespace.pattern();
        let mut conn = self.redis.clone();
        let mut cursor: u64 = 0;
        let mut total_deleted = 0;

        loop {
            // SCAN instead of KEYS to avoid blocking the server.
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(StorageError::Redis)?;

            if !keys.is_empty() {
                let mut pipe = Pipeline::new();
                for key in &keys {
                    pipe.del(key);
                }
                pipe.query_async::<_, ()>(&mut conn)
                    .await
                    .map_err(StorageError::Redis)?;

                total_deleted += keys.len();
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        info!(
            namespace = %self.namespace.as_str(),
            deleted = total_deleted,
            "revocation store flushed"
        );
        Ok(())
    }
}
