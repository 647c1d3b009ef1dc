//! In-memory revocation store
//!
//! Process-local backend for tests and single-node deployments. It has no
//! notion of key grouping, so `flush` clears the entire map.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StorageResult;
use crate::RevocationStorage;

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |deadline| deadline <= now)
    }
}

/// Revocation store backed by a process-local map.
///
/// Expired entries are evicted lazily when touched; there is no background
/// sweeper.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStorage for InMemoryRevocationStore {
    async fn put(&self, key: &str, value: &Value, ttl_minutes: u64) -> StorageResult<()> {
        let expires_at = if ttl_minutes == 0 {
            None
        } else {
            Some(Utc::now() + Duration::minutes(ttl_minutes as i64))
        };

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                None => return Ok(None),
                Some(_) => {}
            }
        }

        // The entry hit its deadline; evict it before reporting a miss.
        let mut entries = self.entries.write().await;
        if entries.get(key).map_or(false, |entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn destroy(&self, key: &str) -> StorageResult<bool> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            // An entry past its deadline counts as already gone.
            Some(entry) => Ok(!entry.is_expired(now)),
            None => Ok(false),
        }
    }

    async fn flush(&self) -> StorageResult<()> {
        let mut entries = self.entries.write().await;
        let cleared = entries.len();
        entries.clear();

        debug!(cleared, "in-memory revocation store flushed");
        Ok(())
    }
}
