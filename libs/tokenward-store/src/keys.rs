//! Revocation key schema
//!
//! Every record lives under a namespace label so one logical store can be
//! flushed without touching unrelated keys on the same backend.
//! Key format: {namespace}:{key}

/// Namespace used when callers do not pick their own.
pub const DEFAULT_NAMESPACE: &str = "tokenward:revocation";

/// Label prefixed to every storage key.
///
/// An empty label disables prefixing: keys are stored bare and the flush
/// pattern widens to `*`, so a flush then clears the whole keyspace the
/// store can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Backend key for a logical key.
    pub fn key(&self, key: &str) -> String {
        if self.0.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.0, key)
        }
    }

    /// Glob pattern matching every key in this namespace.
    pub fn pattern(&self) -> String {
        if self.0.is_empty() {
            "*".to_string()
        } else {
            format!("{}:*", self.0)
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self(DEFAULT_NAMESPACE.to_string())
    }
}

impl From<&str> for Namespace {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Namespace {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}
