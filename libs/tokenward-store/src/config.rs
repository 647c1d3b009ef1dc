//! Configuration management

use serde::Deserialize;

use crate::keys::DEFAULT_NAMESPACE;

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Environment-sourced store settings (`REDIS_URL`, `NAMESPACE`).
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub redis_url: String,

    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}
