//! JWT claim set model
//!
//! A decoded token payload, as handed over by the signing/decoding
//! pipeline. Claim values stay dynamic (`serde_json::Value`); the typed
//! accessors keep presence checks and timestamp parsing explicit instead of
//! scattering ad hoc field access through the validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Issuer claim name.
pub const ISS: &str = "iss";
/// Issued-at claim name.
pub const IAT: &str = "iat";
/// Expiry claim name.
pub const EXP: &str = "exp";
/// Not-before claim name.
pub const NBF: &str = "nbf";
/// Subject claim name.
pub const SUB: &str = "sub";
/// Token identifier claim name.
pub const JTI: &str = "jti";

/// A decoded JWT payload: claim names mapped to claim values.
///
/// Immutable as far as validation is concerned; the decoding pipeline
/// builds one per request and discards it after the check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    /// Build a claim set from a decoded payload value. Returns `None` when
    /// the payload is not a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(claims) => Some(Self { claims }),
            _ => None,
        }
    }

    /// Whether `name` is present as a key, regardless of its value.
    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.claims.get(name).and_then(|value| value.as_str())
    }

    /// Read a claim as epoch seconds and convert it to a comparable UTC
    /// timestamp. Integer and float values are accepted (floats truncate
    /// toward zero); anything else is `None`.
    pub fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        let value = self.claims.get(name)?;
        let secs = match value.as_i64() {
            Some(secs) => secs,
            None => value.as_f64()? as i64,
        };
        DateTime::from_timestamp(secs, 0)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(claims: Map<String, Value>) -> Self {
        Self { claims }
    }
}
