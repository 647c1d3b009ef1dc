//! Payload validation
//!
//! Checks run in a fixed order: structure first, then either the temporal
//! checks (standard verification) or the refresh-window check. The first
//! failure aborts the run, so callers always see the earliest problem in
//! that order.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::Deserialize;

use crate::claims::{self, ClaimSet};
use crate::error::{ValidationError, ValidationResult};

/// Claim names every payload must carry unless the config overrides them.
pub const DEFAULT_REQUIRED_CLAIMS: [&str; 6] = [
    claims::ISS,
    claims::IAT,
    claims::EXP,
    claims::NBF,
    claims::SUB,
    claims::JTI,
];

/// Refresh window in minutes (two weeks).
pub const DEFAULT_REFRESH_TTL_MINUTES: i64 = 20160;

fn default_required_claims() -> BTreeSet<String> {
    DEFAULT_REQUIRED_CLAIMS
        .iter()
        .map(|name| (*name).to_string())
        .collect()
}

fn default_refresh_ttl_minutes() -> i64 {
    DEFAULT_REFRESH_TTL_MINUTES
}

/// Validator tuning.
///
/// Deserializable so services can source it from their environment config;
/// `Default` gives the stock claim set and refresh window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidatorConfig {
    /// Names that must appear as payload keys. Values are not inspected at
    /// the structural stage.
    #[serde(default = "default_required_claims")]
    pub required_claims: BTreeSet<String>,

    /// Minutes after `iat` during which a token may still be refreshed.
    #[serde(default = "default_refresh_ttl_minutes")]
    pub refresh_ttl_minutes: i64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            required_claims: default_required_claims(),
            refresh_ttl_minutes: default_refresh_ttl_minutes(),
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the required claim set. Later calls overwrite earlier ones.
    pub fn with_required_claims<I, S>(mut self, claims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_claims = claims.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the refresh window. Later calls overwrite earlier ones.
    pub fn with_refresh_ttl(mut self, minutes: i64) -> Self {
        self.refresh_ttl_minutes = minutes;
        self
    }
}

/// Which check sequence to run after the structural stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Temporal ordering: `nbf` and `iat` must not be in the future, `exp`
    /// must not be in the past.
    Standard,
    /// Refresh window: minutes elapsed since `iat` must stay below the
    /// configured TTL. `exp` is deliberately ignored here.
    Refresh,
}

/// Stateless payload checker.
#[derive(Debug, Clone, Default)]
pub struct PayloadValidator {
    config: ValidatorConfig,
}

impl PayloadValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Runs the full check sequence for `mode` against `payload`.
    pub fn check(&self, payload: &ClaimSet, mode: ValidationMode) -> ValidationResult<()> {
        self.check_structure(payload)?;
        match mode {
            ValidationMode::Standard => self.check_timestamps(payload),
            ValidationMode::Refresh => self.check_refresh(payload),
        }
    }

    /// Every configured claim name must appear as a payload key. Missing
    /// names are collected so the error reports all of them at once.
    fn check_structure(&self, payload: &ClaimSet) -> ValidationResult<()> {
        let missing: Vec<String> = self
            .config
            .required_claims
            .iter()
            .filter(|name| !payload.contains(name))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingClaims { claims: missing })
        }
    }

    /// Strict ordering against the current clock: a timestamp equal to "now"
    /// is neither future nor past, so it passes every check here.
    fn check_timestamps(&self, payload: &ClaimSet) -> ValidationResult<()> {
        let now = Utc::now();

        if payload.contains(claims::NBF) {
            let not_before = Self::require_timestamp(payload, claims::NBF)?;
            if not_before > now {
                return Err(ValidationError::NotBeforeInFuture { not_before });
            }
        }

        if payload.contains(claims::IAT) {
            let issued_at = Self::require_timestamp(payload, claims::IAT)?;
            if issued_at > now {
                return Err(ValidationError::IssuedAtInFuture { issued_at });
            }
        }

        // exp is needed unconditionally, present in the payload or not.
        let expired_at = Self::require_timestamp(payload, claims::EXP)?;
        if expired_at < now {
            return Err(ValidationError::Expired { expired_at });
        }

        Ok(())
    }

    /// Elapsed minutes are signed, so a token issued in the future has
    /// negative elapsed time and trivially passes.
    fn check_refresh(&self, payload: &ClaimSet) -> ValidationResult<()> {
        if !payload.contains(claims::IAT) {
            return Ok(());
        }

        let issued_at = Self::require_timestamp(payload, claims::IAT)?;
        let elapsed_minutes = (Utc::now() - issued_at).num_minutes();
        if elapsed_minutes >= self.config.refresh_ttl_minutes {
            return Err(ValidationError::RefreshExpired {
                issued_at,
                ttl_minutes: self.config.refresh_ttl_minutes,
            });
        }

        Ok(())
    }

    fn require_timestamp(
        payload: &ClaimSet,
        claim: &str,
    ) -> ValidationResult<chrono::DateTime<Utc>> {
        payload
            .timestamp(claim)
            .ok_or_else(|| ValidationError::MalformedTimestamp {
                claim: claim.to_string(),
            })
    }
}
