//! Validation failure taxonomy
//!
//! Every failure carries enough context for the owning pipeline to log or
//! surface it; [`ValidationError::kind`] collapses the variants into the two
//! classes callers actually branch on.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Broad failure classes.
///
/// Expiry is kept apart from the other failures because callers react
/// differently: an expired access token may still enter the refresh flow,
/// while a structurally broken one is rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Structurally incomplete payload, or a timestamp claim violating an
    /// ordering constraint.
    InvalidClaims,
    /// The token is past its usable lifetime for the requested flow.
    Expired,
}

/// A payload check failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The payload does not contain every required claim name.
    #[error("JWT payload does not contain the required claims (missing {})", claims.join(", "))]
    MissingClaims { claims: Vec<String> },

    /// A timestamp claim is present but not a numeric timestamp, or the
    /// expiry claim is unavailable when the temporal check needs it.
    #[error("claim `{claim}` is not a usable timestamp")]
    MalformedTimestamp { claim: String },

    /// Not-before lies ahead of the current time.
    #[error("Not Before (nbf) timestamp cannot be in the future")]
    NotBeforeInFuture { not_before: DateTime<Utc> },

    /// Issued-at lies ahead of the current time.
    #[error("Issued At (iat) timestamp cannot be in the future")]
    IssuedAtInFuture { issued_at: DateTime<Utc> },

    /// The expiry timestamp has passed.
    #[error("Token has expired")]
    Expired { expired_at: DateTime<Utc> },

    /// The refresh window measured from issued-at has elapsed.
    #[error("Token has expired and can no longer be refreshed")]
    RefreshExpired {
        issued_at: DateTime<Utc>,
        ttl_minutes: i64,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::MissingClaims { .. }
            | Self::MalformedTimestamp { .. }
            | Self::NotBeforeInFuture { .. }
            | Self::IssuedAtInFuture { .. } => ValidationErrorKind::InvalidClaims,
            Self::Expired { .. } | Self::RefreshExpired { .. } => ValidationErrorKind::Expired,
        }
    }

    /// HTTP-style status hint for the owning pipeline. Classification only;
    /// actual response mapping stays with the caller.
    pub fn status_hint(&self) -> u16 {
        match self.kind() {
            ValidationErrorKind::InvalidClaims => 400,
            ValidationErrorKind::Expired => 401,
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
