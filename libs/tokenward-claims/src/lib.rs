//! Tokenward claim-set model and payload validation
//!
//! Provides the claim handling shared by token-issuing services:
//! - Schema-free claim sets backed by JSON objects
//! - Structural validation (required claim names)
//! - Temporal validation with strict past/future comparisons
//! - Refresh-window validation measured from `iat`
//!
//! Validation is pure and synchronous; revocation state lives in the
//! `tokenward-store` crate.

pub mod claims;
pub mod error;
pub mod validator;

pub use claims::ClaimSet;
pub use error::{ValidationError, ValidationErrorKind, ValidationResult};
pub use validator::{
    PayloadValidator, ValidationMode, ValidatorConfig, DEFAULT_REFRESH_TTL_MINUTES,
    DEFAULT_REQUIRED_CLAIMS,
};
