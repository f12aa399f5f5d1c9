//! Error types for MFA operations.
//!
//! A wrong or malformed code is NOT an error: registry operations report it
//! as `Ok(false)`. These variants cover genuine internal failures, so callers
//! can log and surface them differently from a rejected code.

use thiserror::Error;

/// Internal failures of the MFA registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MfaError {
    /// Secret generation or TOTP construction failed
    #[error("failed to generate MFA secret: {0}")]
    SecretGeneration(String),

    /// Building the provisioning payload (otpauth URL / QR image) failed
    #[error("failed to build provisioning payload: {0}")]
    Provisioning(String),

    /// A stored secret could not be decoded as base32
    #[error("stored secret is not valid base32: {0}")]
    InvalidSecret(String),

    /// The system clock is unusable (before the Unix epoch)
    #[error("system clock error: {0}")]
    Clock(String),
}
