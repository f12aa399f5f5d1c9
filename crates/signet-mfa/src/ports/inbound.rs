//! # Inbound Ports (Driving Ports / API)
//!
//! The registry API consumed by the HTTP layer.

use crate::domain::errors::MfaError;
use crate::domain::records::MfaStatus;
use crate::domain::totp::ProvisionedSecret;

/// Primary MFA registry API, keyed by an opaque user identifier.
///
/// Boolean results follow one rule throughout: `Ok(true)` means the code was
/// accepted, `Ok(false)` means it was rejected (wrong, malformed, or no
/// matching setup/enabled record), and `Err` means the registry itself
/// failed. Implementations must be thread-safe (`Send + Sync`).
pub trait MfaApi: Send + Sync {
    /// Issue a fresh pending secret for the identifier and return its
    /// provisioning material. Overwrites any previous pending secret;
    /// preserves an already-enabled permanent secret until promotion.
    fn generate_secret(&self, user_identifier: &str) -> Result<ProvisionedSecret, MfaError>;

    /// Validate a setup code against the pending secret. On acceptance the
    /// pending secret becomes permanent and the record is enabled.
    fn verify_setup_code(&self, user_identifier: &str, token: &str) -> Result<bool, MfaError>;

    /// Validate a login code against the permanent secret. Read-only;
    /// rejects immediately unless the record is enabled.
    fn verify_login_code(&self, user_identifier: &str, token: &str) -> Result<bool, MfaError>;

    /// Remove the identifier's record entirely. Idempotent: removing an
    /// unknown identifier still reports success.
    fn disable(&self, user_identifier: &str) -> bool;

    /// Read-only status for the identifier; never fails.
    fn status(&self, user_identifier: &str) -> MfaStatus;

    /// Whether MFA currently gates logins for the identifier.
    fn is_enabled(&self, user_identifier: &str) -> bool;
}
