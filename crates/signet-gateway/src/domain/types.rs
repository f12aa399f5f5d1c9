//! Wire types for the REST surface.
//!
//! Request bodies are parsed as raw JSON in the handlers (field-presence
//! errors need exact 400 messages), so only response shapes live here.
//! `VerificationOutcome` and `MfaStatus` serialize themselves and go out
//! as-is.

use serde::Serialize;

/// Response to a successful MFA setup request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaSetupResponse {
    /// Base32 secret for manual entry
    pub secret: String,
    /// QR code as a data URI, scannable by authenticator apps
    pub qr_code_uri: String,
    /// Human-readable next step
    pub message: String,
}

/// Response to an accepted MFA action (verify / disable).
#[derive(Debug, Clone, Serialize)]
pub struct MfaActionResponse {
    /// Always true on the 200 path
    pub success: bool,
    /// Human-readable confirmation
    pub message: String,
}

impl MfaActionResponse {
    /// Successful action with the given confirmation message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
