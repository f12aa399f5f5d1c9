//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::VerificationOutcome;
use crate::domain::errors::SignatureError;

/// Primary signature verification API.
///
/// Implementations must be thread-safe (`Send + Sync`); callers hold them
/// behind an `Arc<dyn SignatureVerificationApi>`.
pub trait SignatureVerificationApi: Send + Sync {
    /// Verify a personal-message signature and recover the signer.
    ///
    /// Never fails: malformed input yields `is_valid = false` with an empty
    /// signer, and the original message is echoed back either way.
    fn verify_message(&self, message: &str, signature: &str) -> VerificationOutcome;

    /// Recover the EIP-55 checksummed signer address, surfacing the precise
    /// failure mode instead of collapsing it.
    fn recover_signer(&self, message: &str, signature: &str)
        -> Result<String, SignatureError>;
}
