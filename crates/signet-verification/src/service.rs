//! # Verification Service
//!
//! Application service that implements the `SignatureVerificationApi` trait
//! by delegating to the domain layer. The domain functions are pure, so the
//! service carries no state of its own; it exists to give callers a single
//! injectable seam.

use crate::domain::ecdsa;
use crate::domain::entities::VerificationOutcome;
use crate::domain::errors::SignatureError;
use crate::ports::inbound::SignatureVerificationApi;
use tracing::info;

/// Stateless signature verification service.
#[derive(Debug, Clone, Default)]
pub struct VerificationService;

impl VerificationService {
    /// Create a new verification service.
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerificationApi for VerificationService {
    fn verify_message(&self, message: &str, signature: &str) -> VerificationOutcome {
        let outcome = ecdsa::verify_message(message, signature);
        if outcome.is_valid {
            info!(signer = %outcome.signer, "signature verified");
        }
        outcome
    }

    fn recover_signer(
        &self,
        message: &str,
        signature: &str,
    ) -> Result<String, SignatureError> {
        ecdsa::recover_signer(message, signature)
    }
}
