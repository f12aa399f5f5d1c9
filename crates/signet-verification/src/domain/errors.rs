//! Error types for signature decoding and recovery.
//!
//! None of these escape `verify_message`: every variant collapses into an
//! `is_valid = false` outcome at the public boundary. They exist so that
//! `recover_signer` callers (and logs) can tell the failure modes apart.

use thiserror::Error;

/// Errors that can occur while decoding a signature or recovering a signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature is not valid hex
    #[error("signature is not valid hex")]
    InvalidHex,

    /// The signature is not 65 bytes (r || s || v)
    #[error("signature must be 65 bytes, got {0}")]
    InvalidLength(usize),

    /// An R or S scalar is out of range [1, n-1]
    #[error("signature scalar out of range")]
    InvalidScalar,

    /// Signature has a high S value (EIP-2 malleability protection)
    #[error("malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover the public key from the signature
    #[error("failed to recover public key")]
    RecoveryFailed,
}
