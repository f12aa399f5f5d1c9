//! # Domain Entities
//!
//! Core data structures for signature verification.

use serde::Serialize;

/// 32-byte Keccak-256 digest.
pub type Hash = [u8; 32];

/// Ethereum-style address derived from a public key
/// (last 20 bytes of keccak256(pubkey)).
pub type Address = [u8; 20];

/// An ECDSA signature decoded from its 65-byte hex wire form.
///
/// The wire form is `r (32 bytes) || s (32 bytes) || v (1 byte)`,
/// hex-encoded with an optional `0x` prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

/// Result of verifying a signed message.
///
/// Constructed fresh per request and never stored by this crate. A failed
/// recovery is a normal outcome: `is_valid` is false, `signer` is empty, and
/// the original message is still echoed back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    /// Whether address recovery succeeded
    pub is_valid: bool,
    /// Recovered signer address in EIP-55 checksummed form, or empty string
    pub signer: String,
    /// The message that was (claimed to be) signed, echoed verbatim
    pub original_message: String,
}

impl VerificationOutcome {
    /// Create a successful verification outcome.
    pub fn valid(signer: String, original_message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            signer,
            original_message: original_message.into(),
        }
    }

    /// Create a failed verification outcome.
    pub fn invalid(original_message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            signer: String::new(),
            original_message: original_message.into(),
        }
    }
}
