//! # Signature Verification Subsystem
//!
//! Recovers the signer address from a personal-message signature.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for the inbound interface
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Never-throws Contract**: malformed signatures are a normal outcome, not an
//!   error: `verify_message` always returns a result with `is_valid = false`
//!   rather than propagating a failure
//! - **No Key Material**: this crate only ever sees messages and signatures;
//!   private keys never cross its boundary

pub mod domain;
pub mod ports;

mod service;

// Re-export public API
pub use domain::ecdsa::{
    hash_personal_message, keccak256, recover_address, recover_signer, to_checksum_address,
    verify_message,
};
pub use domain::entities::{Address, DecodedSignature, Hash, VerificationOutcome};
pub use domain::errors::SignatureError;
pub use ports::inbound::SignatureVerificationApi;
pub use service::VerificationService;
