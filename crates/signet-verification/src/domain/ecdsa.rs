//! # Personal-Message ECDSA Recovery (secp256k1)
//!
//! Pure domain logic for recovering the signer of a personal-message
//! signature.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be STRICTLY LESS THAN
//!   SECP256K1_HALF_ORDER
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Operations**: scalar comparisons use the `subtle` crate
//! - Uses the k256 crate for the recovery itself

use super::entities::{Address, DecodedSignature, Hash, VerificationOutcome};
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use subtle::{Choice, ConstantTimeEq};
use tracing::debug;

/// Prefix prepended to every signed message (EIP-191 "personal_sign").
///
/// The full preimage is `prefix || decimal byte length || message`.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for the malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// PUBLIC API
// =============================================================================

/// Verify a personal-message signature and recover the signer address.
///
/// This is the crate's main entry point and it never fails: any decoding or
/// recovery error yields `is_valid = false` with an empty signer, because a
/// bad signature is a normal outcome of verification, not an exceptional one.
/// Deterministic: identical `(message, signature)` pairs always produce the
/// identical outcome.
pub fn verify_message(message: &str, signature: &str) -> VerificationOutcome {
    match recover_signer(message, signature) {
        Ok(signer) => VerificationOutcome::valid(signer, message),
        Err(e) => {
            debug!(error = %e, "signature verification failed");
            VerificationOutcome::invalid(message)
        }
    }
}

/// Recover the EIP-55 checksummed signer address from a message and a
/// hex-encoded 65-byte signature.
pub fn recover_signer(message: &str, signature: &str) -> Result<String, SignatureError> {
    let decoded = decode_signature(signature)?;

    // Validate R and S are in range [1, n-1] per SEC1
    if !is_valid_scalar(&decoded.r) || !is_valid_scalar(&decoded.s) {
        return Err(SignatureError::InvalidScalar);
    }

    // Check malleability (EIP-2): S must be in the lower half of the curve order
    if !is_low_s(&decoded.s) {
        return Err(SignatureError::MalleableSignature);
    }

    let message_hash = hash_personal_message(message);
    let address = recover_address(&message_hash, &decoded)?;

    Ok(to_checksum_address(&address))
}

/// Hash a message with the personal-message prefix.
///
/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`
/// where the length is the decimal byte length of the message.
pub fn hash_personal_message(message: &str) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message.as_bytes());
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Decode a hex signature string into its r, s, v components.
///
/// Accepts an optional `0x` prefix. The payload must be exactly 65 bytes.
pub fn decode_signature(signature: &str) -> Result<DecodedSignature, SignatureError> {
    let stripped = signature
        .strip_prefix("0x")
        .or_else(|| signature.strip_prefix("0X"))
        .unwrap_or(signature);

    let bytes = hex::decode(stripped).map_err(|_| SignatureError::InvalidHex)?;
    if bytes.len() != 65 {
        return Err(SignatureError::InvalidLength(bytes.len()));
    }

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..64]);

    Ok(DecodedSignature { r, s, v: bytes[64] })
}

/// Recover the signer's address from a message hash and a decoded signature.
pub fn recover_address(
    message_hash: &Hash,
    signature: &DecodedSignature,
) -> Result<Address, SignatureError> {
    use zeroize::Zeroize;

    let recovery_id = parse_recovery_id(signature.v)?;

    // Construct the k256 signature from r and s.
    // The intermediate buffer is zeroized once parsed.
    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let sig = match Signature::from_slice(&sig_bytes) {
        Ok(s) => {
            sig_bytes.zeroize();
            s
        }
        Err(_) => {
            sig_bytes.zeroize();
            return Err(SignatureError::InvalidScalar);
        }
    };

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Derive the address from a public key: last 20 bytes of
/// keccak256(uncompressed pubkey without the 0x04 prefix).
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let pubkey_slice = pubkey_bytes.as_bytes();

    let hash = keccak256(&pubkey_slice[1..]); // Skip 0x04 prefix

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Encode an address in EIP-55 mixed-case checksum form (`0x`-prefixed).
///
/// A hex letter is uppercased iff the corresponding nibble of
/// keccak256(lowercase hex address) is >= 8.
pub fn to_checksum_address(address: &Address) -> String {
    let hex_addr = hex::encode(address);
    let hash = keccak256(hex_addr.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in hex_addr.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Check if an S value is in the lower half of the curve order (EIP-2).
///
/// Per EIP-2: S must be STRICTLY LESS THAN half_order (not equal).
///
/// ## Security: Constant-Time Implementation
///
/// The comparison runs in fixed time regardless of input values so that
/// execution timing leaks nothing about the signature.
fn is_low_s(s: &[u8; 32]) -> bool {
    // Constant-time comparison: s < SECP256K1_HALF_ORDER (strict inequality),
    // computed without early returns
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = s[i];
        let h_byte = SECP256K1_HALF_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < h_byte) as u8);
        let byte_greater = Choice::from((s_byte > h_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less.into()
}

/// Check if a scalar value is in the valid range [1, n-1] for ECDSA.
///
/// Per SEC1, R and S components must be greater than zero and less than the
/// curve order n.
///
/// ## Security: Constant-Time Implementation
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    // Constant-time check for zero
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    // Constant-time check for scalar < curve order
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = scalar[i];
        let n_byte = SECP256K1_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < n_byte) as u8);
        let byte_greater = Choice::from((s_byte > n_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    let not_zero = !is_zero;
    let valid = not_zero & less;
    valid.into()
}

/// Parse a recovery ID from the v byte.
///
/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Invert an S value: s' = n - s (produces the malleable twin).
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// UNIT TESTS
// =============================================================================
