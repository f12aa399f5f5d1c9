//! # TOTP Computation
//!
//! RFC 6238 time-based one-time passwords, kept independent of storage so a
//! different backing store never touches validation logic. Every function
//! here is a pure function of its arguments (plus, for the `*_now` variants,
//! the system clock).

use super::errors::MfaError;
use totp_rs::{Algorithm, Secret, TOTP};

/// TOTP parameters shared by setup and login validation.
#[derive(Debug, Clone)]
pub struct TotpConfig {
    /// Issuer name shown in authenticator apps.
    pub issuer: String,
    /// Number of digits in a code.
    pub digits: usize,
    /// Time step in seconds.
    pub step: u64,
    /// Accepted clock skew, in steps before/after the current one.
    pub skew: u8,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            issuer: "Web3 Signer".to_string(),
            digits: 6,
            step: 30,
            skew: 2,
        }
    }
}

impl TotpConfig {
    /// Config with the given issuer and standard parameters.
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            ..Default::default()
        }
    }
}

/// Material handed to the user when a setup is issued.
#[derive(Debug, Clone)]
pub struct ProvisionedSecret {
    /// Base32-encoded shared secret (160 bits of entropy).
    pub secret: String,
    /// `otpauth://totp/...` URL embedding issuer, account label, and secret.
    pub otpauth_url: String,
    /// QR code of the URL as a `data:image/png;base64,...` URI.
    pub qr_code_uri: String,
}

/// Generate a fresh secret and its provisioning payload for an account.
pub fn generate_secret(
    config: &TotpConfig,
    account_name: &str,
) -> Result<ProvisionedSecret, MfaError> {
    let secret = Secret::generate_secret();
    let secret_base32 = secret.to_encoded().to_string();

    let totp = build_totp(config, &secret_base32, account_name)?;
    let otpauth_url = totp.get_url();

    let qr_base64 = totp
        .get_qr_base64()
        .map_err(MfaError::Provisioning)?;

    Ok(ProvisionedSecret {
        secret: secret_base32,
        otpauth_url,
        qr_code_uri: format!("data:image/png;base64,{qr_base64}"),
    })
}

/// Whether a submitted token has the only accepted shape: exactly six
/// decimal digits.
pub fn token_is_well_formed(token: &str) -> bool {
    token.len() == 6 && token.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a token against a secret at an explicit Unix timestamp.
///
/// Accepts the code for the step containing `time` and for `skew` steps on
/// either side of it. Malformed tokens are rejected with `Ok(false)`.
pub fn check_code(
    config: &TotpConfig,
    secret_base32: &str,
    account_name: &str,
    token: &str,
    time: u64,
) -> Result<bool, MfaError> {
    if !token_is_well_formed(token) {
        return Ok(false);
    }
    let totp = build_totp(config, secret_base32, account_name)?;
    Ok(totp.check(token, time))
}

/// Validate a token against a secret at the current system time.
pub fn check_code_now(
    config: &TotpConfig,
    secret_base32: &str,
    account_name: &str,
    token: &str,
) -> Result<bool, MfaError> {
    if !token_is_well_formed(token) {
        return Ok(false);
    }
    let totp = build_totp(config, secret_base32, account_name)?;
    totp.check_current(token)
        .map_err(|e| MfaError::Clock(e.to_string()))
}

/// Compute the expected code for a secret at an explicit Unix timestamp.
pub fn code_at(
    config: &TotpConfig,
    secret_base32: &str,
    account_name: &str,
    time: u64,
) -> Result<String, MfaError> {
    let totp = build_totp(config, secret_base32, account_name)?;
    Ok(totp.generate(time))
}

fn build_totp(
    config: &TotpConfig,
    secret_base32: &str,
    account_name: &str,
) -> Result<TOTP, MfaError> {
    let secret_bytes = Secret::Encoded(secret_base32.to_string())
        .to_bytes()
        .map_err(|e| MfaError::InvalidSecret(format!("{e:?}")))?;

    TOTP::new(
        Algorithm::SHA1, // authenticator-app compatibility
        config.digits,
        config.skew,
        config.step,
        secret_bytes,
        Some(config.issuer.clone()),
        account_name.to_string(),
    )
    .map_err(|e| MfaError::SecretGeneration(e.to_string()))
}
