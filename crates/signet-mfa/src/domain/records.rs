//! # MFA Records
//!
//! The per-identifier record and its lifecycle transitions.
//!
//! Invariants:
//! - an enabled record always has a non-empty permanent secret
//! - at most one pending `temp_secret` exists per identifier; re-issuing a
//!   setup overwrites the previous one
//! - promotion moves `temp_secret` into `secret`, sets `enabled`, and clears
//!   the pending slot

use serde::Serialize;

/// Stored MFA state for one user identifier.
///
/// The identifier itself is the map key and is an opaque string (an email or
/// a wallet address); no uniqueness rules beyond string equality apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MfaRecord {
    /// Permanent shared secret, base32-encoded; empty until first promotion.
    pub secret: String,
    /// Secret issued by an in-progress setup, pending verification.
    pub temp_secret: Option<String>,
    /// Whether the permanent secret gates logins.
    pub enabled: bool,
}

impl MfaRecord {
    /// Record for a freshly issued setup, preserving any existing permanent
    /// secret and enablement.
    pub fn with_pending(existing: Option<Self>, temp_secret: String) -> Self {
        let existing = existing.unwrap_or_default();
        Self {
            secret: existing.secret,
            enabled: existing.enabled,
            temp_secret: Some(temp_secret),
        }
    }

    /// Promote the pending secret to permanent and enable the record.
    ///
    /// Returns false (and leaves the record untouched) when no setup is in
    /// progress.
    pub fn promote(&mut self) -> bool {
        match self.temp_secret.take() {
            Some(temp) => {
                self.secret = temp;
                self.enabled = true;
                true
            }
            None => false,
        }
    }

    /// Whether the record can gate a login right now.
    pub fn login_ready(&self) -> bool {
        self.enabled && !self.secret.is_empty()
    }

    /// Read-only status view.
    pub fn status(&self) -> MfaStatus {
        MfaStatus {
            enabled: self.enabled,
            has_secret: !self.secret.is_empty() || self.temp_secret.is_some(),
        }
    }
}

/// Status reported for an identifier, present in the registry or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaStatus {
    /// Whether the permanent secret is active for login gating
    pub enabled: bool,
    /// Whether any secret (permanent or pending) exists
    pub has_secret: bool,
}
