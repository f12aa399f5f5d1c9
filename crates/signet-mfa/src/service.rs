//! # MFA Registry Service
//!
//! Wires the pure TOTP domain logic to a storage port. All operations are
//! request-scoped and synchronous; the store provides the concurrency
//! guarantees (per-identifier safety, last-write-wins on races).

use crate::domain::errors::MfaError;
use crate::domain::records::{MfaRecord, MfaStatus};
use crate::domain::totp::{self, ProvisionedSecret, TotpConfig};
use crate::ports::inbound::MfaApi;
use crate::ports::outbound::MfaStore;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// The MFA registry: secret lifecycle and code validation per identifier.
pub struct MfaRegistry<S: MfaStore> {
    store: S,
    config: TotpConfig,
}

impl<S: MfaStore> MfaRegistry<S> {
    /// Registry with default TOTP parameters.
    pub fn new(store: S) -> Self {
        Self::with_config(store, TotpConfig::default())
    }

    /// Registry with explicit TOTP parameters.
    pub fn with_config(store: S, config: TotpConfig) -> Self {
        Self { store, config }
    }

    /// The TOTP parameters in effect.
    pub fn config(&self) -> &TotpConfig {
        &self.config
    }

    /// Validate a setup code at an explicit Unix timestamp.
    ///
    /// The clock-free twin of [`MfaApi::verify_setup_code`], used by tests
    /// that pin the window.
    pub fn verify_setup_code_at(
        &self,
        user_identifier: &str,
        token: &str,
        time: u64,
    ) -> Result<bool, MfaError> {
        let Some(mut record) = self.store.get(user_identifier) else {
            warn!(user = user_identifier, "setup code for unknown identifier");
            return Ok(false);
        };
        let Some(temp_secret) = record.temp_secret.clone() else {
            warn!(user = user_identifier, "no setup in progress");
            return Ok(false);
        };

        let accepted = totp::check_code(&self.config, &temp_secret, user_identifier, token, time)?;
        if accepted {
            record.promote();
            self.store.put(user_identifier, record);
            info!(user = user_identifier, "MFA enabled");
        }

        Ok(accepted)
    }

    /// Validate a login code at an explicit Unix timestamp.
    pub fn verify_login_code_at(
        &self,
        user_identifier: &str,
        token: &str,
        time: u64,
    ) -> Result<bool, MfaError> {
        let Some(record) = self.store.get(user_identifier) else {
            return Ok(false);
        };
        if !record.login_ready() {
            warn!(user = user_identifier, "login code while MFA not enabled");
            return Ok(false);
        }

        totp::check_code(&self.config, &record.secret, user_identifier, token, time)
    }

    fn unix_now() -> Result<u64, MfaError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| MfaError::Clock(e.to_string()))
    }
}

impl<S: MfaStore> MfaApi for MfaRegistry<S> {
    fn generate_secret(&self, user_identifier: &str) -> Result<ProvisionedSecret, MfaError> {
        let provisioned = totp::generate_secret(&self.config, user_identifier)?;

        // Preserve an existing permanent secret; only the pending slot is
        // replaced. Racing issuers resolve last-write-wins at the store.
        let existing = self.store.get(user_identifier);
        let record = MfaRecord::with_pending(existing, provisioned.secret.clone());
        self.store.put(user_identifier, record);

        info!(user = user_identifier, "MFA secret generated");
        Ok(provisioned)
    }

    fn verify_setup_code(&self, user_identifier: &str, token: &str) -> Result<bool, MfaError> {
        let now = Self::unix_now()?;
        self.verify_setup_code_at(user_identifier, token, now)
    }

    fn verify_login_code(&self, user_identifier: &str, token: &str) -> Result<bool, MfaError> {
        let now = Self::unix_now()?;
        let accepted = self.verify_login_code_at(user_identifier, token, now)?;
        info!(
            user = user_identifier,
            accepted, "MFA login verification"
        );
        Ok(accepted)
    }

    fn disable(&self, user_identifier: &str) -> bool {
        self.store.remove(user_identifier);
        info!(user = user_identifier, "MFA disabled");
        // Removing an absent record is still success: the end state is
        // identical either way
        true
    }

    fn status(&self, user_identifier: &str) -> MfaStatus {
        self.store
            .get(user_identifier)
            .map(|record| record.status())
            .unwrap_or_default()
    }

    fn is_enabled(&self, user_identifier: &str) -> bool {
        self.status(user_identifier).enabled
    }
}
