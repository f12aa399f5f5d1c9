//! # Session State Machine
//!
//! The four client-observed MFA states, derived per session observation.
//! Nothing here is stored: re-deriving from the same inputs is idempotent,
//! so callers can re-evaluate on every observation.
//!
//! ```text
//! first-time:  Disabled ──login──→ Setup ──verify_setup_code──→ Enabled
//! returning:   Disabled ──login──→ Verification ──verify_login_code──→ Enabled
//! ```

use serde::Serialize;

/// What the session layer knows at observation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionView {
    /// Whether the user is logged in at all.
    pub logged_in: bool,
    /// Registry status: is MFA enabled for this identifier?
    pub mfa_enabled: bool,
    /// Whether a setup or login code was accepted this session.
    pub second_factor_passed: bool,
}

/// Derived MFA state gating access to the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MfaState {
    /// No second factor in play (also the resting state when logged out).
    Disabled,
    /// Logged in without MFA: the user must establish it (or the caller may
    /// let them skip; a policy choice outside this crate).
    Setup,
    /// Logged in with MFA enabled: a login code is required before access.
    Verification,
    /// Second factor satisfied; access granted.
    Enabled,
}

impl MfaState {
    /// Derive the state from a session observation.
    pub fn derive(view: SessionView) -> Self {
        if !view.logged_in {
            return MfaState::Disabled;
        }
        if view.second_factor_passed {
            return MfaState::Enabled;
        }
        if view.mfa_enabled {
            MfaState::Verification
        } else {
            MfaState::Setup
        }
    }
}
