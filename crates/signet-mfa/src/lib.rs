//! # MFA Registry Subsystem
//!
//! Time-based one-time-password (TOTP) second factor: per-identifier secret
//! lifecycle, code validation, and the derived session state machine.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): pure TOTP computation, record lifecycle,
//!   state derivation; no storage, no clock beyond explicit timestamps
//! - **Ports Layer** (`ports/`): the inbound registry API and the outbound
//!   key-value storage seam
//! - **Adapters Layer** (`adapters/`): in-memory concurrent store
//! - **Service Layer** (`service.rs`): the registry wiring domain to storage
//!
//! ## Secret lifecycle
//!
//! ```text
//! generate_secret ──→ temp_secret pending
//!        │                  │ verify_setup_code (valid)
//!        │ (re-issue        ▼
//!        │  overwrites)  secret permanent, enabled
//!        │                  │ verify_login_code (read-only)
//!        ▼                  ▼
//!      disable ──→ record removed (idempotent)
//! ```
//!
//! Rejected codes and internal failures are kept distinguishable: registry
//! operations return `Result<bool, MfaError>`, never a collapsed `false`.

pub mod adapters;
pub mod domain;
pub mod ports;

mod service;

// Re-export public API
pub use adapters::memory::InMemoryMfaStore;
pub use domain::errors::MfaError;
pub use domain::records::{MfaRecord, MfaStatus};
pub use domain::state::{MfaState, SessionView};
pub use domain::totp::{ProvisionedSecret, TotpConfig};
pub use ports::inbound::MfaApi;
pub use ports::outbound::MfaStore;
pub use service::MfaRegistry;
