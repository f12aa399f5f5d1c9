//! # API Gateway
//!
//! The external REST interface for signature verification and MFA.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       API GATEWAY                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │              Middleware Stack                       │  │
//! │  │      CORS → Trace → Timeout → Body Limit           │  │
//! │  └───────────────────────┬────────────────────────────┘  │
//! │                          │                                │
//! │  ┌───────────────────────┴────────────────────────────┐  │
//! │  │                REST Handlers                        │  │
//! │  │  /api/v1/verify-signature   /api/v1/mfa/*          │  │
//! │  └──────────┬──────────────────────────┬──────────────┘  │
//! └─────────────┼──────────────────────────┼─────────────────┘
//!               ▼                          ▼
//!     signet-verification             signet-mfa
//!     (SignatureVerificationApi)      (MfaApi)
//! ```
//!
//! The handlers parse request bodies themselves so boundary validation
//! produces exact, descriptive 400s before any subsystem is reached. Wrong
//! codes surface as 401, internal subsystem failures as 500; nothing here is
//! fatal to the process.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod rest;
pub mod service;

// Re-exports for public API
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, GatewayError};
pub use service::{build_router, ApiGatewayService, AppState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
