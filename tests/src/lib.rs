//! # Signet Test Suite
//!
//! Unified test crate containing:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── api.rs        # End-to-end over HTTP (real listener + client)
//!     └── mfa_flows.rs  # Registry + state machine journeys, race behavior
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p signet-tests
//!
//! # By category
//! cargo test -p signet-tests integration::api::
//! cargo test -p signet-tests integration::mfa_flows::
//! ```

pub mod integration;
