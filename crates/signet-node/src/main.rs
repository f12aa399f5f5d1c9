//! # Signet Node
//!
//! The main entry point for the Signet service: a Web3 signature
//! verification gateway with a TOTP second factor.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG` controls the filter)
//! 2. Load configuration from the environment
//! 3. Wire subsystems: in-memory MFA store → registry, verification service
//! 4. Start the API gateway and serve until Ctrl+C
//!
//! ## Environment
//!
//! - `SIGNET_HTTP_PORT` / `PORT`: listen port (default 3000)
//! - `SIGNET_HTTP_HOST` / `HOST`: bind address (default 0.0.0.0)
//! - `SIGNET_CORS_ORIGIN`: allowed frontend origin
//!   (default `http://localhost:5173`)
//! - `SIGNET_MFA_ISSUER`: issuer label in authenticator apps
//!   (default `Web3 Signer`)

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use signet_gateway::{ApiGatewayService, GatewayConfig};
use signet_mfa::{InMemoryMfaStore, MfaRegistry, TotpConfig};
use signet_verification::VerificationService;

/// Load configuration from environment variables over defaults.
fn load_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();

    let port_var = std::env::var("SIGNET_HTTP_PORT").or_else(|_| std::env::var("PORT"));
    if let Ok(port) = port_var {
        match port.parse() {
            Ok(p) => config.http.port = p,
            Err(_) => warn!(%port, "ignoring unparseable port from environment"),
        }
    }

    let host_var = std::env::var("SIGNET_HTTP_HOST").or_else(|_| std::env::var("HOST"));
    if let Ok(host) = host_var {
        match host.parse() {
            Ok(h) => config.http.host = h,
            Err(_) => warn!(%host, "ignoring unparseable host from environment"),
        }
    }

    if let Ok(origin) = std::env::var("SIGNET_CORS_ORIGIN") {
        config.cors.allowed_origins = vec![origin];
    }

    if let Ok(issuer) = std::env::var("SIGNET_MFA_ISSUER") {
        config.mfa.issuer = issuer;
    }

    config
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("===========================================");
    info!("  Signet v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    // Load configuration
    let config = load_config();
    info!(addr = %config.http_addr(), "Configuration loaded");

    // Wire subsystems. Storage is in-memory: MFA records live for the
    // lifetime of the process.
    let verifier = Arc::new(VerificationService::new());
    let registry = Arc::new(MfaRegistry::with_config(
        InMemoryMfaStore::new(),
        TotpConfig::new(config.mfa.issuer.clone()),
    ));

    let mut gateway = ApiGatewayService::new(config, verifier, registry)
        .context("failed to construct API gateway")?;

    // Serve until Ctrl+C
    let shutdown = gateway
        .shutdown_trigger()
        .context("shutdown trigger already taken")?;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, shutting down");
        }
        let _ = shutdown.send(());
    });

    gateway.start().await.context("API gateway exited with error")?;

    info!("Shutdown complete");
    Ok(())
}
