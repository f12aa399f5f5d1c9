//! API Gateway service - router assembly and server lifecycle.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::middleware::create_cors_layer;
use crate::rest;
use axum::routing::{get, post};
use axum::{Json, Router};
use signet_mfa::MfaApi;
use signet_verification::SignatureVerificationApi;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Signature verification subsystem
    pub verifier: Arc<dyn SignatureVerificationApi>,
    /// MFA registry subsystem
    pub mfa: Arc<dyn MfaApi>,
}

/// Build the REST router with the full middleware stack.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.limits.max_request_size))
        .layer(TimeoutLayer::new(config.timeouts.request()))
        .layer(create_cors_layer(&config.cors));

    Router::new()
        .route("/", get(root_info))
        .route("/health", get(health_check))
        .route(
            "/api/v1/verify-signature",
            post(rest::verification::verify_signature),
        )
        .route("/api/v1/mfa/setup", post(rest::mfa::setup))
        .route("/api/v1/mfa/verify-setup", post(rest::mfa::verify_setup))
        .route("/api/v1/mfa/verify-login", post(rest::mfa::verify_login))
        .route("/api/v1/mfa/disable", post(rest::mfa::disable))
        .route("/api/v1/mfa/status", get(rest::mfa::status))
        .layer(middleware)
        .with_state(state)
}

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    shutdown_rx: Option<oneshot::Receiver<()>>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service over the two subsystem ports.
    pub fn new(
        config: GatewayConfig,
        verifier: Arc<dyn SignatureVerificationApi>,
        mfa: Arc<dyn MfaApi>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        Ok(Self {
            config,
            state: AppState { verifier, mfa },
            shutdown_tx: Some(shutdown_tx),
            shutdown_rx: Some(shutdown_rx),
        })
    }

    /// The assembled router, for embedding or serving on a caller-owned
    /// listener.
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Detach the shutdown trigger so another task can stop the server
    /// (e.g. a Ctrl+C handler). Returns `None` once taken.
    pub fn shutdown_trigger(&mut self) -> Option<oneshot::Sender<()>> {
        self.shutdown_tx.take()
    }

    /// Bind and serve until the shutdown trigger fires or the server errors.
    pub async fn start(&mut self) -> Result<(), GatewayError> {
        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let shutdown_rx = self.shutdown_rx.take();

        info!(addr = %local_addr, "API gateway listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                match shutdown_rx {
                    Some(rx) => {
                        let _ = rx.await;
                        info!("Received shutdown signal");
                    }
                    // Trigger already consumed by a previous run: serve
                    // until the task is dropped
                    None => std::future::pending().await,
                }
            })
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("API gateway stopped");
        Ok(())
    }

    /// Trigger graceful shutdown from the owning task.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Root informational endpoint
async fn root_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Web3 Signature Verifier API",
        "version": crate::VERSION,
    }))
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
