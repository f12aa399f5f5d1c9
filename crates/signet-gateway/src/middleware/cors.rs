//! CORS middleware.
//!
//! Wrapper around tower-http CORS with gateway configuration. The default
//! policy admits only the configured frontend origin, with credentials.

use crate::domain::config::CorsConfig;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer as TowerCorsLayer};

/// Create a CORS layer from gateway config
pub fn create_cors_layer(config: &CorsConfig) -> TowerCorsLayer {
    if !config.enabled {
        return TowerCorsLayer::very_permissive();
    }

    let wildcard = config.allowed_origins.iter().any(|o| o == "*");

    let mut cors = TowerCorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if wildcard {
        // A wildcard origin cannot be combined with credentials
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
        if config.allow_credentials {
            cors = cors.allow_credentials(true);
        }
    }

    cors
}
