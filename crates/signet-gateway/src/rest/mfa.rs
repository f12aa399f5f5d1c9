//! MFA endpoints.
//!
//! The user identifier in the body is the trust anchor: there is no session
//! token in this contract, so these endpoints must stay behind whatever
//! authenticates the caller in a real deployment.

use super::{field_as_str, field_missing, parse_body};
use crate::domain::error::ApiError;
use crate::domain::types::{MfaActionResponse, MfaSetupResponse};
use crate::service::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;
use signet_mfa::domain::totp::token_is_well_formed;
use signet_mfa::MfaStatus;
use std::collections::HashMap;
use tracing::error;

/// POST `/api/v1/mfa/setup`
///
/// Issues a fresh pending secret for the identifier and returns the
/// provisioning material (base32 secret + QR data URI).
pub async fn setup(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<MfaSetupResponse>, ApiError> {
    let body = parse_body(&body)?;
    let user = user_identifier(
        &body,
        "Missing required field: userIdentifier (email or wallet address)",
    )?;

    let provisioned = state.mfa.generate_secret(user).map_err(|e| {
        error!(error = %e, "MFA setup failed");
        ApiError::internal("Failed to setup MFA", e.to_string())
    })?;

    Ok(Json(MfaSetupResponse {
        secret: provisioned.secret,
        qr_code_uri: provisioned.qr_code_uri,
        message: "MFA setup initiated. Please verify with your authenticator app.".to_string(),
    }))
}

/// POST `/api/v1/mfa/verify-setup`
///
/// Validates a setup code; on acceptance the pending secret becomes
/// permanent and MFA is enabled for the identifier.
pub async fn verify_setup(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<MfaActionResponse>, ApiError> {
    let body = parse_body(&body)?;
    let (user, token) = token_request(&body)?;

    match state.mfa.verify_setup_code(user, token) {
        Ok(true) => Ok(Json(MfaActionResponse::ok("MFA enabled successfully"))),
        Ok(false) => Err(ApiError::unauthorized("Invalid verification code")),
        Err(e) => {
            error!(error = %e, "MFA setup verification failed");
            Err(ApiError::internal(
                "Failed to verify MFA setup",
                e.to_string(),
            ))
        }
    }
}

/// POST `/api/v1/mfa/verify-login`
///
/// Validates a login code against the identifier's permanent secret.
pub async fn verify_login(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<MfaActionResponse>, ApiError> {
    let body = parse_body(&body)?;
    let (user, token) = token_request(&body)?;

    match state.mfa.verify_login_code(user, token) {
        Ok(true) => Ok(Json(MfaActionResponse::ok("MFA verification successful"))),
        Ok(false) => Err(ApiError::unauthorized("Invalid verification code")),
        Err(e) => {
            error!(error = %e, "MFA login verification failed");
            Err(ApiError::internal(
                "Failed to verify MFA login",
                e.to_string(),
            ))
        }
    }
}

/// POST `/api/v1/mfa/disable`
///
/// Removes the identifier's record. Idempotent: disabling an identifier
/// that was never set up still succeeds.
pub async fn disable(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<MfaActionResponse>, ApiError> {
    let body = parse_body(&body)?;
    let user = user_identifier(&body, "Missing required field: userIdentifier")?;

    state.mfa.disable(user);
    Ok(Json(MfaActionResponse::ok("MFA disabled successfully")))
}

/// GET `/api/v1/mfa/status?userIdentifier=...`
pub async fn status(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<MfaStatus>, ApiError> {
    let Some(user) = params.get("userIdentifier").filter(|s| !s.is_empty()) else {
        return Err(ApiError::bad_request(
            "Missing required query parameter: userIdentifier",
        ));
    };

    Ok(Json(state.mfa.status(user)))
}

/// Extract a non-empty string `userIdentifier` or fail with the endpoint's
/// 400 message.
fn user_identifier<'a>(body: &'a Value, missing_msg: &str) -> Result<&'a str, ApiError> {
    field_as_str(body, "userIdentifier")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request(missing_msg))
}

/// Extract and shape-check `{userIdentifier, token}` for the verify
/// endpoints. The token must be exactly six decimal digits before it is
/// allowed anywhere near the registry.
fn token_request<'a>(body: &'a Value) -> Result<(&'a str, &'a str), ApiError> {
    if field_missing(body, "userIdentifier") || field_missing(body, "token") {
        return Err(ApiError::bad_request(
            "Missing required fields: userIdentifier and token",
        ));
    }

    let (Some(user), Some(token)) = (
        field_as_str(body, "userIdentifier"),
        field_as_str(body, "token"),
    ) else {
        return Err(ApiError::bad_request(
            "Invalid field types: userIdentifier and token must be strings",
        ));
    };

    if !token_is_well_formed(token) {
        return Err(ApiError::bad_request("Token must be a 6-digit string"));
    }

    Ok((user, token))
}
