//! Signature verification endpoint.

use super::{field_as_str, field_missing, parse_body};
use crate::domain::error::ApiError;
use crate::service::AppState;
use axum::extract::State;
use axum::Json;
use signet_verification::VerificationOutcome;

/// POST `/api/v1/verify-signature`
///
/// Body: `{message, signature}`. Responds 200 with the verification outcome
/// whether or not the signature holds up; a bad signature is
/// `isValid: false`, not an error. Only a malformed request body is a 400.
pub async fn verify_signature(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<VerificationOutcome>, ApiError> {
    let body = parse_body(&body)?;

    if field_missing(&body, "message") || field_missing(&body, "signature") {
        return Err(ApiError::bad_request(
            "Missing required fields: message and signature",
        ));
    }

    let (Some(message), Some(signature)) = (
        field_as_str(&body, "message"),
        field_as_str(&body, "signature"),
    ) else {
        return Err(ApiError::bad_request(
            "Invalid field types: message and signature must be strings",
        ));
    };

    Ok(Json(state.verifier.verify_message(message, signature)))
}
