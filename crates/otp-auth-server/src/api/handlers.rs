//! HTTP request handlers.

use super::types::{
    first_param, required, CheckAuthResponse, HealthResponse, SendOtpRequest, SuccessResponse,
    VerifyOtpRequest, PHONE_NUMBER_PARAM,
};
use super::AppState;
use crate::error::AuthError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::{debug, info};

const INVALID_REQUEST_FORMAT: &str = "Invalid request format";

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        pending_codes: state.service.otp_store().len(),
        verified_sessions: state.service.session_store().len(),
    })
}

/// Issue a code and send it to the phone number.
pub async fn send_otp(
    State(state): State<AppState>,
    payload: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AuthError> {
    let Json(request) = payload.map_err(|e| {
        debug!(error = %e, "Rejected send-otp body");
        AuthError::invalid_request(INVALID_REQUEST_FORMAT)
    })?;
    let phone_number = required(request.phone_number, "Phone number is required")?;
    info!(phone_number = %phone_number, "Send OTP request received");

    state.service.send_otp(&phone_number).await?;

    Ok(Json(SuccessResponse::new("OTP sent successfully")))
}

/// Confirm a submitted code.
pub async fn verify_otp(
    State(state): State<AppState>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AuthError> {
    let Json(request) = payload.map_err(|e| {
        debug!(error = %e, "Rejected verify-otp body");
        AuthError::invalid_request(INVALID_REQUEST_FORMAT)
    })?;
    let phone_number = required(request.phone_number, "Phone number is required")?;
    let otp = required(request.otp, "OTP is required")?;
    info!(phone_number = %phone_number, "Verify OTP request received");

    state.service.verify_otp(&phone_number, &otp)?;

    Ok(Json(SuccessResponse::new("OTP verified successfully")))
}

/// Report whether a phone number has been verified.
///
/// A repeated `phoneNumber` parameter is answered using its first value.
pub async fn check_auth(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<CheckAuthResponse>, AuthError> {
    let Query(pairs) = query.map_err(|_| AuthError::invalid_request(INVALID_REQUEST_FORMAT))?;
    let phone_number = required(
        first_param(pairs, PHONE_NUMBER_PARAM),
        "Phone number is required",
    )?;

    Ok(Json(CheckAuthResponse {
        is_authenticated: state.service.check_auth(&phone_number),
    }))
}
