//! Error types for the verification service.

use crate::sms::DeliveryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the request handlers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed request fields.
    #[error("{0}")]
    InvalidRequest(String),

    /// No code on record for the phone number.
    #[error("No OTP found for this phone number")]
    OtpNotFound,

    /// Submitted code differs from the stored one.
    #[error("Invalid OTP")]
    OtpMismatch,

    /// The SMS provider did not accept the message.
    #[error("Failed to send OTP")]
    Delivery(#[source] DeliveryError),
}

impl AuthError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        AuthError::InvalidRequest(message.into())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            AuthError::OtpNotFound => (StatusCode::BAD_REQUEST, "OTP_NOT_FOUND"),
            AuthError::OtpMismatch => (StatusCode::BAD_REQUEST, "INVALID_OTP"),
            AuthError::Delivery(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DELIVERY_FAILED"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DeliveryError> for AuthError {
    fn from(e: DeliveryError) -> Self {
        AuthError::Delivery(e)
    }
}
