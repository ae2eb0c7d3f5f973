//! API request and response types.

use crate::error::AuthError;
use serde::{Deserialize, Serialize};

/// Request to issue a verification code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub phone_number: Option<String>,
}

/// Request to confirm a verification code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone_number: Option<String>,
    pub otp: Option<String>,
}

/// Query parameter carrying the phone number for the authentication check.
pub const PHONE_NUMBER_PARAM: &str = "phoneNumber";

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
    pub success: bool,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }
}

/// Authentication check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAuthResponse {
    pub is_authenticated: bool,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub pending_codes: usize,
    pub verified_sessions: usize,
}

/// First value of a repeatable query parameter.
pub(crate) fn first_param(pairs: Vec<(String, String)>, name: &str) -> Option<String> {
    pairs
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Require a present, non-empty field.
pub(crate) fn required(value: Option<String>, message: &str) -> Result<String, AuthError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthError::invalid_request(message))
}
