//! Twilio REST API types.

use serde::{Deserialize, Serialize};

/// Form body for creating an outbound message.
#[derive(Debug, Serialize)]
pub struct CreateMessage<'a> {
    #[serde(rename = "To")]
    pub to: &'a str,
    #[serde(rename = "From")]
    pub from: &'a str,
    #[serde(rename = "Body")]
    pub body: &'a str,
}

/// Message resource returned by the Messages endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResource {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_code: Option<u32>,
}

/// Error body returned by Twilio on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u32>,
    pub message: String,
}
