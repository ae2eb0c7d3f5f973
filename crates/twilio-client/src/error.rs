//! Twilio client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwilioError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        /// Twilio error code (e.g. 21211 for an invalid `To` number)
        code: Option<u32>,
        message: String,
    },
}
