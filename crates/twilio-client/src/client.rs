//! Twilio HTTP client.

use crate::error::TwilioError;
use crate::types::*;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Default Twilio REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.twilio.com";

/// Twilio Programmable Messaging client.
///
/// The auth token is stored using `SecretString` so it never shows up in
/// logs or debug output.
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: SecretString,
}

impl TwilioClient {
    /// Create a new Twilio client.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TwilioError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_sid: account_sid.into(),
            auth_token: SecretString::new(auth_token.into()),
        })
    }

    /// Get the configured account SID.
    pub fn account_sid(&self) -> &str {
        &self.account_sid
    }

    /// Send an SMS from `from` to `to`.
    #[instrument(skip(self, body))]
    pub async fn send_message(
        &self,
        to: &str,
        from: &str,
        body: &str,
    ) -> Result<MessageResource, TwilioError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url,
            encode(&self.account_sid)
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .form(&CreateMessage { to, from, body })
            .send()
            .await?;

        let message: MessageResource = self.handle_response(response).await?;
        debug!(
            sid = %message.sid,
            status = ?message.status,
            error_code = ?message.error_code,
            "Message accepted by Twilio"
        );
        Ok(message)
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TwilioError> {
        if response.status().is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(TwilioError::from)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract error information from failed response.
    async fn extract_error(&self, response: reqwest::Response) -> TwilioError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Twilio rejected credentials");
            return TwilioError::Unauthorized;
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".into());
        warn!(status = %status, body = %text, "Twilio request failed");

        match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => TwilioError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.message,
            },
            Err(_) => TwilioError::Api {
                status: status.as_u16(),
                code: None,
                message: text,
            },
        }
    }
}

impl fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioClient")
            .field("base_url", &self.base_url)
            .field("account_sid", &self.account_sid)
            .finish_non_exhaustive()
    }
}
