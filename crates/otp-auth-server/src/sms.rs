//! Outbound SMS delivery.

use crate::config::TwilioConfig;
use anyhow::Context;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use twilio_client::{TwilioClient, TwilioError};

/// Failure to hand a message to the SMS provider.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("SMS provider error: {0}")]
    Provider(String),

    #[error("SMS delivery timed out after {0:?}")]
    Timeout(Duration),
}

impl From<TwilioError> for DeliveryError {
    fn from(e: TwilioError) -> Self {
        DeliveryError::Provider(e.to_string())
    }
}

/// Something that can deliver a text message to a phone number.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Attempt delivery of `body` from `from` to `to`. No retries.
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<(), DeliveryError>;
}

#[async_trait]
impl MessageSender for TwilioClient {
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<(), DeliveryError> {
        self.send_message(to, from, body).await?;
        Ok(())
    }
}

/// Sender that only logs messages. For local development without a provider.
#[derive(Debug, Default, Clone)]
pub struct LogSender;

#[async_trait]
impl MessageSender for LogSender {
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<(), DeliveryError> {
        info!(to = %to, from = %from, body = %body, "Dry run: SMS not sent");
        Ok(())
    }
}

/// Build the configured message sender.
pub fn build_sender(config: &TwilioConfig) -> anyhow::Result<Arc<dyn MessageSender>> {
    if config.dry_run {
        warn!("TWILIO__DRY_RUN is set, verification codes will be logged instead of sent");
        return Ok(Arc::new(LogSender));
    }

    let account_sid = config
        .account_sid
        .as_deref()
        .filter(|sid| !sid.is_empty())
        .context("TWILIO__ACCOUNT_SID is not set")?;
    let auth_token = config
        .auth_token
        .as_ref()
        .filter(|token| !token.expose_secret().is_empty())
        .context("TWILIO__AUTH_TOKEN is not set")?;

    let client = TwilioClient::new(
        account_sid,
        auth_token.expose_secret().as_str(),
        &config.api_url,
        config.timeout,
    )
    .context("Failed to create Twilio client")?;

    info!(account_sid = %client.account_sid(), "Twilio sender configured");
    Ok(Arc::new(client))
}
