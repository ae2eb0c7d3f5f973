//! OTP lifecycle: issue, verify, and check.
//!
//! Per phone number the flow is `NoCode -> CodeIssued -> Verified`. A number
//! can be re-issued a code from any state; a verified number stays verified.

use crate::code::CodeGenerator;
use crate::error::AuthError;
use crate::sms::{DeliveryError, MessageSender};
use crate::store::{OtpStore, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use subtle::ConstantTimeEq;
use tracing::{info, instrument, warn};

/// Orchestrates the two stores and the message sender.
pub struct OtpService {
    otps: Arc<OtpStore>,
    sessions: Arc<SessionStore>,
    codes: CodeGenerator,
    sender: Arc<dyn MessageSender>,
    from_number: String,
    delivery_timeout: Duration,
}

impl OtpService {
    /// Create a new service with a freshly seeded code generator.
    pub fn new(
        otps: Arc<OtpStore>,
        sessions: Arc<SessionStore>,
        sender: Arc<dyn MessageSender>,
        from_number: impl Into<String>,
        delivery_timeout: Duration,
    ) -> Self {
        Self {
            otps,
            sessions,
            codes: CodeGenerator::new(),
            sender,
            from_number: from_number.into(),
            delivery_timeout,
        }
    }

    /// Replace the code generator.
    pub fn with_code_generator(mut self, codes: CodeGenerator) -> Self {
        self.codes = codes;
        self
    }

    pub fn otp_store(&self) -> &OtpStore {
        &self.otps
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.sessions
    }

    /// Issue a new code and send it by SMS.
    ///
    /// The code is stored before delivery starts and stays stored if delivery
    /// fails; calling again replaces it.
    #[instrument(skip(self))]
    pub async fn send_otp(&self, phone_number: &str) -> Result<(), AuthError> {
        let code = self.codes.generate();
        self.otps.set(phone_number, code.as_str());

        let body = format!("Your verification code is: {}", code);
        let delivery = self.sender.send(phone_number, &self.from_number, &body);

        match tokio::time::timeout(self.delivery_timeout, delivery).await {
            Ok(Ok(())) => {
                info!(phone_number = %phone_number, "Verification code sent");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!(phone_number = %phone_number, error = %e, "Error sending SMS");
                Err(AuthError::Delivery(e))
            }
            Err(_) => {
                warn!(phone_number = %phone_number, timeout = ?self.delivery_timeout, "SMS delivery timed out");
                Err(AuthError::Delivery(DeliveryError::Timeout(self.delivery_timeout)))
            }
        }
    }

    /// Check a submitted code and mark the number verified on match.
    #[instrument(skip(self, submitted))]
    pub fn verify_otp(&self, phone_number: &str, submitted: &str) -> Result<(), AuthError> {
        let stored = self.otps.get(phone_number).ok_or_else(|| {
            warn!(phone_number = %phone_number, "Verification attempted with no code on record");
            AuthError::OtpNotFound
        })?;

        if !bool::from(stored.as_bytes().ct_eq(submitted.as_bytes())) {
            warn!(phone_number = %phone_number, "Verification code mismatch");
            return Err(AuthError::OtpMismatch);
        }

        self.sessions.create(phone_number);
        if !self.otps.delete_if_matches(phone_number, &stored) {
            // A concurrent send replaced the code; keep the newer one.
            warn!(phone_number = %phone_number, "Code was re-issued during verification");
        }

        info!(phone_number = %phone_number, "Phone number verified");
        Ok(())
    }

    /// Whether the number has completed verification.
    pub fn check_auth(&self, phone_number: &str) -> bool {
        self.sessions.exists(phone_number)
    }
}
