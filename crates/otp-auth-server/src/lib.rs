//! Phone number verification service.
//!
//! Issues 6-digit one-time codes over SMS and remembers which phone numbers
//! confirmed them. All state is in memory and lost on restart.

pub mod api;
pub mod code;
pub mod config;
pub mod error;
pub mod service;
pub mod sms;
pub mod store;

pub use code::CodeGenerator;
pub use config::Config;
pub use error::AuthError;
pub use service::OtpService;
pub use sms::{DeliveryError, LogSender, MessageSender};
pub use store::{OtpStore, SessionStore};
