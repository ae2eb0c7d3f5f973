//! Configuration for the verification service.

use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Service configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// SMS provider configuration
    #[serde(default)]
    pub twilio: TwilioConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct TwilioConfig {
    /// Account SID used as the basic auth username
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Auth token used as the basic auth password
    #[serde(default)]
    pub auth_token: Option<SecretString>,

    /// Sender phone number
    #[serde(default)]
    pub from_number: Option<String>,

    /// REST API base URL
    #[serde(default = "default_twilio_api_url")]
    pub api_url: String,

    /// Upper bound on a single delivery attempt
    #[serde(default = "default_delivery_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Log codes instead of sending them
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma separated list of allowed origins
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            from_number: None,
            api_url: default_twilio_api_url(),
            timeout: default_delivery_timeout(),
            dry_run: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_twilio_api_url() -> String {
    twilio_client::DEFAULT_API_URL.into()
}

fn default_delivery_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_allowed_origins() -> String {
    "http://localhost:5173".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl TwilioConfig {
    /// Sender number, or a placeholder when running dry.
    pub fn sender_number(&self) -> Result<String> {
        match (&self.from_number, self.dry_run) {
            (Some(number), _) if !number.is_empty() => Ok(number.clone()),
            (_, true) => Ok("dry-run".into()),
            _ => bail!("TWILIO__FROM_NUMBER is not set"),
        }
    }
}

impl CorsConfig {
    /// Allowed origins as a list, ignoring blanks.
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
