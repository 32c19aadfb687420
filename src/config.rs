//! # Application Configuration
//!
//! Immutable configuration read once from the environment at startup.
//!
//! Every value has a serde default so an empty environment yields a working
//! local setup (no email transport configured, datastore in the working
//! directory). A `.env` file is honored when present.

use serde::Deserialize;
use thiserror::Error;

use crate::notify::EmailConfig;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be deserialized
    #[error("invalid environment configuration: {0}")]
    Env(#[from] envy::Error),
}

/// Application configuration (datastore + email transports)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Path of the SQLite datastore file (default: "reservations.db")
    #[serde(default = "default_db_file")]
    pub db_file: String,

    /// SendGrid API key; empty means the primary transport is unconfigured
    #[serde(default)]
    pub sendgrid_api_key: String,

    /// Sender address; falls back to `smtp_user` when empty
    #[serde(default)]
    pub email_from: String,

    /// SMTP relay host
    #[serde(default)]
    pub smtp_host: String,

    /// SMTP relay port (default: 587, STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username; empty means the fallback transport is unconfigured
    #[serde(default)]
    pub smtp_user: String,

    /// SMTP password
    #[serde(default)]
    pub smtp_pass: String,
}

fn default_db_file() -> String {
    "reservations.db".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_file: default_db_file(),
            sendgrid_api_key: String::new(),
            email_from: String::new(),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_user: String::new(),
            smtp_pass: String::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment (and `.env` when present)
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env::<AppConfig>()?)
    }

    /// Build the notifier configuration.
    ///
    /// Values are trimmed, and the sender address falls back to the SMTP
    /// username when `EMAIL_FROM` is unset.
    pub fn email_config(&self) -> EmailConfig {
        let email_from = self.email_from.trim();
        let smtp_user = self.smtp_user.trim();
        let from_email = if email_from.is_empty() {
            smtp_user
        } else {
            email_from
        };

        EmailConfig {
            sendgrid_api_key: self.sendgrid_api_key.trim().to_string(),
            from_email: from_email.to_string(),
            smtp_host: self.smtp_host.trim().to_string(),
            smtp_port: self.smtp_port,
            smtp_user: smtp_user.to_string(),
            smtp_pass: self.smtp_pass.trim().to_string(),
            ..EmailConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_file, "reservations.db");
        assert_eq!(config.smtp_port, 587);
        assert!(config.sendgrid_api_key.is_empty());
    }

    #[test]
    fn test_sender_falls_back_to_smtp_user() {
        let config = AppConfig {
            smtp_user: "host@babylon.example".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.email_config().from_email, "host@babylon.example");
    }

    #[test]
    fn test_explicit_sender_wins() {
        let config = AppConfig {
            email_from: "reservations@babylon.example".to_string(),
            smtp_user: "host@babylon.example".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.email_config().from_email,
            "reservations@babylon.example"
        );
    }

    #[test]
    fn test_values_are_trimmed() {
        let config = AppConfig {
            sendgrid_api_key: "  SG.key  ".to_string(),
            smtp_host: " smtp.example.com ".to_string(),
            ..AppConfig::default()
        };
        let email = config.email_config();
        assert_eq!(email.sendgrid_api_key, "SG.key");
        assert_eq!(email.smtp_host, "smtp.example.com");
    }
}
