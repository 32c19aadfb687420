//! # Email Sender
//!
//! Two-tier delivery: SendGrid over HTTP first, authenticated STARTTLS
//! SMTP as fallback. The outcome is reported as a status string that is
//! persisted on the reservation record.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use reqwest::StatusCode;
use serde_json::json;
use tracing::{error, warn};

use super::errors::{NotifyError, NotifyResult};

/// SendGrid v3 mail send endpoint
pub const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Timeout for the primary-provider call. The SMTP path carries no
/// explicit timeout.
const PRIMARY_TIMEOUT: Duration = Duration::from_secs(10);

/// Email transport configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SendGrid API key; empty disables the primary transport
    pub sendgrid_api_key: String,

    /// SendGrid send endpoint (overridable for tests)
    pub sendgrid_url: String,

    /// Sender address used by both transports
    pub from_email: String,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port
    pub smtp_port: u16,

    /// SMTP username; empty disables the fallback transport
    pub smtp_user: String,

    /// SMTP password
    pub smtp_pass: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sendgrid_api_key: String::new(),
            sendgrid_url: SENDGRID_SEND_URL.to_string(),
            from_email: String::new(),
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_user: String::new(),
            smtp_pass: String::new(),
        }
    }
}

impl EmailConfig {
    fn has_primary(&self) -> bool {
        !self.sendgrid_api_key.is_empty()
    }

    fn has_smtp(&self) -> bool {
        !self.smtp_user.is_empty() && !self.smtp_pass.is_empty()
    }
}

/// Outcome of a delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Whether the message was handed off to a transport successfully
    pub delivered: bool,

    /// Status string persisted on the reservation record
    pub status: String,
}

impl Delivery {
    fn sent(label: &str) -> Self {
        Self {
            delivered: true,
            status: format!("sent ({})", label),
        }
    }

    fn failed(status: impl Into<String>) -> Self {
        Self {
            delivered: false,
            status: status.into(),
        }
    }
}

/// Confirmation email sender
pub struct Notifier {
    config: EmailConfig,
    http: reqwest::Client,
}

impl Notifier {
    /// Create a notifier for the given transport configuration
    pub fn new(config: EmailConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(PRIMARY_TIMEOUT)
            .build()
            .expect("http client construction");
        Self { config, http }
    }

    /// Attempt delivery: SendGrid first, then SMTP. Exactly one attempt
    /// per transport; a SendGrid failure falls through to SMTP, an SMTP
    /// failure is terminal.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Delivery {
        if self.config.has_primary() {
            match self.send_via_sendgrid(to, subject, html).await {
                Ok(()) => return Delivery::sent("SendGrid"),
                Err(e) => warn!("SendGrid delivery failed: {}", e),
            }
        }

        if self.config.has_smtp() {
            return match self.send_via_smtp(to, subject, html).await {
                Ok(()) => Delivery::sent("SMTP"),
                Err(e) => {
                    error!("SMTP delivery failed: {}", e);
                    Delivery::failed(format!("error: {}", e))
                }
            };
        }

        Delivery::failed("no email service configured")
    }

    async fn send_via_sendgrid(&self, to: &str, subject: &str, html: &str) -> NotifyResult<()> {
        let payload = json!({
            "personalizations": [{
                "to": [{"email": to}],
                "subject": subject,
            }],
            "from": {"email": self.config.from_email},
            "content": [
                {"type": "text/html", "value": html}
            ],
        });

        let resp = self
            .http
            .post(&self.config.sendgrid_url)
            .bearer_auth(&self.config.sendgrid_api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::OK || status == StatusCode::ACCEPTED {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(NotifyError::Provider {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn send_via_smtp(&self, to: &str, subject: &str, html: &str) -> NotifyResult<()> {
        let email = Message::builder()
            .from(self.config.from_email.parse::<Mailbox>()?)
            .to(to.parse::<Mailbox>()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())?;

        let creds = Credentials::new(
            self.config.smtp_user.clone(),
            self.config.smtp_pass.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();

        mailer.send(email).await?;
        Ok(())
    }
}
