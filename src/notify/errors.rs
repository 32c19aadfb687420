//! # Notify Errors
//!
//! Error types for the email delivery module. These never escape the
//! notifier: every failure is folded into the delivery outcome string.

use thiserror::Error;

/// Result type for transport attempts
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Email delivery errors
#[derive(Debug, Error)]
pub enum NotifyError {
    /// SendGrid answered with a non-success status
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// SendGrid request could not be completed
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A sender or recipient address did not parse
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled
    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// The SMTP exchange failed (connect, STARTTLS, auth, or send)
    #[error("smtp failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
