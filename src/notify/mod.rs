//! # Confirmation Email
//!
//! Builds the reservation confirmation message and delivers it through
//! SendGrid (primary, HTTP API) with authenticated STARTTLS SMTP as the
//! fallback transport. One synchronous attempt per transport, fixed
//! priority order, no retry and no queuing.

mod errors;
mod sender;
mod template;

pub use errors::{NotifyError, NotifyResult};
pub use sender::{Delivery, EmailConfig, Notifier};
pub use template::build_message;
