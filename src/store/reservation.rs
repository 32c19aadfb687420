//! # Reservation Record
//!
//! The single persisted entity: one row per accepted reservation request.

use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status assigned at creation; nothing transitions it later
pub const STATUS_PENDING: &str = "pending";

/// Initial email status before the notification attempt completes
pub const EMAIL_NOT_SENT: &str = "not sent";

/// A persisted reservation record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Reservation {
    /// UUID v4, generated at creation, immutable
    pub id: String,

    /// RFC 3339 creation timestamp, set once at insert
    pub created_at: String,

    pub name: String,
    pub phone: String,
    pub email: String,

    /// Guest count, validated positive at the request boundary
    pub guests: i64,

    /// Requested date, stored as supplied
    pub date: String,

    /// Requested time of day, validated against the service window
    pub time: String,

    /// Always "pending" at creation
    pub status: String,

    /// Outcome of the most recent notification attempt
    pub email_status: String,
}

impl Reservation {
    /// Create a new pending reservation with a fresh id and timestamp
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        guests: i64,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            guests,
            date: date.into(),
            time: time.into(),
            status: STATUS_PENDING.to_string(),
            email_status: EMAIL_NOT_SENT.to_string(),
        }
    }
}
