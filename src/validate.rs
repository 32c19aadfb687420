//! # Request Validation
//!
//! Pure validators for guest-supplied reservation fields: phone format,
//! email shape, and the service-hours window.

use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Optional leading `+`, then 7-15 digits. No separators.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?\d{7,15}$").unwrap();

    /// `local@domain.tld` shape. Deliberately not RFC 5322; the domain
    /// part must contain a dot.
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// 12-hour clock format used for both the window bounds and guest input
const CLOCK_FORMAT: &str = "%I:%M %p";

const OPEN_TIME: &str = "11:30 AM";
const CLOSE_TIME: &str = "11:00 PM";

/// Returns whether `p` is an acceptable phone number
pub fn valid_phone(p: &str) -> bool {
    PHONE_RE.is_match(p)
}

/// Returns whether `e` is an acceptable email address
pub fn valid_email(e: &str) -> bool {
    EMAIL_RE.is_match(e)
}

/// Parse a 12-hour clock string such as `"11:30 AM"`
pub fn parse_clock(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, CLOCK_FORMAT).ok()
}

/// Inclusive service-hours window, bounds parsed once at construction
#[derive(Debug, Clone, Copy)]
pub struct ServiceWindow {
    open: NaiveTime,
    close: NaiveTime,
}

impl Default for ServiceWindow {
    fn default() -> Self {
        // The bounds are literals in CLOCK_FORMAT and always parse.
        Self {
            open: parse_clock(OPEN_TIME).expect("opening time literal parses"),
            close: parse_clock(CLOSE_TIME).expect("closing time literal parses"),
        }
    }
}

impl ServiceWindow {
    /// Returns whether `t` parses as a 12-hour clock time inside the
    /// window. Malformed input counts as outside the window.
    pub fn allows(&self, t: &str) -> bool {
        match parse_clock(t) {
            Some(tt) => self.open <= tt && tt <= self.close,
            None => false,
        }
    }

    /// Rejection message shown when a time falls outside the window
    pub fn message(&self) -> String {
        format!(
            "Reservations allowed only between {} and {}",
            self.open.format(CLOCK_FORMAT),
            self.close.format(CLOCK_FORMAT)
        )
    }
}
