//! # Reservation Datastore
//!
//! Single-table SQLite datastore for reservation records.
//!
//! Each operation opens its own short-lived connection; there is no shared
//! pool and no transaction spanning operations. Isolation between the
//! insert and the later email-status update relies on SQLite's per-statement
//! behavior.

mod errors;
mod reservation;
mod store;

pub use errors::{StoreError, StoreResult};
pub use reservation::{Reservation, EMAIL_NOT_SENT, STATUS_PENDING};
pub use store::ReservationStore;
