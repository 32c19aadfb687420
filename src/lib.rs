//! babylon - restaurant table-reservation service
//!
//! Accepts reservation requests over HTTP, persists them to a local SQLite
//! datastore, and sends a confirmation email (SendGrid first, SMTP fallback).

pub mod cli;
pub mod config;
pub mod http_server;
pub mod notify;
pub mod store;
pub mod validate;
