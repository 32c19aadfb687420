//! # HTTP Server
//!
//! axum server exposing the reservation endpoint, a health check, and the
//! static front-end files.

mod config;
mod reserve_routes;
mod server;

pub use config::HttpServerConfig;
pub use reserve_routes::AppState;
pub use server::HttpServer;
