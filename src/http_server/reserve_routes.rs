//! Reservation HTTP Routes
//!
//! The single intake endpoint: validate, persist, notify, persist the
//! notification outcome, respond. Any validation failure short-circuits
//! to HTTP 400 with nothing persisted.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::notify::{build_message, Notifier};
use crate::store::{Reservation, ReservationStore, StoreError};
use crate::validate::{self, ServiceWindow};

/// Subject line of the confirmation email
const CONFIRMATION_SUBJECT: &str = "Your Babylon Reservation Request";

// ==================
// Shared State
// ==================

/// State shared across reservation handlers
pub struct AppState {
    pub store: ReservationStore,
    pub notifier: Notifier,
    pub window: ServiceWindow,
}

impl AppState {
    pub fn new(store: ReservationStore, notifier: Notifier) -> Self {
        Self {
            store,
            notifier,
            window: ServiceWindow::default(),
        }
    }
}

// ==================
// Request/Response Types
// ==================

/// Form submission for `POST /reserve`.
///
/// Every field defaults so a missing field deserializes to blank and is
/// reported by our own validation instead of a deserializer rejection.
#[derive(Debug, Deserialize)]
pub struct ReserveForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub guests: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// 18+ confirmation; presence is what matters, not the value
    #[serde(default)]
    pub confirm: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReserveAccepted {
    pub success: bool,
    pub name: String,
    pub date: String,
    pub time: String,
    pub email_status: String,
}

#[derive(Debug, Serialize)]
pub struct ReserveRejected {
    pub success: bool,
    pub message: String,
}

type Rejection = (StatusCode, Json<ReserveRejected>);

fn reject(message: impl Into<String>) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ReserveRejected {
            success: false,
            message: message.into(),
        }),
    )
}

fn server_error(e: StoreError) -> Rejection {
    error!("datastore failure: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ReserveRejected {
            success: false,
            message: "Internal server error".to_string(),
        }),
    )
}

// ==================
// Routes
// ==================

/// Create reservation routes
pub fn reserve_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/reserve", post(reserve_handler))
        .with_state(state)
}

async fn reserve_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ReserveForm>,
) -> Result<Json<ReserveAccepted>, Rejection> {
    let name = form.name.trim();
    let phone = form.phone.trim();
    let email = form.email.trim();
    let guests = form.guests.trim();
    let date = form.date.trim();
    let time = form.time.trim();

    if name.is_empty()
        || phone.is_empty()
        || email.is_empty()
        || guests.is_empty()
        || date.is_empty()
        || time.is_empty()
    {
        return Err(reject("Missing fields"));
    }

    if !validate::valid_phone(phone) {
        return Err(reject("Invalid phone number"));
    }

    if !validate::valid_email(email) {
        return Err(reject("Invalid email"));
    }

    let guest_count = match guests.parse::<i64>() {
        Ok(n) if n > 0 => n,
        _ => return Err(reject("Invalid guest count")),
    };

    if form.confirm.is_none() {
        return Err(reject("18+ confirmation required"));
    }

    if !state.window.allows(time) {
        return Err(reject(state.window.message()));
    }

    let reservation = Reservation::new(name, phone, email, guest_count, date, time);
    state
        .store
        .insert(&reservation)
        .await
        .map_err(server_error)?;

    let html = build_message(name, date, time, guest_count);
    let delivery = state.notifier.send(email, CONFIRMATION_SUBJECT, &html).await;

    state
        .store
        .update_email_status(&reservation.id, &delivery.status)
        .await
        .map_err(server_error)?;

    info!(
        "reservation {} created, email outcome: {}",
        reservation.id, delivery.status
    );

    Ok(Json(ReserveAccepted {
        success: true,
        name: name.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        email_status: delivery.status,
    }))
}
