//! Reservation Flow Tests
//!
//! End-to-end tests of the intake endpoint against the real router and a
//! temporary SQLite datastore. No email transport is configured unless a
//! test says otherwise, so delivery outcomes are deterministic.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

use babylon::http_server::{AppState, HttpServer, HttpServerConfig};
use babylon::notify::{EmailConfig, Notifier};
use babylon::store::ReservationStore;

// =============================================================================
// Helper Functions
// =============================================================================

async fn test_app_with_email(email: EmailConfig) -> (TempDir, Router, ReservationStore) {
    let tmp = TempDir::new().unwrap();
    let store = ReservationStore::new(tmp.path().join("reservations.db"));
    store.init().await.unwrap();

    let state = Arc::new(AppState::new(store.clone(), Notifier::new(email)));
    let router = HttpServer::with_config(HttpServerConfig::default(), state).router();

    (tmp, router, store)
}

async fn test_app() -> (TempDir, Router, ReservationStore) {
    test_app_with_email(EmailConfig::default()).await
}

/// Serve a one-route mock email provider on an ephemeral port, answering
/// every send with the given status, and return its endpoint URL.
async fn mock_provider(status: StatusCode) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/v3/mail/send", post(move || async move { status }));
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}/v3/mail/send", addr)
}

/// Bind and immediately drop an ephemeral port so connections to it are
/// refused deterministically.
async fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v3/mail/send", addr)
}

fn primary_only(sendgrid_url: String) -> EmailConfig {
    EmailConfig {
        sendgrid_api_key: "SG.test-key".to_string(),
        sendgrid_url,
        from_email: "host@babylon.example".to_string(),
        ..EmailConfig::default()
    }
}

fn reserve_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/reserve")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const VALID_FORM: &str = "name=Ada+Lovelace&phone=%2B12345678901&email=ada%40example.com\
                          &guests=4&date=2026-09-01&time=07%3A30+PM&confirm=yes";

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn test_valid_reservation_is_persisted_and_reported() {
    let (_tmp, app, store) = test_app().await;

    let response = app.oneshot(reserve_request(VALID_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["date"], "2026-09-01");
    assert_eq!(body["time"], "07:30 PM");
    assert_eq!(body["email_status"], "no email service configured");

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, "pending");
    assert_eq!(all[0].guests, 4);
    assert_eq!(all[0].email_status, "no email service configured");
}

#[tokio::test]
async fn test_window_boundaries_accepted() {
    let (_tmp, app, _store) = test_app().await;

    for time in ["11%3A30+AM", "11%3A00+PM"] {
        let body = format!(
            "name=Ada&phone=%2B12345678901&email=ada%40example.com\
             &guests=2&date=2026-09-01&time={}&confirm=yes",
            time
        );
        let response = app.clone().oneshot(reserve_request(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_identical_submissions_create_distinct_records() {
    let (_tmp, app, store) = test_app().await;

    for _ in 0..2 {
        let response = app.clone().oneshot(reserve_request(VALID_FORM)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_ne!(all[0].id, all[1].id);
}

#[tokio::test]
async fn test_primary_transport_failure_still_accepts_reservation() {
    // Unreachable SendGrid endpoint and no SMTP credentials: the request
    // still succeeds and the outcome reflects the remaining options.
    let email = primary_only(dead_endpoint().await);
    let (_tmp, app, store) = test_app_with_email(email).await;

    let response = app.oneshot(reserve_request(VALID_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["email_status"], "no email service configured");
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_primary_rejection_falls_through_and_is_persisted() {
    // The provider accepts the connection but answers 500: the rejection
    // is not terminal, delivery falls through past the primary transport,
    // and the persisted email status reflects the remaining options.
    let email = primary_only(mock_provider(StatusCode::INTERNAL_SERVER_ERROR).await);
    let (_tmp, app, store) = test_app_with_email(email).await;

    let response = app.oneshot(reserve_request(VALID_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["email_status"], "no email service configured");

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].email_status, "no email service configured");
}

#[tokio::test]
async fn test_accepted_primary_response_is_persisted_as_sent() {
    // SendGrid answers 202 Accepted on success; the outcome string lands
    // on the record and in the response.
    let email = primary_only(mock_provider(StatusCode::ACCEPTED).await);
    let (_tmp, app, store) = test_app_with_email(email).await;

    let response = app.oneshot(reserve_request(VALID_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["email_status"], "sent (SendGrid)");

    let all = store.list().await.unwrap();
    assert_eq!(all[0].email_status, "sent (SendGrid)");
}

// =============================================================================
// Validation Failures
// =============================================================================

async fn assert_rejected(form: &str, message: &str) {
    let (_tmp, app, store) = test_app().await;

    let response = app.oneshot(reserve_request(form)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], message);

    // Nothing persisted on rejection.
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_field_rejected() {
    assert_rejected(
        "name=Ada&email=ada%40example.com&guests=4&date=2026-09-01&time=07%3A30+PM&confirm=yes",
        "Missing fields",
    )
    .await;
}

#[tokio::test]
async fn test_blank_field_rejected() {
    assert_rejected(
        "name=++&phone=%2B12345678901&email=ada%40example.com\
         &guests=4&date=2026-09-01&time=07%3A30+PM&confirm=yes",
        "Missing fields",
    )
    .await;
}

#[tokio::test]
async fn test_invalid_phone_rejected() {
    assert_rejected(
        "name=Ada&phone=123-456&email=ada%40example.com\
         &guests=4&date=2026-09-01&time=07%3A30+PM&confirm=yes",
        "Invalid phone number",
    )
    .await;
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    assert_rejected(
        "name=Ada&phone=%2B12345678901&email=a%40b\
         &guests=4&date=2026-09-01&time=07%3A30+PM&confirm=yes",
        "Invalid email",
    )
    .await;
}

#[tokio::test]
async fn test_non_numeric_guests_rejected() {
    assert_rejected(
        "name=Ada&phone=%2B12345678901&email=ada%40example.com\
         &guests=four&date=2026-09-01&time=07%3A30+PM&confirm=yes",
        "Invalid guest count",
    )
    .await;
}

#[tokio::test]
async fn test_zero_guests_rejected() {
    assert_rejected(
        "name=Ada&phone=%2B12345678901&email=ada%40example.com\
         &guests=0&date=2026-09-01&time=07%3A30+PM&confirm=yes",
        "Invalid guest count",
    )
    .await;
}

#[tokio::test]
async fn test_missing_confirmation_rejected() {
    assert_rejected(
        "name=Ada&phone=%2B12345678901&email=ada%40example.com\
         &guests=4&date=2026-09-01&time=07%3A30+PM",
        "18+ confirmation required",
    )
    .await;
}

#[tokio::test]
async fn test_time_outside_window_rejected() {
    assert_rejected(
        "name=Ada&phone=%2B12345678901&email=ada%40example.com\
         &guests=4&date=2026-09-01&time=11%3A29+AM&confirm=yes",
        "Reservations allowed only between 11:30 AM and 11:00 PM",
    )
    .await;
}

#[tokio::test]
async fn test_malformed_time_rejected_with_window_message() {
    assert_rejected(
        "name=Ada&phone=%2B12345678901&email=ada%40example.com\
         &guests=4&date=2026-09-01&time=soonish&confirm=yes",
        "Reservations allowed only between 11:30 AM and 11:00 PM",
    )
    .await;
}

// =============================================================================
// Other Endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_tmp, app, _store) = test_app().await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}
