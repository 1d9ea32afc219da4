//! HTTP API.
//!
//! # Endpoints
//!
//! - `POST /payments`             – create a Snap transaction and a pending payment
//! - `GET  /payments/{order_id}`  – read a stored payment
//! - `POST /webhooks/midtrans`    – gateway status notification
//!
//! Every failure is answered with `{"error": ...}`.

use axum::{Json, Router, http::StatusCode, response::IntoResponse};
use snapgate_sdk::objects::ErrorResponse;

use crate::state::AppState;

mod payments;
mod webhooks;

/// Generic message for failures whose details stay in the server log.
const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(payments::router())
        .merge(webhooks::router())
}

fn error_response(status: StatusCode, body: ErrorResponse) -> axum::response::Response {
    (status, Json(body)).into_response()
}
