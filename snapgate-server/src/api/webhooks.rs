use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use snapgate_core::payments::{PaymentError, WebhookOutcome, handle_notification};
use snapgate_sdk::objects::{ErrorResponse, MidtransNotification};

use super::{UNEXPECTED_ERROR, error_response};
use crate::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new().route("/webhooks/midtrans", post(midtrans_notification))
}

/// `POST /webhooks/midtrans`: gateway HTTP notification.
///
/// Answers `"success"`, or `"Payment has already been processed"` when
/// the payment is already settled or captured.
async fn midtrans_notification(
    State(state): State<AppState>,
    payload: Result<Json<MidtransNotification>, JsonRejection>,
) -> Result<Json<&'static str>, WebhookApiError> {
    let Json(notification) = payload?;

    let gateway = state.gateway().await;
    let mapping = state.config.checkout.read().await.status_mapping.clone();

    let outcome = handle_notification(
        state.store.as_ref(),
        gateway.as_ref(),
        &mapping,
        &notification,
    )
    .await?;

    Ok(Json(match outcome {
        WebhookOutcome::AlreadyProcessed(_) => "Payment has already been processed",
        WebhookOutcome::Updated { .. }
        | WebhookOutcome::Unchanged(_)
        | WebhookOutcome::Ignored { .. } => "success",
    }))
}

/// Errors that can occur in the webhook handler.
#[derive(Debug)]
enum WebhookApiError {
    /// The body was not JSON.
    InvalidBody(JsonRejection),
    Payment(PaymentError),
}

impl From<JsonRejection> for WebhookApiError {
    fn from(value: JsonRejection) -> Self {
        Self::InvalidBody(value)
    }
}

impl From<PaymentError> for WebhookApiError {
    fn from(value: PaymentError) -> Self {
        Self::Payment(value)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            WebhookApiError::InvalidBody(rejection) => {
                tracing::warn!(error = %rejection, "Webhook body is not valid JSON");
                (StatusCode::BAD_REQUEST, "Invalid JSON body")
            }
            WebhookApiError::Payment(PaymentError::MissingOrderId) => {
                (StatusCode::BAD_REQUEST, "Missing order_id in request")
            }
            WebhookApiError::Payment(PaymentError::InvalidSignature(_)) => {
                (StatusCode::UNAUTHORIZED, "Invalid signature")
            }
            WebhookApiError::Payment(PaymentError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Payment record not found")
            }
            WebhookApiError::Payment(PaymentError::Conflict(_)) => {
                (StatusCode::CONFLICT, "Payment was modified concurrently")
            }
            WebhookApiError::Payment(PaymentError::Gateway(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch transaction data from Midtrans.",
            ),
            WebhookApiError::Payment(PaymentError::InvalidGatewayResponse(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid response from Midtrans.",
            ),
            WebhookApiError::Payment(e) => {
                tracing::error!(error = %e, "Exception occurred while processing webhook");
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR)
            }
        };
        error_response(status, ErrorResponse::new(message))
    }
}
