use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use snapgate_core::payments::{PaymentError, initiate_payment};
use snapgate_sdk::objects::{CreatePaymentRequest, ErrorMessage, ErrorResponse};
use uuid::Uuid;

use super::{UNEXPECTED_ERROR, error_response};
use crate::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/payments", post(create_payment))
        .route("/payments/{order_id}", get(get_payment))
}

/// `POST /payments`: create a Snap transaction.
///
/// Records a pending payment and relays the gateway's response body.
async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let Json(request) = payload?;

    let gateway = state.gateway().await;
    let checkout = state.config.checkout.read().await.clone();

    let initiated =
        initiate_payment(state.store.as_ref(), gateway.as_ref(), &checkout, &request).await?;

    Ok(Json(initiated.gateway_response))
}

/// `GET /payments/{order_id}`: read a stored payment.
async fn get_payment(
    State(state): State<AppState>,
    order_id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let Path(order_id) = order_id?;

    let payment = state
        .store
        .find_by_order_id(order_id)
        .await
        .map_err(PaymentError::Database)?
        .ok_or_else(|| PaymentError::NotFound(order_id.to_string()))?;

    Ok(Json(payment.to_response()))
}

/// Errors that can occur in the payments handlers.
#[derive(Debug)]
enum PaymentsApiError {
    /// The body was not a valid `CreatePaymentRequest`.
    InvalidBody(JsonRejection),
    /// The path did not contain a UUID.
    InvalidPath(PathRejection),
    Payment(PaymentError),
}

impl From<JsonRejection> for PaymentsApiError {
    fn from(value: JsonRejection) -> Self {
        Self::InvalidBody(value)
    }
}

impl From<PathRejection> for PaymentsApiError {
    fn from(value: PathRejection) -> Self {
        Self::InvalidPath(value)
    }
}

impl From<PaymentError> for PaymentsApiError {
    fn from(value: PaymentError) -> Self {
        Self::Payment(value)
    }
}

impl IntoResponse for PaymentsApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            PaymentsApiError::InvalidBody(rejection) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(rejection.body_text()),
            ),
            PaymentsApiError::InvalidPath(rejection) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(rejection.body_text()),
            ),
            PaymentsApiError::Payment(PaymentError::Validation(message)) => {
                error_response(StatusCode::BAD_REQUEST, ErrorResponse::new(message))
            }
            PaymentsApiError::Payment(PaymentError::NotFound(_)) => error_response(
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Payment record not found"),
            ),
            PaymentsApiError::Payment(PaymentError::Gateway(e)) => {
                let error = match e.error_messages() {
                    Some(messages) => ErrorMessage::Many(messages.to_vec()),
                    None => ErrorMessage::One("Transaction failed".to_string()),
                };
                error_response(StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse { error })
            }
            PaymentsApiError::Payment(e) => {
                tracing::error!(error = %e, "Payments API error");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(UNEXPECTED_ERROR),
                )
            }
        }
    }
}
