//! The two payment flows.
//!
//! - [`initiate_payment`]: create a Snap transaction and record a pending
//!   payment.
//! - [`handle_notification`]: process a gateway notification by
//!   re-querying the authoritative status and updating the record.
//!
//! Both are generic over [`PaymentStore`](crate::store::PaymentStore) and
//! [`PaymentGateway`](crate::gateway::PaymentGateway).

mod initiate;
mod webhook;

pub use initiate::{InitiatedPayment, build_transaction_request, initiate_payment, validate_request};
pub use webhook::{MAX_UPDATE_ATTEMPTS, WebhookOutcome, handle_notification};

use snapgate_sdk::client::GatewayError;
use snapgate_sdk::signature::SignatureError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in the payment flows.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The payment request failed validation.
    #[error("invalid payment request: {0}")]
    Validation(String),

    /// The notification did not carry an `order_id`.
    #[error("notification is missing order_id")]
    MissingOrderId,

    /// The notification's `signature_key` did not verify.
    #[error("notification signature rejected: {0}")]
    InvalidSignature(#[from] SignatureError),

    /// The gateway could not be reached or answered with an error.
    #[error("gateway request failed: {0}")]
    Gateway(#[from] GatewayError),

    /// The gateway answered 2xx but without a required field.
    #[error("invalid gateway response: missing {0}")]
    InvalidGatewayResponse(&'static str),

    /// No payment is stored for the order.
    #[error("payment record not found for order {0}")]
    NotFound(String),

    /// The record kept changing under concurrent deliveries.
    #[error("payment {0} was modified concurrently")]
    Conflict(Uuid),

    /// A database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
