//! Public API payloads for creating and reading payments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request payload for `POST /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    /// Gross amount in the smallest unit the gateway accepts (e.g. IDR).
    pub price: i64,
    pub item_name: String,
    pub customer_first_name: String,
    pub customer_email: String,
}

/// Response returned by `GET /payments/{order_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub order_id: Uuid,
    pub status: PaymentStatus,
    pub price: i64,
    pub item_name: String,
    pub customer_first_name: String,
    pub customer_email: String,
    pub checkout_link: Option<String>,
    /// Unix timestamp of when the payment was created.
    pub created_at: i64,
    /// Unix timestamp of the last status change.
    pub updated_at: i64,
}

/// Payment status for API responses and configuration.
///
/// This is the API/DTO version without sqlx::Type.
/// For database operations, use the version in `snapgate-core::entities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Capture,
    Settlement,
    Deny,
    Expire,
    Cancel,
}

impl PaymentStatus {
    /// All statuses, in the order the gateway documents them.
    pub const ALL: [PaymentStatus; 6] = [
        PaymentStatus::Capture,
        PaymentStatus::Settlement,
        PaymentStatus::Pending,
        PaymentStatus::Deny,
        PaymentStatus::Expire,
        PaymentStatus::Cancel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Capture => "capture",
            PaymentStatus::Settlement => "settlement",
            PaymentStatus::Deny => "deny",
            PaymentStatus::Expire => "expire",
            PaymentStatus::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known payment statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment status: {0}")]
pub struct UnknownPaymentStatus(pub String);

impl std::str::FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownPaymentStatus(s.to_owned()))
    }
}

/// Error body returned by every failing endpoint: `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorMessage::One(message.into()),
        }
    }
}

/// A single message, or the list of messages relayed from the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        for status in PaymentStatus::ALL {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(status));
        }
        assert_eq!(
            "refund".parse::<PaymentStatus>(),
            Err(UnknownPaymentStatus("refund".to_string()))
        );
        assert!("Settlement".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_error_response_shape() {
        let one = serde_json::to_value(ErrorResponse::new("Payment record not found")).unwrap();
        assert_eq!(one, serde_json::json!({ "error": "Payment record not found" }));

        let many = serde_json::to_value(ErrorResponse {
            error: ErrorMessage::Many(vec!["gross_amount is required".to_string()]),
        })
        .unwrap();
        assert_eq!(many, serde_json::json!({ "error": ["gross_amount is required"] }));
    }
}
