//! Gateway notification and transaction-status payloads.

use serde::{Deserialize, Serialize};

/// HTTP notification sent by the gateway to `POST /webhooks/midtrans`.
///
/// Every field is optional at the wire level so that a missing
/// `order_id` can be reported as a client error rather than a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MidtransNotification {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub transaction_status: Option<String>,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub gross_amount: Option<String>,
    #[serde(default)]
    pub signature_key: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MidtransNotification {
    /// The order id, treating an empty string as absent.
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The transaction id, treating an empty string as absent.
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Body of `GET /v2/{order_id}/status`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionStatusResponse {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub transaction_status: Option<String>,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub gross_amount: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_parsing() {
        let body = r#"{
            "transaction_time": "2026-10-16 11:48:39",
            "transaction_status": "settlement",
            "transaction_id": "513f1f01-c9da-474c-9fc9-d5c64364b709",
            "status_code": "200",
            "signature_key": "abc",
            "payment_type": "bank_transfer",
            "order_id": "8a4b6d2e-1f3c-4e5a-9b7d-0c1e2f3a4b5c",
            "gross_amount": "10000.00"
        }"#;
        let notification: MidtransNotification = serde_json::from_str(body).unwrap();
        assert_eq!(
            notification.order_id(),
            Some("8a4b6d2e-1f3c-4e5a-9b7d-0c1e2f3a4b5c")
        );
        assert_eq!(notification.transaction_status.as_deref(), Some("settlement"));
        assert_eq!(notification.extra["payment_type"], "bank_transfer");
    }

    #[test]
    fn test_empty_order_id_is_absent() {
        let notification: MidtransNotification =
            serde_json::from_str(r#"{"order_id":"","transaction_id":""}"#).unwrap();
        assert_eq!(notification.order_id(), None);
        assert_eq!(notification.transaction_id(), None);

        let notification: MidtransNotification = serde_json::from_str("{}").unwrap();
        assert_eq!(notification.order_id(), None);
    }

    #[test]
    fn test_status_response_not_found_body() {
        let body = r#"{"status_code":"404","status_message":"Transaction doesn't exist."}"#;
        let response: TransactionStatusResponse = serde_json::from_str(body).unwrap();
        assert!(response.order_id.is_none());
        assert_eq!(response.status_code.as_deref(), Some("404"));
    }
}
