//! Snap transaction-creation payloads.
//!
//! See <https://docs.midtrans.com/reference/backend-integration> for the
//! gateway's field reference.

use serde::{Deserialize, Serialize};

/// Body of `POST /snap/v1/transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapTransactionRequest {
    pub transaction_details: TransactionDetails,
    pub item_details: Vec<ItemDetail>,
    pub customer_details: CustomerDetails,
    pub enabled_payments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub order_id: String,
    pub gross_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub price: i64,
    pub quantity: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub email: String,
}

/// Successful response of the Snap API.
///
/// Only `token` and `redirect_url` are interpreted; every other field is
/// kept so the response can be relayed to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapTransactionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Kept as sent; it is stored as the checkout link verbatim.
    pub redirect_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Error body of the Snap API (and of most Core API failures).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnapErrorResponse {
    #[serde(default)]
    pub error_messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = SnapTransactionRequest {
            transaction_details: TransactionDetails {
                order_id: "ORDER-1".to_string(),
                gross_amount: 10000,
            },
            item_details: vec![ItemDetail {
                id: None,
                price: 10000,
                quantity: 1,
                name: "Widget".to_string(),
            }],
            customer_details: CustomerDetails {
                first_name: "Budi".to_string(),
                email: "budi@example.com".to_string(),
            },
            enabled_payments: vec!["credit_card".to_string(), "bca_va".to_string()],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "transaction_details": { "order_id": "ORDER-1", "gross_amount": 10000 },
                "item_details": [{ "price": 10000, "quantity": 1, "name": "Widget" }],
                "customer_details": { "first_name": "Budi", "email": "budi@example.com" },
                "enabled_payments": ["credit_card", "bca_va"]
            })
        );
    }

    #[test]
    fn test_response_keeps_unknown_fields() {
        let body = r#"{
            "token": "66e4fa55-fdac-4ef9-91b5-733b97d1b862",
            "redirect_url": "https://app.sandbox.midtrans.com/snap/v2/vtweb/66e4fa55",
            "expiry": "2026-10-17"
        }"#;
        let response: SnapTransactionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.redirect_url.as_deref(),
            Some("https://app.sandbox.midtrans.com/snap/v2/vtweb/66e4fa55")
        );

        let relayed = serde_json::to_value(&response).unwrap();
        assert_eq!(relayed["expiry"], "2026-10-17");
        assert_eq!(relayed["token"], "66e4fa55-fdac-4ef9-91b5-733b97d1b862");
    }

    #[test]
    fn test_response_without_redirect_url() {
        let response: SnapTransactionResponse = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
        assert!(response.redirect_url.is_none());
    }

    #[test]
    fn test_redirect_url_is_relayed_verbatim() {
        // Neither normalised (no trailing slash added) nor rejected.
        for redirect_url in ["https://app.sandbox.midtrans.com", "snap/v2/vtweb/relative"] {
            let body = serde_json::json!({ "token": "t", "redirect_url": redirect_url });
            let response: SnapTransactionResponse = serde_json::from_value(body.clone()).unwrap();
            assert_eq!(response.redirect_url.as_deref(), Some(redirect_url));
            assert_eq!(serde_json::to_value(&response).unwrap(), body);
        }
    }
}
