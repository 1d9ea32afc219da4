use snapgate_sdk::objects::{
    CreatePaymentRequest, CustomerDetails, ItemDetail, SnapTransactionRequest,
    SnapTransactionResponse, TransactionDetails,
};
use tracing::{error, info};
use uuid::Uuid;

use super::PaymentError;
use crate::config::CheckoutConfig;
use crate::entities::payment::{InsertPayment, Payment};
use crate::gateway::PaymentGateway;
use crate::store::PaymentStore;

/// A payment that was created at the gateway and recorded locally.
#[derive(Debug, Clone)]
pub struct InitiatedPayment {
    pub payment: Payment,
    /// The gateway's response, to be relayed to the caller unchanged.
    pub gateway_response: SnapTransactionResponse,
}

/// Reject requests the gateway would refuse anyway.
pub fn validate_request(request: &CreatePaymentRequest) -> Result<(), PaymentError> {
    if request.price <= 0 {
        return Err(PaymentError::Validation("price must be positive".to_string()));
    }
    if request.item_name.trim().is_empty() {
        return Err(PaymentError::Validation("item_name is required".to_string()));
    }
    if request.customer_first_name.trim().is_empty() {
        return Err(PaymentError::Validation(
            "customer_first_name is required".to_string(),
        ));
    }
    if !request.customer_email.contains('@') {
        return Err(PaymentError::Validation(
            "customer_email is not a valid email address".to_string(),
        ));
    }
    Ok(())
}

/// Build the Snap request for a single item bought once.
pub fn build_transaction_request(
    order_id: Uuid,
    request: &CreatePaymentRequest,
    enabled_payments: &[String],
) -> SnapTransactionRequest {
    SnapTransactionRequest {
        transaction_details: TransactionDetails {
            order_id: order_id.to_string(),
            gross_amount: request.price,
        },
        item_details: vec![ItemDetail {
            id: None,
            price: request.price,
            quantity: 1,
            name: request.item_name.clone(),
        }],
        customer_details: CustomerDetails {
            first_name: request.customer_first_name.clone(),
            email: request.customer_email.clone(),
        },
        enabled_payments: enabled_payments.to_vec(),
    }
}

/// Create a Snap transaction and record the payment as `pending`.
///
/// Nothing is stored if the gateway call fails.
pub async fn initiate_payment<S, G>(
    store: &S,
    gateway: &G,
    checkout: &CheckoutConfig,
    request: &CreatePaymentRequest,
) -> Result<InitiatedPayment, PaymentError>
where
    S: PaymentStore + ?Sized,
    G: PaymentGateway + ?Sized,
{
    validate_request(request)?;

    let order_id = Uuid::new_v4();
    let snap_request = build_transaction_request(order_id, request, &checkout.enabled_payments);

    info!(
        order_id = %order_id,
        gross_amount = request.price,
        item_name = %request.item_name,
        enabled_payments = ?snap_request.enabled_payments,
        "Creating Snap transaction"
    );

    let gateway_response = gateway
        .create_transaction(&snap_request)
        .await
        .inspect_err(|e| {
            error!(
                order_id = %order_id,
                error = %e,
                params = ?snap_request,
                "Snap transaction creation failed"
            );
        })?;

    let payment = store
        .insert(InsertPayment {
            order_id,
            price: request.price,
            customer_first_name: request.customer_first_name.clone(),
            customer_email: request.customer_email.clone(),
            item_name: request.item_name.clone(),
            checkout_link: gateway_response.redirect_url.clone(),
        })
        .await?;

    info!(
        order_id = %order_id,
        checkout_link = ?payment.checkout_link,
        "Payment recorded as pending"
    );

    Ok(InitiatedPayment {
        payment,
        gateway_response,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PaymentStatus;
    use crate::testing::{MemoryPaymentStore, StubGateway};
    use reqwest::StatusCode;

    fn widget_request() -> CreatePaymentRequest {
        CreatePaymentRequest {
            price: 10000,
            item_name: "Widget".to_string(),
            customer_first_name: "Budi".to_string(),
            customer_email: "budi@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_initiation_records_pending_payment() {
        let store = MemoryPaymentStore::new();
        let gateway = StubGateway::default();

        let initiated = initiate_payment(
            &store,
            &gateway,
            &CheckoutConfig::default(),
            &widget_request(),
        )
        .await
        .unwrap();

        let sent = gateway.created_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].transaction_details.gross_amount, 10000);
        assert_eq!(sent[0].item_details[0].name, "Widget");
        assert_eq!(sent[0].item_details[0].quantity, 1);
        assert_eq!(
            sent[0].enabled_payments,
            vec!["credit_card", "bca_va", "bni_va", "bri_va"]
        );

        let stored = store.get(initiated.payment.order_id).unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
        assert_eq!(
            stored.order_id.to_string(),
            sent[0].transaction_details.order_id
        );
        assert_eq!(
            stored.checkout_link.as_deref(),
            initiated.gateway_response.redirect_url.as_deref()
        );
        assert_eq!(stored.price, 10000);
        assert_eq!(stored.customer_email, "budi@example.com");
    }

    #[tokio::test]
    async fn test_each_initiation_gets_a_fresh_order_id() {
        let store = MemoryPaymentStore::new();
        let gateway = StubGateway::default();
        let checkout = CheckoutConfig::default();

        let first = initiate_payment(&store, &gateway, &checkout, &widget_request())
            .await
            .unwrap();
        let second = initiate_payment(&store, &gateway, &checkout, &widget_request())
            .await
            .unwrap();

        assert_ne!(first.payment.order_id, second.payment.order_id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_configured_payment_methods_are_sent() {
        let store = MemoryPaymentStore::new();
        let gateway = StubGateway::default();
        let checkout = CheckoutConfig {
            enabled_payments: vec!["gopay".to_string()],
            ..Default::default()
        };

        initiate_payment(&store, &gateway, &checkout, &widget_request())
            .await
            .unwrap();

        assert_eq!(gateway.created_requests()[0].enabled_payments, vec!["gopay"]);
    }

    #[tokio::test]
    async fn test_gateway_failure_stores_nothing() {
        let store = MemoryPaymentStore::new();
        let gateway = StubGateway::default().failing_create(
            StatusCode::UNAUTHORIZED,
            vec!["Access denied due to unauthorized transaction".to_string()],
        );

        let err = initiate_payment(
            &store,
            &gateway,
            &CheckoutConfig::default(),
            &widget_request(),
        )
        .await
        .unwrap_err();

        match err {
            PaymentError::Gateway(e) => assert_eq!(
                e.error_messages(),
                Some(&["Access denied due to unauthorized transaction".to_string()][..])
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.is_empty());
        assert_eq!(store.accesses(), 0);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_gateway() {
        let store = MemoryPaymentStore::new();
        let gateway = StubGateway::default();
        let request = CreatePaymentRequest {
            price: 0,
            ..widget_request()
        };

        let err = initiate_payment(&store, &gateway, &CheckoutConfig::default(), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Validation(_)));
        assert!(gateway.created_requests().is_empty());
        assert_eq!(store.accesses(), 0);
    }

    #[test]
    fn test_validate_request() {
        assert!(validate_request(&widget_request()).is_ok());
        for bad in [
            CreatePaymentRequest {
                price: -5,
                ..widget_request()
            },
            CreatePaymentRequest {
                item_name: "  ".to_string(),
                ..widget_request()
            },
            CreatePaymentRequest {
                customer_first_name: String::new(),
                ..widget_request()
            },
            CreatePaymentRequest {
                customer_email: "budi".to_string(),
                ..widget_request()
            },
        ] {
            assert!(matches!(
                validate_request(&bad),
                Err(PaymentError::Validation(_))
            ));
        }
    }
}
