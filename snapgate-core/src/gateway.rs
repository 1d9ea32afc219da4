//! Outbound gateway seam.

use async_trait::async_trait;
use snapgate_sdk::client::{GatewayError, MidtransClient};
use snapgate_sdk::objects::{
    MidtransNotification, SnapTransactionRequest, SnapTransactionResponse,
    TransactionStatusResponse,
};
use snapgate_sdk::signature::{self, SignatureCheck, SignatureError};

/// The operations the payment flows need from the gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a Snap checkout session.
    async fn create_transaction(
        &self,
        request: &SnapTransactionRequest,
    ) -> Result<SnapTransactionResponse, GatewayError>;

    /// Fetch the authoritative status of a transaction.
    async fn transaction_status(
        &self,
        order_id: &str,
    ) -> Result<TransactionStatusResponse, GatewayError>;

    /// Check the `signature_key` of an incoming notification.
    fn verify_notification(
        &self,
        notification: &MidtransNotification,
    ) -> Result<SignatureCheck, SignatureError>;
}

#[async_trait]
impl PaymentGateway for MidtransClient {
    async fn create_transaction(
        &self,
        request: &SnapTransactionRequest,
    ) -> Result<SnapTransactionResponse, GatewayError> {
        MidtransClient::create_transaction(self, request).await
    }

    async fn transaction_status(
        &self,
        order_id: &str,
    ) -> Result<TransactionStatusResponse, GatewayError> {
        MidtransClient::transaction_status(self, order_id).await
    }

    fn verify_notification(
        &self,
        notification: &MidtransNotification,
    ) -> Result<SignatureCheck, SignatureError> {
        signature::verify_notification(notification, self.server_key())
    }
}
