//! In-memory store and stub gateway for exercising the payment flows
//! without Postgres or network access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;
use snapgate_sdk::client::GatewayError;
use snapgate_sdk::objects::{
    MidtransNotification, SnapTransactionRequest, SnapTransactionResponse,
    TransactionStatusResponse,
};
use snapgate_sdk::signature::{self, SignatureCheck, SignatureError};
use uuid::Uuid;

use crate::entities::PaymentStatus;
use crate::entities::payment::{InsertPayment, Payment};
use crate::gateway::PaymentGateway;
use crate::store::PaymentStore;

fn now() -> time::PrimitiveDateTime {
    let now = time::OffsetDateTime::now_utc();
    time::PrimitiveDateTime::new(now.date(), now.time())
}

// ---------------------------------------------------------------------------
// MemoryPaymentStore
// ---------------------------------------------------------------------------

/// A [`PaymentStore`] backed by a `HashMap`.
///
/// Counts every call so tests can assert that a request never touched
/// the store.
#[derive(Debug, Default)]
pub struct MemoryPaymentStore {
    payments: Mutex<HashMap<Uuid, Payment>>,
    accesses: AtomicUsize,
    interference: Mutex<Vec<PaymentStatus>>,
}

impl MemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far.
    pub fn accesses(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }

    /// Snapshot of a stored payment, without counting as an access.
    pub fn get(&self, order_id: Uuid) -> Option<Payment> {
        self.lock().get(&order_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Insert a payment with an arbitrary status, without counting as an access.
    pub fn seed(&self, order_id: Uuid, status: PaymentStatus) -> Payment {
        let now = now();
        let payment = Payment {
            order_id,
            status,
            price: 10000,
            customer_first_name: "Budi".to_string(),
            customer_email: "budi@example.com".to_string(),
            item_name: "Widget".to_string(),
            checkout_link: None,
            created_at: now,
            updated_at: now,
        };
        self.lock().insert(order_id, payment.clone());
        payment
    }

    /// Simulate concurrent writers: before each of the next
    /// compare-and-set calls, the stored status is overwritten with the
    /// next entry of `statuses`.
    pub fn interfere_with_next_updates(&self, statuses: impl IntoIterator<Item = PaymentStatus>) {
        let mut queue = self
            .interference
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        queue.extend(statuses);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Payment>> {
        self.payments.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        self.accesses.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn insert(&self, insert: InsertPayment) -> Result<Payment, sqlx::Error> {
        self.touch();
        let mut payments = self.lock();
        if payments.contains_key(&insert.order_id) {
            return Err(sqlx::Error::Protocol(format!(
                "duplicate order_id {}",
                insert.order_id
            )));
        }
        let now = now();
        let payment = Payment {
            order_id: insert.order_id,
            status: PaymentStatus::Pending,
            price: insert.price,
            customer_first_name: insert.customer_first_name,
            customer_email: insert.customer_email,
            item_name: insert.item_name,
            checkout_link: insert.checkout_link,
            created_at: now,
            updated_at: now,
        };
        payments.insert(payment.order_id, payment.clone());
        Ok(payment)
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Option<Payment>, sqlx::Error> {
        self.touch();
        Ok(self.lock().get(&order_id).cloned())
    }

    async fn compare_and_set_status(
        &self,
        order_id: Uuid,
        expected: PaymentStatus,
        new_status: PaymentStatus,
    ) -> Result<Option<Payment>, sqlx::Error> {
        self.touch();
        let interference = {
            let mut queue = self
                .interference
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            (!queue.is_empty()).then(|| queue.remove(0))
        };

        let mut payments = self.lock();
        let Some(payment) = payments.get_mut(&order_id) else {
            return Ok(None);
        };
        if let Some(status) = interference {
            payment.status = status;
        }
        if payment.status != expected {
            return Ok(None);
        }
        payment.status = new_status;
        payment.updated_at = now();
        Ok(Some(payment.clone()))
    }
}

// ---------------------------------------------------------------------------
// StubGateway
// ---------------------------------------------------------------------------

/// A [`PaymentGateway`] that records calls and answers from local state.
#[derive(Debug)]
pub struct StubGateway {
    server_key: String,
    create_failure: Option<(StatusCode, Vec<String>)>,
    status_failure: Option<StatusCode>,
    statuses: Mutex<HashMap<String, TransactionStatusResponse>>,
    created: Mutex<Vec<SnapTransactionRequest>>,
    status_queries: Mutex<Vec<String>>,
}

impl Default for StubGateway {
    fn default() -> Self {
        Self::new("SB-Mid-server-test")
    }
}

impl StubGateway {
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
            create_failure: None,
            status_failure: None,
            statuses: Mutex::default(),
            created: Mutex::default(),
            status_queries: Mutex::default(),
        }
    }

    /// Make transaction creation fail with `status` and `error_messages`.
    pub fn failing_create(mut self, status: StatusCode, error_messages: Vec<String>) -> Self {
        self.create_failure = Some((status, error_messages));
        self
    }

    /// Make status queries fail with `status`.
    pub fn failing_status(mut self, status: StatusCode) -> Self {
        self.status_failure = Some(status);
        self
    }

    pub fn server_key(&self) -> &str {
        &self.server_key
    }

    /// Set the status the gateway reports for `order_id`.
    pub fn set_transaction_status(&self, order_id: &str, transaction_status: &str) {
        self.set_status_response(
            order_id,
            TransactionStatusResponse {
                order_id: Some(order_id.to_string()),
                transaction_id: Some(format!("tx-{order_id}")),
                transaction_status: Some(transaction_status.to_string()),
                status_code: Some("200".to_string()),
                status_message: Some("Success, transaction is found".to_string()),
                gross_amount: Some("10000.00".to_string()),
                extra: Default::default(),
            },
        );
    }

    /// Set the exact body returned for `order_id`.
    pub fn set_status_response(&self, order_id: &str, response: TransactionStatusResponse) {
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(order_id.to_string(), response);
    }

    /// Every Snap request received so far.
    pub fn created_requests(&self) -> Vec<SnapTransactionRequest> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every order id queried for status so far.
    pub fn status_queries(&self) -> Vec<String> {
        self.status_queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_transaction(
        &self,
        request: &SnapTransactionRequest,
    ) -> Result<SnapTransactionResponse, GatewayError> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some((status, error_messages)) = &self.create_failure {
            return Err(GatewayError::Api {
                status: *status,
                body: serde_json::json!({ "error_messages": error_messages }).to_string(),
                error_messages: error_messages.clone(),
            });
        }

        let order_id = &request.transaction_details.order_id;
        let mut extra = serde_json::Map::new();
        extra.insert("stub".to_string(), serde_json::Value::Bool(true));
        Ok(SnapTransactionResponse {
            token: Some(format!("token-{order_id}")),
            redirect_url: Some(format!(
                "https://app.sandbox.midtrans.com/snap/v2/vtweb/token-{order_id}"
            )),
            extra,
        })
    }

    async fn transaction_status(
        &self,
        order_id: &str,
    ) -> Result<TransactionStatusResponse, GatewayError> {
        self.status_queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order_id.to_string());

        if let Some(status) = self.status_failure {
            return Err(GatewayError::Api {
                status,
                body: String::new(),
                error_messages: Vec::new(),
            });
        }

        let known = self
            .statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(order_id)
            .cloned();
        Ok(known.unwrap_or_else(|| TransactionStatusResponse {
            status_code: Some("404".to_string()),
            status_message: Some("Transaction doesn't exist.".to_string()),
            ..Default::default()
        }))
    }

    fn verify_notification(
        &self,
        notification: &MidtransNotification,
    ) -> Result<SignatureCheck, SignatureError> {
        signature::verify_notification(notification, &self.server_key)
    }
}
