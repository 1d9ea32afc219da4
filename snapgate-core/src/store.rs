//! Persistence seam for payment records.
//!
//! Handlers depend on [`PaymentStore`] rather than on the pool directly,
//! so the flows can run against Postgres in production and an in-memory
//! store in tests.

use async_trait::async_trait;
use kanau::processor::Processor;
use uuid::Uuid;

use crate::entities::PaymentStatus;
use crate::entities::payment::{
    CompareAndSetPaymentStatus, GetPaymentByOrderId, InsertPayment, Payment,
};
use crate::framework::DatabaseProcessor;

#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Insert a new payment in status `pending`.
    async fn insert(&self, payment: InsertPayment) -> Result<Payment, sqlx::Error>;

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Option<Payment>, sqlx::Error>;

    /// Move `order_id` from `expected` to `new_status`.
    ///
    /// Returns `None` without writing if the stored status is no longer
    /// `expected`.
    async fn compare_and_set_status(
        &self,
        order_id: Uuid,
        expected: PaymentStatus,
        new_status: PaymentStatus,
    ) -> Result<Option<Payment>, sqlx::Error>;
}

#[async_trait]
impl PaymentStore for DatabaseProcessor {
    async fn insert(&self, payment: InsertPayment) -> Result<Payment, sqlx::Error> {
        self.process(payment).await
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Option<Payment>, sqlx::Error> {
        self.process(GetPaymentByOrderId { order_id }).await
    }

    async fn compare_and_set_status(
        &self,
        order_id: Uuid,
        expected: PaymentStatus,
        new_status: PaymentStatus,
    ) -> Result<Option<Payment>, sqlx::Error> {
        self.process(CompareAndSetPaymentStatus {
            order_id,
            expected,
            new_status,
        })
        .await
    }
}
