use crate::entities::PaymentStatus;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use snapgate_sdk::objects::PaymentResponse;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Payment {
    pub order_id: Uuid,
    pub status: PaymentStatus,
    pub price: i64,
    pub customer_first_name: String,
    pub customer_email: String,
    pub item_name: String,
    pub checkout_link: Option<String>,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

impl Payment {
    /// Convert into the API representation.
    pub fn to_response(&self) -> PaymentResponse {
        PaymentResponse {
            order_id: self.order_id,
            status: self.status.into(),
            price: self.price,
            item_name: self.item_name.clone(),
            customer_first_name: self.customer_first_name.clone(),
            customer_email: self.customer_email.clone(),
            checkout_link: self.checkout_link.clone(),
            created_at: self.created_at.assume_utc().unix_timestamp(),
            updated_at: self.updated_at.assume_utc().unix_timestamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Insert a new payment in status `pending`.
pub struct InsertPayment {
    pub order_id: Uuid,
    pub price: i64,
    pub customer_first_name: String,
    pub customer_email: String,
    pub item_name: String,
    pub checkout_link: Option<String>,
}

impl Processor<InsertPayment> for DatabaseProcessor {
    type Output = Payment;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertPayment")]
    async fn process(&self, insert: InsertPayment) -> Result<Payment, sqlx::Error> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments
                (order_id, status, price, customer_first_name, customer_email, item_name, checkout_link)
            VALUES ($1, 'pending', $2, $3, $4, $5, $6)
            RETURNING
                order_id, status, price, customer_first_name, customer_email,
                item_name, checkout_link, created_at, updated_at
            "#,
        )
        .bind(insert.order_id)
        .bind(insert.price)
        .bind(insert.customer_first_name)
        .bind(insert.customer_email)
        .bind(insert.item_name)
        .bind(insert.checkout_link)
        .fetch_one(&self.pool)
        .await?;
        Ok(payment)
    }
}

#[derive(Debug, Clone)]
/// Fetch a payment by its order id.
pub struct GetPaymentByOrderId {
    pub order_id: Uuid,
}

impl Processor<GetPaymentByOrderId> for DatabaseProcessor {
    type Output = Option<Payment>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetPaymentByOrderId")]
    async fn process(&self, query: GetPaymentByOrderId) -> Result<Option<Payment>, sqlx::Error> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT
                order_id, status, price, customer_first_name, customer_email,
                item_name, checkout_link, created_at, updated_at
            FROM payments
            WHERE order_id = $1
            "#,
        )
        .bind(query.order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(payment)
    }
}

#[derive(Debug, Clone)]
/// Set the status of a payment only if it still has the `expected` status.
///
/// Returns `None` when the row was changed by someone else in between
/// (or does not exist), so the caller can re-read and decide again.
pub struct CompareAndSetPaymentStatus {
    pub order_id: Uuid,
    pub expected: PaymentStatus,
    pub new_status: PaymentStatus,
}

impl Processor<CompareAndSetPaymentStatus> for DatabaseProcessor {
    type Output = Option<Payment>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CompareAndSetPaymentStatus")]
    async fn process(
        &self,
        cmd: CompareAndSetPaymentStatus,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET status = $3, updated_at = NOW()
            WHERE order_id = $1 AND status = $2
            RETURNING
                order_id, status, price, customer_first_name, customer_email,
                item_name, checkout_link, created_at, updated_at
            "#,
        )
        .bind(cmd.order_id)
        .bind(cmd.expected)
        .bind(cmd.new_status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(payment)
    }
}
