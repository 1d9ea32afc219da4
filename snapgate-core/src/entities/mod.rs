pub mod payment;

use snapgate_sdk::objects::PaymentStatus as SdkPaymentStatus;

/// Payment status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see `snapgate_sdk::objects::PaymentStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "payment_status")]
pub enum PaymentStatus {
    Pending,
    Capture,
    Settlement,
    Deny,
    Expire,
    Cancel,
}

impl PaymentStatus {
    /// `settlement` and `capture` are final: a payment in either status is
    /// never updated again.
    pub fn is_final(&self) -> bool {
        matches!(self, PaymentStatus::Settlement | PaymentStatus::Capture)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&SdkPaymentStatus::from(*self), f)
    }
}

impl From<PaymentStatus> for SdkPaymentStatus {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Pending => SdkPaymentStatus::Pending,
            PaymentStatus::Capture => SdkPaymentStatus::Capture,
            PaymentStatus::Settlement => SdkPaymentStatus::Settlement,
            PaymentStatus::Deny => SdkPaymentStatus::Deny,
            PaymentStatus::Expire => SdkPaymentStatus::Expire,
            PaymentStatus::Cancel => SdkPaymentStatus::Cancel,
        }
    }
}

impl From<SdkPaymentStatus> for PaymentStatus {
    fn from(value: SdkPaymentStatus) -> Self {
        match value {
            SdkPaymentStatus::Pending => PaymentStatus::Pending,
            SdkPaymentStatus::Capture => PaymentStatus::Capture,
            SdkPaymentStatus::Settlement => PaymentStatus::Settlement,
            SdkPaymentStatus::Deny => PaymentStatus::Deny,
            SdkPaymentStatus::Expire => PaymentStatus::Expire,
            SdkPaymentStatus::Cancel => PaymentStatus::Cancel,
        }
    }
}
