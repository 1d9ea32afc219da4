//! Checkout configuration: what is offered to the customer and how gateway
//! statuses are recorded.

use std::collections::HashMap;

use snapgate_sdk::objects::PaymentStatus as SdkPaymentStatus;

use crate::entities::PaymentStatus;

/// Payment methods offered when none are configured.
pub const DEFAULT_ENABLED_PAYMENTS: [&str; 4] = ["credit_card", "bca_va", "bni_va", "bri_va"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Sent as `enabled_payments` on every Snap transaction.
    pub enabled_payments: Vec<String>,
    pub status_mapping: StatusMapping,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            enabled_payments: DEFAULT_ENABLED_PAYMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            status_mapping: StatusMapping::default(),
        }
    }
}

/// Maps a gateway `transaction_status` string to the stored status.
///
/// The default is the identity mapping over the six statuses the gateway
/// documents. Entries can be added or redirected from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMapping(HashMap<String, SdkPaymentStatus>);

impl StatusMapping {
    /// The default mapping extended (or overridden) by `overrides`.
    pub fn with_overrides(overrides: impl IntoIterator<Item = (String, SdkPaymentStatus)>) -> Self {
        let mut mapping = Self::default();
        mapping.0.extend(overrides);
        mapping
    }

    /// Look up a gateway status. `None` means the status is not handled.
    pub fn resolve(&self, transaction_status: &str) -> Option<PaymentStatus> {
        self.0.get(transaction_status).copied().map(Into::into)
    }
}

impl Default for StatusMapping {
    fn default() -> Self {
        Self(
            SdkPaymentStatus::ALL
                .into_iter()
                .map(|status| (status.as_str().to_owned(), status))
                .collect(),
        )
    }
}
