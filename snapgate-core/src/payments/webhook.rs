use snapgate_sdk::objects::MidtransNotification;
use snapgate_sdk::signature::SignatureCheck;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::PaymentError;
use crate::config::StatusMapping;
use crate::entities::PaymentStatus;
use crate::gateway::PaymentGateway;
use crate::store::PaymentStore;

/// How many times a lost compare-and-set is re-read and retried before
/// giving up with [`PaymentError::Conflict`].
pub const MAX_UPDATE_ATTEMPTS: usize = 3;

/// What a successfully handled notification did to the stored payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The status moved from `previous` to `current`.
    Updated {
        previous: PaymentStatus,
        current: PaymentStatus,
    },
    /// The gateway reports the status already stored.
    Unchanged(PaymentStatus),
    /// The payment is in a final status and was left alone.
    AlreadyProcessed(PaymentStatus),
    /// The gateway status is not in the mapping; nothing was written.
    Ignored { transaction_status: Option<String> },
}

/// Handle a gateway notification.
///
/// The notification body is only trusted for its `order_id`; the status
/// written to the store always comes from re-querying the gateway.
pub async fn handle_notification<S, G>(
    store: &S,
    gateway: &G,
    mapping: &StatusMapping,
    notification: &MidtransNotification,
) -> Result<WebhookOutcome, PaymentError>
where
    S: PaymentStore + ?Sized,
    G: PaymentGateway + ?Sized,
{
    let Some(order_id) = notification.order_id() else {
        error!(notification = ?notification, "Webhook request missing order_id");
        return Err(PaymentError::MissingOrderId);
    };
    let transaction_id = notification.transaction_id();

    info!(
        order_id = %order_id,
        transaction_id = ?transaction_id,
        transaction_status = ?notification.transaction_status,
        "Received gateway notification"
    );

    match gateway.verify_notification(notification) {
        Ok(SignatureCheck::Verified) => debug!(order_id = %order_id, "Notification signature verified"),
        Ok(SignatureCheck::Unsigned) => debug!(order_id = %order_id, "Notification carries no signature"),
        Err(e) => {
            warn!(
                order_id = %order_id,
                transaction_id = ?transaction_id,
                error = %e,
                "Rejecting notification with bad signature"
            );
            return Err(e.into());
        }
    }

    let status = gateway
        .transaction_status(order_id)
        .await
        .inspect_err(|e| {
            error!(
                order_id = %order_id,
                transaction_id = ?transaction_id,
                error = %e,
                "Failed to fetch transaction status from gateway"
            );
        })?;

    let Some(reported_order_id) = status.order_id.as_deref() else {
        error!(
            order_id = %order_id,
            transaction_id = ?transaction_id,
            response = ?status,
            "Gateway status response has no order_id"
        );
        return Err(PaymentError::InvalidGatewayResponse("order_id"));
    };

    let Ok(payment_id) = Uuid::parse_str(reported_order_id) else {
        error!(order_id = %reported_order_id, "Payment record not found: order_id is not a UUID");
        return Err(PaymentError::NotFound(reported_order_id.to_owned()));
    };

    let transaction_status = status.transaction_status.as_deref();
    let target = transaction_status.and_then(|s| mapping.resolve(s));

    for attempt in 1..=MAX_UPDATE_ATTEMPTS {
        let Some(payment) = store.find_by_order_id(payment_id).await? else {
            error!(order_id = %payment_id, "Payment record not found");
            return Err(PaymentError::NotFound(payment_id.to_string()));
        };

        if payment.status.is_final() {
            info!(
                order_id = %payment_id,
                status = %payment.status,
                "Payment has already been processed"
            );
            return Ok(WebhookOutcome::AlreadyProcessed(payment.status));
        }

        let Some(new_status) = target else {
            warn!(
                order_id = %payment_id,
                transaction_status = ?transaction_status,
                "Unhandled transaction status"
            );
            return Ok(WebhookOutcome::Ignored {
                transaction_status: transaction_status.map(str::to_owned),
            });
        };

        if payment.status == new_status {
            debug!(order_id = %payment_id, status = %new_status, "Payment status unchanged");
            return Ok(WebhookOutcome::Unchanged(new_status));
        }

        match store
            .compare_and_set_status(payment_id, payment.status, new_status)
            .await?
        {
            Some(updated) => {
                info!(
                    order_id = %payment_id,
                    previous_status = %payment.status,
                    new_status = %updated.status,
                    "Payment status updated successfully"
                );
                return Ok(WebhookOutcome::Updated {
                    previous: payment.status,
                    current: updated.status,
                });
            }
            None => {
                debug!(
                    order_id = %payment_id,
                    attempt,
                    "Payment changed concurrently, re-reading"
                );
            }
        }
    }

    warn!(order_id = %payment_id, "Giving up on status update after repeated conflicts");
    Err(PaymentError::Conflict(payment_id))
}
