//! Notification signature verification.
//!
//! The gateway signs every HTTP notification with
//!
//! ```text
//! signature_key = hex(SHA512(order_id + status_code + gross_amount + server_key))
//! ```
//!
//! Verification is an additional check only: the authoritative status is
//! always re-queried from the gateway.

use subtle::ConstantTimeEq;

use crate::objects::MidtransNotification;

/// Errors that can occur during signature verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature key is not valid hex")]
    InvalidHex,
    #[error("signature key mismatch")]
    SignatureMismatch,
}

/// Result of checking a notification that passed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCheck {
    /// The signature matched.
    Verified,
    /// The notification did not carry all fields required to verify it.
    Unsigned,
}

/// Compute the raw SHA-512 digest of a notification's signed fields.
fn digest(order_id: &str, status_code: &str, gross_amount: &str, server_key: &str) -> Vec<u8> {
    let mut ctx = ring::digest::Context::new(&ring::digest::SHA512);
    ctx.update(order_id.as_bytes());
    ctx.update(status_code.as_bytes());
    ctx.update(gross_amount.as_bytes());
    ctx.update(server_key.as_bytes());
    ctx.finish().as_ref().to_vec()
}

/// Compute the lowercase hex `signature_key` for the given fields.
pub fn notification_signature(
    order_id: &str,
    status_code: &str,
    gross_amount: &str,
    server_key: &str,
) -> String {
    hex::encode(digest(order_id, status_code, gross_amount, server_key))
}

/// Verify a notification's `signature_key`.
///
/// Returns [`SignatureCheck::Unsigned`] if `signature_key`, `order_id`,
/// `status_code` or `gross_amount` is missing.
pub fn verify_notification(
    notification: &MidtransNotification,
    server_key: &str,
) -> Result<SignatureCheck, SignatureError> {
    let (Some(signature), Some(order_id), Some(status_code), Some(gross_amount)) = (
        notification.signature_key.as_deref(),
        notification.order_id(),
        notification.status_code.as_deref(),
        notification.gross_amount.as_deref(),
    ) else {
        return Ok(SignatureCheck::Unsigned);
    };

    let provided = hex::decode(signature).map_err(|_| SignatureError::InvalidHex)?;
    let expected = digest(order_id, status_code, gross_amount, server_key);
    if !bool::from(provided.ct_eq(&expected)) {
        return Err(SignatureError::SignatureMismatch);
    }
    Ok(SignatureCheck::Verified)
}
