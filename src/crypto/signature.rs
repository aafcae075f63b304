// HMAC-SHA256 signature helpers for gateway payment confirmations.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Builds the signing payload for a payment confirmation.
/// The gateway signs the order id and payment id joined by a pipe.
pub fn signature_payload(order_id: &str, payment_id: &str) -> String {
    format!("{}|{}", order_id, payment_id)
}

/// Computes the hex-encoded HMAC-SHA256 of `order_id|payment_id` under `secret`.
pub fn compute_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(signature_payload(order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a hex-encoded signature in constant time.
///
/// Returns `false` for malformed hex as well as for a mismatch; callers only
/// need the boolean, an attacker-supplied signature carries no error detail.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let supplied = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(signature_payload(order_id, payment_id).as_bytes());
    mac.verify_slice(&supplied).is_ok()
}
