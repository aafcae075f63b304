//! Payment gateway contract.
//!
//! The workflow is written against `PaymentGateway`; `razorpay.rs` is the
//! production implementation and tests substitute a stub.

pub mod razorpay;

pub use razorpay::RazorpayClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("gateway request error: {0:?}")]
    Http(#[from] reqwest::Error),

    #[error("gateway rejected request: status={status}, body={body}")]
    Remote {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Order creation request, amounts in the gateway's minor currency unit
/// (paise for INR).
#[derive(Clone, Debug, Serialize)]
pub struct OrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: serde_json::Value,
}

/// The gateway-side reservation of an expected payment.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Order {
    pub id: String,
    /// Amount actually reserved, in minor units.
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a remote order reserving `request.amount` minor units.
    async fn create_order(&self, request: OrderRequest) -> Result<Order, GatewayError>;

    /// Public key id, handed to the browser checkout widget.
    fn key_id(&self) -> &str;

    /// Checks a payment confirmation signature against the shared secret.
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}
