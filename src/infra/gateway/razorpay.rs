// Responsible for all communication with the Razorpay API.

use crate::crypto;
use crate::infra::gateway::{GatewayError, Order, OrderRequest, PaymentGateway};
use async_trait::async_trait;

const RAZORPAY_API_BASE: &str = "https://api.razorpay.com/v1";

/// Razorpay client holding the key pair and a shared HTTP client.
///
/// Constructed once at startup from environment credentials and injected
/// into the workflow; there is no process-global instance.
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl RazorpayClient {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id,
            key_secret,
            base_url: RAZORPAY_API_BASE.to_string(),
        }
    }

    /// Points the client at a different API base (sandbox, local fake).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, request: OrderRequest) -> Result<Order, GatewayError> {
        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Remote { status, body });
        }

        Ok(response.json::<Order>().await?)
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        crypto::verify_signature(&self.key_secret, order_id, payment_id, signature)
    }
}
