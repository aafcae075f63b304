use crate::app::{DonationService, DonorNotifier, ServiceError};
use crate::storage::{DonationStore, UserStore};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DonationService>,
    pub users: Arc<dyn UserStore>,
    pub donations: Arc<dyn DonationStore>,
    pub notifier: Arc<DonorNotifier>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateOrderRequest {
    /// Donation amount in rupees.
    pub amount: f64,
    /// Payment mode wire name: `bankTransfer` or `upi`.
    #[serde(rename = "modeofDonation")]
    pub mode_of_donation: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// Maps the workflow error taxonomy onto HTTP statuses.
pub fn error_response(err: ServiceError) -> (StatusCode, Json<ApiResponse>) {
    let status = match &err {
        ServiceError::Validation(_) | ServiceError::VerificationFailed => StatusCode::BAD_REQUEST,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::GatewayUnconfigured => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::Gateway(_) | ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
        }),
    )
}
