use crate::transport::http::handlers::{donation, health, ws};
use crate::transport::http::types::{ApiResponse, AppState, CreateOrderRequest, VerifyPaymentRequest};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        donation::create_order_handler,
        donation::verify_payment_handler,
        donation::my_donations_handler,
        donation::donor_stats_handler,
        donation::recent_donations_handler,
        ws::donor_updates_handler
    ),
    components(schemas(
        ApiResponse,
        CreateOrderRequest,
        VerifyPaymentRequest,
        crate::app::OrderConfirmation,
        crate::app::donation_service::OrderDetails,
        crate::domain::Donation,
        crate::domain::DonationSummary,
        crate::domain::DonorStats,
        crate::domain::RecentDonation,
        crate::domain::PaymentMode,
        crate::domain::PaymentStatus
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/donation/create-order",
            post(donation::create_order_handler),
        )
        .route("/api/donation/verify", post(donation::verify_payment_handler))
        .route(
            "/api/donation/my-donations",
            get(donation::my_donations_handler),
        )
        .route("/api/donation/donor-stats", get(donation::donor_stats_handler))
        .route("/api/donation/recent", get(donation::recent_donations_handler))
        .route("/ws/donor-updates", get(ws::donor_updates_handler))
        .with_state(app_state)
}
