use crate::transport::http::handlers::common::authenticate;
use crate::transport::http::types::{
    error_response, ApiResponse, AppState, CreateOrderRequest, VerifyPaymentRequest,
};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/donation/create-order",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Gateway order created, pending donation persisted", body = ApiResponse),
        (status = 400, description = "Invalid amount or payment mode", body = ApiResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiResponse),
        (status = 503, description = "Payment gateway not configured", body = ApiResponse)
    )
)]
pub async fn create_order_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(resp) => return resp.into_response(),
    };

    match state
        .service
        .create_order(&user, request.amount, &request.mode_of_donation)
        .await
    {
        Ok(confirmation) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: serde_json::to_value(confirmation).ok(),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/donation/verify",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified, donation completed", body = ApiResponse),
        (status = 400, description = "Signature mismatch", body = ApiResponse),
        (status = 404, description = "No donation matches the order id", body = ApiResponse)
    )
)]
pub async fn verify_payment_handler(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> impl IntoResponse {
    match state
        .service
        .verify_payment(
            &request.razorpay_order_id,
            &request.razorpay_payment_id,
            &request.razorpay_signature,
        )
        .await
    {
        Ok(donation) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(json!({
                    "message": "Payment verified and donation completed",
                    "donation": {
                        "id": donation.id,
                        "amount": donation.amount,
                        "status": donation.status,
                        "gatewayPaymentId": donation.gateway_payment_id,
                    }
                })),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/donation/my-donations",
    responses(
        (status = 200, description = "All of the caller's donations plus summary", body = ApiResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiResponse)
    )
)]
pub async fn my_donations_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(resp) => return resp.into_response(),
    };

    match state.service.user_donations(&user).await {
        Ok((donations, summary)) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(json!({
                    "donations": donations,
                    "summary": summary,
                })),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/donation/donor-stats",
    responses(
        (status = 200, description = "Impact statistics over completed donations", body = ApiResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiResponse)
    )
)]
pub async fn donor_stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(resp) => return resp.into_response(),
    };

    match state.service.donor_stats(&user).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(json!({ "stats": stats })),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/donation/recent",
    responses(
        (status = 200, description = "The caller's latest donations", body = ApiResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiResponse)
    )
)]
pub async fn recent_donations_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(resp) => return resp.into_response(),
    };

    match state.service.recent_donations(&user).await {
        Ok(donations) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(json!({ "donations": donations })),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
