use crate::domain::User;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;

fn unauthorized(message: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }),
    )
}

/// Resolves the caller from an `Authorization: Bearer <token>` header.
///
/// Every workflow operation requires this identity; it supplies the donor
/// snapshot (name/email/phone) for order creation.
pub async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<User, (StatusCode, Json<ApiResponse>)> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| unauthorized("Missing bearer token"))?;
    authenticate_token(state, token).await
}

/// Token-based variant for transports that cannot set headers (the browser
/// WebSocket API), fed from a `?token=` query parameter.
pub async fn authenticate_token(
    state: &AppState,
    token: &str,
) -> Result<User, (StatusCode, Json<ApiResponse>)> {
    match state.users.find_by_token(token).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(unauthorized("Invalid token")),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(format!("User lookup failed: {}", e)),
            }),
        )),
    }
}
