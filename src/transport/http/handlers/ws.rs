//! WebSocket endpoint for the donor notification channel.
//!
//! Each connection is joined to the caller's own `donor-<user_id>` topic and
//! receives events as JSON text frames. Events published while nobody is
//! connected are not replayed.

use crate::app::{donor_channel, DonorNotifier};
use crate::domain::User;
use crate::transport::http::handlers::common::{authenticate, authenticate_token};
use crate::transport::http::types::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

#[derive(Deserialize, Debug)]
pub struct WsAuthQuery {
    /// Browser WebSocket clients cannot set headers; they pass the bearer
    /// token here instead.
    pub token: Option<String>,
}

#[utoipa::path(
    get,
    path = "/ws/donor-updates",
    responses(
        (status = 101, description = "Switching protocols; caller joined to their donor channel"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn donor_updates_handler(
    State(state): State<AppState>,
    Query(query): Query<WsAuthQuery>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    let auth = match &query.token {
        Some(token) => authenticate_token(&state, token).await,
        None => authenticate(&state, &headers).await,
    };
    let user = match auth {
        Ok(user) => user,
        Err(resp) => return resp.into_response(),
    };

    let notifier = state.notifier.clone();
    ws.on_upgrade(move |socket| run_donor_socket(socket, user, notifier))
}

async fn run_donor_socket(mut socket: WebSocket, user: User, notifier: Arc<DonorNotifier>) {
    let mut events = notifier.subscribe(user.id).await;
    let channel = donor_channel(user.id);
    println!("> WS: user {} joined {}", user.id, channel);

    let joined = serde_json::json!({ "type": "joined", "channel": channel });
    if socket.send(Message::Text(joined.to_string())).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let Ok(body) = serde_json::to_string(&event) else { continue };
                    if socket.send(Message::Text(body)).await.is_err() {
                        break;
                    }
                }
                // Slow consumer: drop the missed events and keep going,
                // delivery is best-effort.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Pings are answered by axum itself; other client frames
                // carry no meaning on this channel.
                Some(Ok(_)) => {}
            },
        }
    }

    println!("> WS: user {} left {}", user.id, channel);
}
