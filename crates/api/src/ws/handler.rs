use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use caseboard_core::types::DbId;
use futures::{SinkExt, StreamExt};

use crate::error::AppResult;
use crate::middleware::auth::{bearer_token, AuthUser};
use crate::query::WsAuthParams;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// HTTP handler that authenticates and upgrades the connection to WebSocket.
///
/// The token is taken from the `Authorization` header, or from `?token=`
/// when the header is absent. After the upgrade the connection is registered
/// with `WsManager` and receives every change event.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsAuthParams>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let auth = match params.token.as_deref() {
        Some(token) if !headers.contains_key(axum::http::header::AUTHORIZATION) => {
            AuthUser::from_token(token, &state)?
        }
        _ => AuthUser::from_token(bearer_token(&headers)?, &state)?,
    };

    let ws_manager = state.ws_manager;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, ws_manager, auth.user_id)))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Drains inbound messages on the current task until close.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, user_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Notifications are server-to-client only; inbound frames are ignored.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
