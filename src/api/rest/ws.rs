use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::SinkExt;
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use crate::notify::Envelope;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct WsQuery {
    pub user_id: Uuid,
}

/// Personal notification stream for one user.
pub async fn user_ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.notifier.subscribe(query.user_id);
    ws.on_upgrade(move |socket| forward(socket, rx))
}

/// Shared topic every carrier listens on for new/re-opened requests.
pub async fn carrier_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.notifier.subscribe_carrier_topic();
    ws.on_upgrade(move |socket| forward(socket, rx))
}

async fn forward(socket: WebSocket, mut rx: broadcast::Receiver<Envelope>) {
    let (mut sender, mut receiver) = socket.split();

    info!("websocket client connected");

    let send_task = tokio::spawn(async move {
        while let Ok(envelope) = rx.recv().await {
            let json = match serde_json::to_string(&envelope) {
                Ok(json) => json,
                Err(err) => {
                    warn!(error = %err, "failed to serialize envelope for ws");
                    continue;
                }
            };

            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(_msg)) = receiver.next().await {}
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    info!("websocket client disconnected");
}
