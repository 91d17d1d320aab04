use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use plaza_core::{ClientMessage, ConnId};
use tokio::sync::mpsc;
use tokio::time::{Instant, interval};
use tracing::{info, warn};

use crate::gateway::Gateway;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(gateway): State<Arc<Gateway>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, gateway))
}

async fn handle_socket(socket: WebSocket, gateway: Arc<Gateway>) {
    let conn_id = ConnId::generate();
    info!(%conn_id, "new WebSocket connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut session = gateway.register(conn_id.clone(), tx.clone());

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let heartbeat = gateway.config().heartbeat_interval;
    let idle_timeout = gateway.config().idle_timeout;
    let mut ping = interval(heartbeat);
    let mut last_seen = Instant::now();

    loop {
        tokio::select! {
            frame = receiver.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        last_seen = Instant::now();
                        match ClientMessage::decode(&text) {
                            Ok(msg) => gateway.dispatch(&mut session, msg),
                            // Peers on older protocol revisions may send
                            // frames we do not understand; drop them.
                            Err(e) => warn!(%conn_id, "dropping malformed frame: {e}"),
                        }
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                        last_seen = Instant::now();
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(%conn_id, "WebSocket error: {e}");
                        break;
                    }
                }
            }

            _ = ping.tick() => {
                if last_seen.elapsed() >= idle_timeout {
                    warn!(%conn_id, "connection idle past timeout, closing");
                    break;
                }
                if tx.send(Message::Ping(axum::body::Bytes::new())).is_err() {
                    break;
                }
            }

            _ = &mut send_task => break,
        }
    }

    send_task.abort();
    gateway.disconnect(session);
    info!(%conn_id, "WebSocket disconnected");
}
