//! WebSocket handler for live session updates.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};

use super::handlers::AppState;
use super::types::WsMessage;

/// WebSocket upgrade handler.
pub async fn ws_session_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_session_socket(socket, state))
}

async fn send(
    sink: &mut SplitSink<WebSocket, Message>,
    msg: &WsMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sink.send(Message::Text(json.into())).await
}

/// Push the display name on connect and after every change.
async fn handle_session_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let mut watcher = state.auth.store().subscribe();

    let initial = WsMessage::Session {
        display_name: watcher.borrow_and_update().clone(),
    };
    if send(&mut sink, &initial).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            changed = watcher.changed() => {
                if changed.is_err() {
                    break;
                }
                let display_name = watcher.borrow_and_update().clone();
                if send(&mut sink, &WsMessage::Session { display_name }).await.is_err() {
                    break;
                }
            }
            msg = stream.next() => {
                let text = match msg {
                    Some(Ok(Message::Text(text))) => text.to_string(),
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                        continue;
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => continue,
                };

                let reply = match serde_json::from_str::<WsMessage>(&text) {
                    Ok(WsMessage::Ping) => Some(WsMessage::Pong),
                    Ok(WsMessage::SetDisplayName { display_name }) => {
                        // The change comes back through the watcher.
                        state.auth.store().set_display_name(display_name);
                        None
                    }
                    Ok(_) => None,
                    Err(e) => Some(WsMessage::Error {
                        code: "PARSE_ERROR".to_string(),
                        message: e.to_string(),
                    }),
                };

                if let Some(reply) = reply {
                    if send(&mut sink, &reply).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    tracing::debug!("session websocket closed");
}
