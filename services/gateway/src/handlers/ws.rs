use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one broadcast session: register with the hub, push the full
/// current state, then forward every hub event to the socket until the
/// client goes away.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (session_id, mut events) = state.hub.register();
    state.hub.push_full_state(session_id, state.ledger.programs());

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!(%session_id, %err, "failed to encode broadcast event");
                        continue;
                    }
                };
                if sink.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            msg = stream.next() => {
                match msg {
                    // Viewers only listen; anything inbound besides close is ignored.
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.hub.unregister(session_id);
}
