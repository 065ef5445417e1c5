use crate::{
    game::CommandOutcome,
    session::GameSession,
    websocket::messages::{ClientMessage, ServerMessage},
    AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub game_id: Uuid,
}

/// WebSocket upgrade handler for an existing game
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(session) = state.session(&params.game_id) else {
        tracing::debug!("WebSocket requested for unknown game {}", params.game_id);
        return StatusCode::NOT_FOUND.into_response();
    };
    ws.on_upgrade(move |socket| handle_socket(socket, state, session))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session: Arc<GameSession>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);
    let game_id = session.game_id;
    // Keeps the session off the idle reaper until the socket closes
    let _attached = session.attach_socket();

    tracing::info!("WebSocket connection established for game {}", game_id);

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) =
                            handle_client_message(client_msg, &state, &session, &tx).await
                        {
                            tracing::error!("Error handling message: {}", e);
                            let error_msg = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            let _ = tx.send(error_msg).await;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client disconnected from game {}", session.game_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    tracing::info!("WebSocket connection closed for game {}", game_id);
}

/// Handle individual client messages
async fn handle_client_message(
    msg: ClientMessage,
    state: &Arc<AppState>,
    session: &Arc<GameSession>,
    tx: &mpsc::Sender<ServerMessage>,
) -> anyhow::Result<()> {
    let outcome = match msg {
        ClientMessage::PlaceTile { origin, row, col } => {
            tracing::debug!(
                "Game {}: place {:?} at ({}, {})",
                session.game_id,
                origin,
                row,
                col
            );
            session.place(origin, row, col).await
        }
        ClientMessage::ReturnTile { row, col } => {
            tracing::debug!("Game {}: return ({}, {})", session.game_id, row, col);
            session.return_tile(row, col).await
        }
        ClientMessage::PickUp { origin } => session.pick_up(origin).await,
        ClientMessage::DropOn { row, col } => session.drop_on(row, col).await,
        ClientMessage::DropOnRack => session.drop_on_rack().await,
        ClientMessage::CancelPickUp => session.cancel_pick_up().await,
        ClientMessage::Skip => session.skip().await,
        ClientMessage::GetState => CommandOutcome {
            snapshot: session.snapshot().await,
            rejection: None,
        },
        ClientMessage::Commit => {
            // Validation runs in its own task so a skip on this socket can
            // still get through while words are being looked up
            let state = state.clone();
            let session = session.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let (outcome, applied) = session.commit(&state.validator).await;
                if let Some(applied) = applied {
                    let scored = ServerMessage::MoveScored {
                        words: applied.score.words,
                        total: applied.score.total,
                    };
                    if tx.send(scored).await.is_err() {
                        return;
                    }
                }
                let _ = tx
                    .send(ServerMessage::State {
                        snapshot: outcome.snapshot,
                        rejection: outcome.rejection,
                    })
                    .await;
            });
            return Ok(());
        }
    };

    tx.send(ServerMessage::State {
        snapshot: outcome.snapshot,
        rejection: outcome.rejection,
    })
    .await?;

    Ok(())
}
