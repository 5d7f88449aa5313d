use crate::{
    error::GameError,
    game::{RoundEngine, SelectionOutcome},
    models::{Feedback, RoundStatus},
    websocket::messages::{ClientMessage, ServerMessage},
    AppState, GameSession,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use chrono::Utc;
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// A game owned by a single connection
pub struct ActiveGame {
    pub game_id: Uuid,
    pub engine: RoundEngine,
}

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);
    let connection_id = Uuid::new_v4();

    tracing::info!("WebSocket connection established: {}", connection_id);

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
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        let mut game: Option<ActiveGame> = None;

        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) = handle_client_message(
                            client_msg,
                            &state_for_recv,
                            &tx,
                            &mut game,
                            connection_id,
                        )
                        .await
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
                    tracing::info!("Client disconnected: {}", connection_id);
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

    // Games are not resumable; drop whatever this connection was playing
    state
        .active_games
        .retain(|_, session| session.connection_id != connection_id);

    tracing::info!("WebSocket connection closed: {}", connection_id);
}

/// Handle individual client messages
pub async fn handle_client_message(
    msg: ClientMessage,
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
    game: &mut Option<ActiveGame>,
    connection_id: Uuid,
) -> anyhow::Result<()> {
    match msg {
        ClientMessage::StartGame { mode, rounds } => {
            if let Some(previous) = game.take() {
                state.active_games.remove(&previous.game_id);
                tracing::info!("Game {} abandoned for a new one", previous.game_id);
            }

            let words = state.store.load_words().await;
            let settings = state.config.game.settings(mode, rounds);

            let engine = match RoundEngine::start_game(words, settings, state.config.game.rng()) {
                Ok(engine) => engine,
                Err(e) => {
                    tracing::info!("Game start refused on {}: {}", connection_id, e);
                    tx.send(ServerMessage::Error {
                        message: e.to_string(),
                    })
                    .await?;
                    return Ok(());
                }
            };

            let game_id = Uuid::new_v4();
            state.active_games.insert(
                game_id,
                GameSession {
                    game_id,
                    connection_id,
                    mode,
                    started_at: Utc::now(),
                },
            );
            tracing::info!("Game {} started ({:?}) on {}", game_id, mode, connection_id);

            tx.send(ServerMessage::GameStarted {
                game_id: game_id.to_string(),
                mode,
                total_rounds: engine.scoreboard().total_rounds,
                feedback_delay_ms: state.config.game.feedback_delay_ms,
            })
            .await?;
            tx.send(ServerMessage::RoundState {
                snapshot: engine.snapshot(),
            })
            .await?;

            *game = Some(ActiveGame { game_id, engine });
        }
        ClientMessage::Press { column, index } => {
            let Some(active) = game.as_mut() else {
                tx.send(ServerMessage::Error {
                    message: "No game in progress".to_string(),
                })
                .await?;
                return Ok(());
            };

            match active.engine.select_column_item(column, index) {
                Ok(SelectionOutcome::Resolved {
                    feedback,
                    matched_pair,
                }) => {
                    tx.send(ServerMessage::MatchResolved {
                        feedback,
                        matched_pair,
                    })
                    .await?;
                }
                Ok(_) => {}
                // Stale taps from the client; resync it with the current board
                Err(e @ GameError::InvalidSelection { .. }) => {
                    tracing::debug!("Ignoring press in game {}: {}", active.game_id, e);
                }
                Err(e) => {
                    tx.send(ServerMessage::Error {
                        message: e.to_string(),
                    })
                    .await?;
                }
            }

            tx.send(ServerMessage::RoundState {
                snapshot: active.engine.snapshot(),
            })
            .await?;
        }
        ClientMessage::FeedbackElapsed => {
            let Some(active) = game.as_mut() else {
                return Ok(());
            };

            let status = match active.engine.feedback() {
                Some(Feedback::Correct) => active.engine.after_match(),
                _ => active.engine.clear_feedback(),
            };

            let board = *active.engine.scoreboard();
            if status == RoundStatus::RoundComplete {
                tx.send(ServerMessage::RoundComplete {
                    round: board.current_round - 1,
                    total_rounds: board.total_rounds,
                })
                .await?;
            }

            tx.send(ServerMessage::RoundState {
                snapshot: active.engine.snapshot(),
            })
            .await?;

            if status == RoundStatus::GameComplete {
                if let Some(result) = active.engine.result().cloned() {
                    if let Some((_, session)) = state.active_games.remove(&active.game_id) {
                        tracing::info!(
                            "Game {} ({:?}) finished in {}s: {}/{} ({:.2}%)",
                            session.game_id,
                            session.mode,
                            (result.finished_at - session.started_at).num_seconds(),
                            result.score,
                            result.total,
                            result.accuracy()
                        );
                    }
                    tx.send(ServerMessage::GameOver { result }).await?;
                }
                *game = None;
            }
        }
        ClientMessage::LeaveGame => {
            if let Some(previous) = game.take() {
                state.active_games.remove(&previous.game_id);
                tracing::info!("Game {} left on {}", previous.game_id, connection_id);
            }
        }
    }

    Ok(())
}
