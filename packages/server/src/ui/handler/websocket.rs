//! WebSocket signaling handler.
//!
//! Each connection gets a server-assigned `ConnectionId`. Outbound frames go
//! through the connection's channel (registered with the MessagePusher), so
//! replies to the sender and relays from other peers share one writer task.
//! The proxy-supplied `x-user-id` on the upgrade request, if any, identifies
//! the peer for `join-match`.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, LeaveOutcome, PusherChannel, RoomEntry, RoomId, SignalingError, UserId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent, error_code},
    ui::{extractor::OptionalUser, state::AppState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    OptionalUser(user_id): OptionalUser,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id))
}

/// Spawns a task that forwards queued frames to the WebSocket sink.
///
/// Ends when the sink fails or every sender of `rx` has been dropped.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user_id: Option<UserId>) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    let connection_id = state.connect_peer_usecase.execute(tx.clone()).await;
    reply(
        &tx,
        ServerEvent::Connected {
            connection_id: connection_id.to_string(),
        },
    );

    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text_frame(
                        &recv_state,
                        &recv_connection_id,
                        user_id.as_ref(),
                        &tx,
                        text.as_str(),
                    )
                    .await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                // Ping/pong is handled by axum
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let outcomes = state.disconnect_peer_usecase.execute(&connection_id).await;
    for outcome in outcomes {
        if let Some((targets, message)) = leave_notification(&connection_id, outcome)
            && let Err(e) = state
                .disconnect_peer_usecase
                .broadcast_left(targets, &message)
                .await
        {
            tracing::warn!("Failed to notify disconnect of '{}': {}", connection_id, e);
        }
    }
}

/// Queue an event for the connection itself.
fn reply(tx: &PusherChannel, event: ServerEvent) {
    if tx.send(event.to_json()).is_err() {
        tracing::debug!("Reply dropped; connection already closing");
    }
}

fn reply_signaling_error(tx: &PusherChannel, error: SignalingError) {
    let code = match error {
        SignalingError::RoomNotFound(_) => error_code::ROOM_NOT_FOUND,
        SignalingError::Unauthenticated => error_code::UNAUTHENTICATED,
        SignalingError::NotInMatch(_) => error_code::NOT_IN_MATCH,
    };
    reply(tx, ServerEvent::error(code, error.to_string()));
}

/// The notification other members get when a connection leaves a room.
fn leave_notification(
    connection_id: &ConnectionId,
    outcome: LeaveOutcome,
) -> Option<(Vec<ConnectionId>, String)> {
    match outcome {
        LeaveOutcome::Closed { room_id, notify } => {
            let event = ServerEvent::UserDisconnected {
                room_id: room_id.into_string(),
            };
            Some((notify, event.to_json()))
        }
        LeaveOutcome::GuestLeft { notify, .. } => {
            let event = ServerEvent::UserLeft {
                user_id: connection_id.to_string(),
            };
            Some((notify, event.to_json()))
        }
        LeaveOutcome::NotMember { .. } => None,
    }
}

async fn handle_text_frame(
    state: &AppState,
    connection_id: &ConnectionId,
    user_id: Option<&UserId>,
    tx: &PusherChannel,
    text: &str,
) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("Malformed frame from '{}': {}", connection_id, e);
            reply(
                tx,
                ServerEvent::error(error_code::INVALID_MESSAGE, format!("Invalid message: {}", e)),
            );
            return;
        }
    };

    match event {
        ClientEvent::CreateRoom => {
            let room = state
                .create_room_usecase
                .execute(connection_id.clone())
                .await;
            reply(
                tx,
                ServerEvent::RoomCreated {
                    room_id: room.id.into_string(),
                },
            );
        }
        ClientEvent::JoinRoom { room_id } => {
            let Some(room_id) = parse_room_id(tx, room_id) else {
                return;
            };
            match state.join_room_usecase.execute(connection_id, &room_id).await {
                Ok(targets) => {
                    reply(
                        tx,
                        ServerEvent::RoomJoined {
                            room_id: room_id.to_string(),
                        },
                    );
                    let joined = ServerEvent::UserJoined {
                        user_id: connection_id.to_string(),
                    };
                    if let Err(e) = state
                        .join_room_usecase
                        .broadcast_user_joined(targets, &joined.to_json())
                        .await
                    {
                        tracing::warn!("Failed to broadcast user-joined: {}", e);
                    }
                }
                Err(e) => reply_signaling_error(tx, e),
            }
        }
        ClientEvent::JoinMatch { match_id } => {
            match state
                .join_match_room_usecase
                .execute(connection_id, user_id, &match_id)
                .await
            {
                Ok(RoomEntry::Created(room)) => reply(
                    tx,
                    ServerEvent::RoomCreated {
                        room_id: room.id.into_string(),
                    },
                ),
                Ok(RoomEntry::Joined { room_id, notify }) => {
                    reply(
                        tx,
                        ServerEvent::RoomJoined {
                            room_id: room_id.into_string(),
                        },
                    );
                    let joined = ServerEvent::UserJoined {
                        user_id: connection_id.to_string(),
                    };
                    if let Err(e) = state
                        .join_match_room_usecase
                        .broadcast_user_joined(notify, &joined.to_json())
                        .await
                    {
                        tracing::warn!("Failed to broadcast user-joined: {}", e);
                    }
                }
                Err(e) => reply_signaling_error(tx, e),
            }
        }
        ClientEvent::LeaveRoom { room_id } => {
            let Some(room_id) = parse_room_id(tx, room_id) else {
                return;
            };
            match state.leave_room_usecase.execute(connection_id, &room_id).await {
                Ok(outcome) => {
                    if let Some((targets, message)) = leave_notification(connection_id, outcome)
                        && let Err(e) = state
                            .leave_room_usecase
                            .broadcast_left(targets, &message)
                            .await
                    {
                        tracing::warn!("Failed to broadcast leave: {}", e);
                    }
                }
                Err(e) => reply_signaling_error(tx, e),
            }
        }
        signal => {
            let Some((kind, raw_room_id, payload)) = signal.into_signal() else {
                return;
            };
            let Some(room_id) = parse_room_id(tx, raw_room_id.clone()) else {
                return;
            };
            let relayed = ServerEvent::relayed(kind, raw_room_id, payload).to_json();
            if let Err(e) = state
                .relay_signal_usecase
                .execute(connection_id, &room_id, &relayed)
                .await
            {
                tracing::debug!(
                    "Dropped {} from '{}': {}",
                    kind.as_str(),
                    connection_id,
                    e
                );
                reply_signaling_error(tx, e);
            }
        }
    }
}

/// An empty room id can never name a room; report it as a malformed frame.
fn parse_room_id(tx: &PusherChannel, raw: String) -> Option<RoomId> {
    match RoomId::new(raw) {
        Ok(room_id) => Some(room_id),
        Err(e) => {
            reply(tx, ServerEvent::error(error_code::INVALID_MESSAGE, e.to_string()));
            None
        }
    }
}
