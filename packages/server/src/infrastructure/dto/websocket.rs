//! WebSocket signaling events.
//!
//! Every frame is a JSON object tagged by `type` (kebab-case). Relay events
//! carry an opaque `payload` that the server forwards untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events sent by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    CreateRoom,
    JoinRoom {
        room_id: String,
    },
    /// Enter the room named by the caller's active match id
    JoinMatch {
        match_id: String,
    },
    LeaveRoom {
        room_id: String,
    },
    Offer {
        room_id: String,
        #[serde(default)]
        payload: Value,
    },
    Answer {
        room_id: String,
        #[serde(default)]
        payload: Value,
    },
    Candidate {
        room_id: String,
        #[serde(default)]
        payload: Value,
    },
    ChatMessage {
        room_id: String,
        #[serde(default)]
        payload: Value,
    },
}

/// Kind of a relayed message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
    ChatMessage,
}

impl SignalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::Candidate => "candidate",
            SignalKind::ChatMessage => "chat-message",
        }
    }
}

impl ClientEvent {
    /// Split a relay event into its parts. `None` for room-management events.
    pub fn into_signal(self) -> Option<(SignalKind, String, Value)> {
        match self {
            ClientEvent::Offer { room_id, payload } => Some((SignalKind::Offer, room_id, payload)),
            ClientEvent::Answer { room_id, payload } => {
                Some((SignalKind::Answer, room_id, payload))
            }
            ClientEvent::Candidate { room_id, payload } => {
                Some((SignalKind::Candidate, room_id, payload))
            }
            ClientEvent::ChatMessage { room_id, payload } => {
                Some((SignalKind::ChatMessage, room_id, payload))
            }
            ClientEvent::CreateRoom
            | ClientEvent::JoinRoom { .. }
            | ClientEvent::JoinMatch { .. }
            | ClientEvent::LeaveRoom { .. } => None,
        }
    }
}

/// Error codes carried by `ServerEvent::Error`
pub mod error_code {
    pub const ROOM_NOT_FOUND: &str = "room-not-found";
    pub const UNAUTHENTICATED: &str = "unauthenticated";
    pub const NOT_IN_MATCH: &str = "not-in-match";
    pub const INVALID_MESSAGE: &str = "invalid-message";
    pub const INTERNAL: &str = "internal";
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    Connected { connection_id: String },
    RoomCreated { room_id: String },
    RoomJoined { room_id: String },
    UserJoined { user_id: String },
    UserLeft { user_id: String },
    UserDisconnected { room_id: String },
    RoomExpired { room_id: String },
    Offer { room_id: String, payload: Value },
    Answer { room_id: String, payload: Value },
    Candidate { room_id: String, payload: Value },
    ChatMessage { room_id: String, payload: Value },
    Error { code: String, message: String },
}

impl ServerEvent {
    /// The relayed form of a client signal; `payload` is passed through as-is.
    pub fn relayed(kind: SignalKind, room_id: String, payload: Value) -> Self {
        match kind {
            SignalKind::Offer => ServerEvent::Offer { room_id, payload },
            SignalKind::Answer => ServerEvent::Answer { room_id, payload },
            SignalKind::Candidate => ServerEvent::Candidate { room_id, payload },
            SignalKind::ChatMessage => ServerEvent::ChatMessage { room_id, payload },
        }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        ServerEvent::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize server event: {}", e);
            format!(
                r#"{{"type":"error","code":"{}","message":"serialization failed"}}"#,
                error_code::INTERNAL
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_create_room() {
        // テスト項目: フィールドのない create-room を解釈できる
        // given (前提条件):
        let raw = r#"{"type":"create-room"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::CreateRoom);
    }

    #[test]
    fn test_parse_offer_with_payload() {
        // テスト項目: offer の roomId と payload を取り出せる
        // given (前提条件):
        let raw = r#"{"type":"offer","roomId":"1a2b3c4d","payload":{"sdp":"v=0","type":"offer"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        let (kind, room_id, payload) = event.into_signal().unwrap();
        assert_eq!(kind, SignalKind::Offer);
        assert_eq!(room_id, "1a2b3c4d");
        assert_eq!(payload, json!({"sdp": "v=0", "type": "offer"}));
    }

    #[test]
    fn test_parse_relay_without_room_id_fails() {
        // テスト項目: roomId のない中継イベントは解釈エラーになる
        // given (前提条件):
        let raw = r#"{"type":"candidate","payload":{}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_relayed_event_serialization() {
        // テスト項目: 中継イベントは type / roomId / payload を持つ JSON になる
        // given (前提条件):
        let event = ServerEvent::relayed(
            SignalKind::ChatMessage,
            "1a2b3c4d".to_string(),
            json!({"text": "hola"}),
        );

        // when (操作):
        let value: Value = serde_json::from_str(&event.to_json()).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"type": "chat-message", "roomId": "1a2b3c4d", "payload": {"text": "hola"}})
        );
    }

    #[test]
    fn test_error_event_serialization() {
        // テスト項目: エラーイベントは code と message を持つ
        // given (前提条件):
        let event = ServerEvent::error(error_code::ROOM_NOT_FOUND, "Room not found: x");

        // when (操作):
        let value: Value = serde_json::from_str(&event.to_json()).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"type": "error", "code": "room-not-found", "message": "Room not found: x"})
        );
    }

    #[test]
    fn test_parse_join_match() {
        // テスト項目: join-match の matchId を取り出せる
        // given (前提条件):
        let raw = r#"{"type":"join-match","matchId":"alice-bruno"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::JoinMatch {
                match_id: "alice-bruno".to_string()
            }
        );
        assert!(event.into_signal().is_none());
    }
}
