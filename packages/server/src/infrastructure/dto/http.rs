//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Generic `{success, message}` body used by commands and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponseDto {
    pub success: bool,
    pub message: String,
}

impl ActionResponseDto {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Response of `GET /api/matching/find-match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchResponseDto {
    pub success: bool,
    pub match_id: String,
    pub partner_id: String,
    pub score: u32,
    pub message: String,
}

/// Response of `GET /api/matching/current-match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMatchDto {
    pub match_id: String,
    pub partner_id: String,
    pub created_at: String,
}

/// One waiting user in `GET /api/matching/waiting-users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingUserDto {
    pub user_id: String,
    pub name: String,
    /// Unix milliseconds
    pub waiting_since: i64,
}

/// One match in `GET /api/matching/active-matches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveMatchDto {
    pub match_id: String,
    pub users: Vec<String>,
}

/// One signaling room in `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub room_id: String,
    pub host: String,
    pub guests: Vec<String>,
    /// "open" | "paired"
    pub state: String,
    /// RFC 3339
    pub created_at: String,
}
