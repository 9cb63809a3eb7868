//! Domain errors.

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// マッチング処理のエラー
///
/// `NoMatch` は「今は相手がいない」ことを表す正常系の結果で、呼び出し側は
/// 時間をおいて再試行することが期待されています。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    #[error("User already in waiting pool")]
    AlreadyWaiting,

    #[error("User already in an active match")]
    AlreadyMatched,

    #[error("User not found")]
    UserNotFound,

    #[error("User not in waiting pool")]
    NotWaiting,

    #[error("No suitable match found")]
    NoMatch,

    #[error("User already has an active match")]
    ConflictingMatch,

    #[error("User not in an active match")]
    NoActiveMatch,
}

impl MatchingError {
    /// 再試行すべき結果かどうか
    pub fn is_retryable(&self) -> bool {
        matches!(self, MatchingError::NoMatch)
    }
}

/// シグナリングのエラー（送信元の接続にのみ通知される）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalingError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),
    #[error("Connection has no user identity")]
    Unauthenticated,
    #[error("Not a participant of match: {0}")]
    NotInMatch(String),
}

/// 外部データストアのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
