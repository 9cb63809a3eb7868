//! Value objects
//!
//! 識別子とタイムスタンプを表す不変の値。生成時にバリデーションを行うため、
//! 一度作られた値は常に有効であることが保証されます。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// UserId の最大長
pub const USER_ID_MAX_LENGTH: usize = 128;

/// RoomId の長さ（UUID v4 の先頭 8 文字）
pub const ROOM_ID_LENGTH: usize = 8;

/// ユーザー ID
///
/// 認証レイヤーから渡される信頼済みの識別子。前後の空白は取り除かれます。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::Empty("user id"));
        }
        if trimmed.chars().count() > USER_ID_MAX_LENGTH {
            return Err(ValueObjectError::TooLong {
                field: "user id",
                max: USER_ID_MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WebSocket 接続 ID
///
/// 接続ごとにサーバー側で採番されます（UUID v4）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 新しい接続 ID を採番
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::Empty("connection id"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// シグナリングルーム ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::Empty("room id"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// RoomId の生成を担うファクトリ
///
/// 共有しやすいよう UUID v4 の先頭 8 文字を使います。
/// 一意性の確認は `RoomRegistry` 側で行います。
pub struct RoomIdFactory;

impl RoomIdFactory {
    pub fn generate() -> RoomId {
        let simple = Uuid::new_v4().simple().to_string();
        RoomId(simple[..ROOM_ID_LENGTH].to_string())
    }
}

/// マッチ ID
///
/// 2 人のユーザー ID を辞書順に並べて `-` で連結した文字列。どちらの参加者から
/// 計算しても同じ値になります。ID 中の `%` と `-` はそれぞれ `%25` と `%2D` に
/// エスケープするため、異なるペアが同じ ID になることはありません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchId(String);

impl MatchId {
    pub fn for_pair(a: &UserId, b: &UserId) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self(format!(
            "{}-{}",
            escape_match_component(first.as_str()),
            escape_match_component(second.as_str())
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn escape_match_component(value: &str) -> String {
    value.replace('%', "%25").replace('-', "%2D")
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix タイムスタンプ（UTC, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `self` から `later` までの経過ミリ秒
    pub fn elapsed_until(&self, later: Timestamp) -> i64 {
        later.0 - self.0
    }
}
