//! Domain entities.

use std::collections::BTreeSet;

use super::value_object::{ConnectionId, MatchId, RoomId, Timestamp, UserId};

/// 言語の習熟度（順序付き）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ProficiencyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Fluent,
}

impl ProficiencyLevel {
    /// Beginner=0 … Fluent=3
    pub fn ordinal(self) -> u32 {
        match self {
            ProficiencyLevel::Beginner => 0,
            ProficiencyLevel::Intermediate => 1,
            ProficiencyLevel::Advanced => 2,
            ProficiencyLevel::Fluent => 3,
        }
    }

    /// 名前から習熟度を解決する。未知の値は `None`。
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Beginner" => Some(ProficiencyLevel::Beginner),
            "Intermediate" => Some(ProficiencyLevel::Intermediate),
            "Advanced" => Some(ProficiencyLevel::Advanced),
            "Fluent" => Some(ProficiencyLevel::Fluent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "Beginner",
            ProficiencyLevel::Intermediate => "Intermediate",
            ProficiencyLevel::Advanced => "Advanced",
            ProficiencyLevel::Fluent => "Fluent",
        }
    }
}

/// ユーザープロフィール
///
/// プロフィールストア（外部）が所有し、このサーバーからは読み取り専用です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub preferred_language: String,
    pub learning_languages: BTreeSet<String>,
    pub proficiency: ProficiencyLevel,
    pub interests: BTreeSet<String>,
}

/// 待機プールのエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingEntry {
    pub user_id: UserId,
    /// 参加時点のプロフィールのスナップショット
    pub profile: UserProfile,
    pub joined_at: Timestamp,
}

impl WaitingEntry {
    pub fn new(profile: UserProfile, joined_at: Timestamp) -> Self {
        Self {
            user_id: profile.id.clone(),
            profile,
            joined_at,
        }
    }
}

/// 成立したマッチ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    pub user_a: UserId,
    pub user_b: UserId,
    pub created_at: Timestamp,
}

impl Match {
    pub fn new(user_a: UserId, user_b: UserId, created_at: Timestamp) -> Self {
        Self {
            id: MatchId::for_pair(&user_a, &user_b),
            user_a,
            user_b,
            created_at,
        }
    }

    /// `user_id` の相手を返す。参加者でなければ `None`。
    pub fn partner_of(&self, user_id: &UserId) -> Option<&UserId> {
        if &self.user_a == user_id {
            Some(&self.user_b)
        } else if &self.user_b == user_id {
            Some(&self.user_a)
        } else {
            None
        }
    }

    pub fn users(&self) -> [&UserId; 2] {
        [&self.user_a, &self.user_b]
    }
}

/// `find_match` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFound {
    pub match_id: MatchId,
    pub partner_id: UserId,
    pub score: u32,
}

/// ルームの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState {
    /// ホストのみ
    Open,
    /// ホストとゲストが揃っている
    Paired,
}

/// シグナリングルーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub host: ConnectionId,
    /// 参加順に並んだゲスト
    pub guests: Vec<ConnectionId>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(id: RoomId, host: ConnectionId, created_at: Timestamp) -> Self {
        Self {
            id,
            host,
            guests: Vec::new(),
            created_at,
        }
    }

    pub fn state(&self) -> RoomState {
        if self.guests.is_empty() {
            RoomState::Open
        } else {
            RoomState::Paired
        }
    }

    pub fn is_host(&self, connection_id: &ConnectionId) -> bool {
        &self.host == connection_id
    }

    pub fn has_member(&self, connection_id: &ConnectionId) -> bool {
        self.is_host(connection_id) || self.guests.contains(connection_id)
    }

    /// ホストを先頭にした全メンバー
    pub fn members(&self) -> Vec<ConnectionId> {
        std::iter::once(self.host.clone())
            .chain(self.guests.iter().cloned())
            .collect()
    }

    /// `exclude` 以外の全メンバー
    pub fn members_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.members()
            .into_iter()
            .filter(|id| id != exclude)
            .collect()
    }

    pub fn is_expired(&self, now: Timestamp, ttl_millis: i64) -> bool {
        self.created_at.elapsed_until(now) > ttl_millis
    }
}
