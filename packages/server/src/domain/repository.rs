//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 原子性
//!
//! `MatchmakingRepository` と `RoomRepository` の各メソッドは、呼び出し側から
//! 見て 1 つの不可分な操作です。途中の状態（片側だけ削除されたマッチなど）が
//! 他の呼び出しから観測されることはありません。共有ストアに置き換える場合も
//! この契約をストアのトランザクションで守る必要があります。

use async_trait::async_trait;

use super::{
    ConnectionId, LeaveOutcome, Match, MatchFound, MatchingError, RepositoryError, Room,
    RoomEntry, RoomId, SignalingError, Timestamp, UserId, UserProfile, WaitingEntry,
};

/// プロフィールストア（外部コラボレーター）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// プロフィールを取得。存在しなければ `Ok(None)`。
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError>;
}

/// 待機プールとマッチレジストリ
#[async_trait]
pub trait MatchmakingRepository: Send + Sync {
    /// 待機中でもマッチ中でもないことを確認
    async fn ensure_can_join(&self, user_id: &UserId) -> Result<(), MatchingError>;

    /// 待機プールに追加（重複は拒否）
    async fn add_to_waiting_pool(
        &self,
        profile: UserProfile,
        joined_at: Timestamp,
    ) -> Result<(), MatchingError>;

    /// 待機プールから削除。削除した場合 `true`。
    async fn remove_from_waiting_pool(&self, user_id: &UserId) -> bool;

    /// 最適な相手を選び、両者をプールから外してマッチを記録する
    async fn find_match(&self, user_id: &UserId, now: Timestamp)
    -> Result<MatchFound, MatchingError>;

    /// マッチを終了し、両側のエントリを削除する
    async fn end_match(&self, user_id: &UserId) -> Result<Match, MatchingError>;

    /// 現在のマッチを取得
    async fn get_match(&self, user_id: &UserId) -> Option<Match>;

    /// 待機中のエントリ（参加順）
    async fn get_waiting_entries(&self) -> Vec<WaitingEntry>;

    /// 進行中のマッチ（重複なし）
    async fn get_active_matches(&self) -> Vec<Match>;
}

/// シグナリングルーム
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを作成
    async fn create_room(&self, host: ConnectionId, created_at: Timestamp) -> Room;

    /// ルームに参加。通知対象（自分以外のメンバー）を返す。
    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, SignalingError>;

    /// 指定 ID のルームに入る。なければ作成してホストになる。
    async fn enter_room(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        created_at: Timestamp,
    ) -> RoomEntry;

    /// 中継先（送信者以外のメンバー）を取得
    async fn get_relay_targets(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, SignalingError>;

    /// ルームから退出
    async fn leave_room(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<LeaveOutcome, SignalingError>;

    /// 接続が属する全ルームから退出
    async fn remove_connection(&self, connection_id: &ConnectionId) -> Vec<LeaveOutcome>;

    /// 期限切れのルームを削除して返す
    async fn remove_expired_rooms(&self, now: Timestamp, ttl_millis: i64) -> Vec<Room>;

    /// 全ルームのスナップショット
    async fn get_rooms(&self) -> Vec<Room>;
}
