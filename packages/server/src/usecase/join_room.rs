//! UseCase: シグナリングルームへの参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() と broadcast_user_joined()
//!
//! ### なぜこのテストが必要か
//! - 既存メンバーへの `user-joined` 通知先が正しいこと
//! - 存在しないルームへの参加を拒否すること

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePushError, MessagePusher, RoomId, RoomRepository, SignalingError,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            rooms,
            message_pusher,
        }
    }

    /// ルームに参加する
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - `user-joined` を通知すべき既存メンバー
    /// * `Err(SignalingError::RoomNotFound)` - ルームが存在しない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, SignalingError> {
        let targets = self.rooms.join_room(connection_id, room_id).await?;
        tracing::info!("Connection '{}' joined room '{}'", connection_id, room_id);
        Ok(targets)
    }

    /// 既存メンバーに参加を通知
    pub async fn broadcast_user_joined(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.broadcast(targets, message).await
    }
}
