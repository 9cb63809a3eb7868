//! UseCase: シグナリングメッセージの中継
//!
//! offer / answer / candidate / chat-message をルームの他メンバーへそのまま転送します。
//! 送信者がルームのメンバーかどうかは検証しません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRepository, SignalingError};

/// メッセージ中継のユースケース
pub struct RelaySignalUseCase {
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            rooms,
            message_pusher,
        }
    }

    /// 送信者以外のメンバーへ `message` を転送する
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 転送先
    /// * `Err(SignalingError::RoomNotFound)` - ルームが存在しない
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        message: &str,
    ) -> Result<Vec<ConnectionId>, SignalingError> {
        let targets = self.rooms.get_relay_targets(sender, room_id).await?;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets.clone(), message)
            .await
        {
            tracing::warn!("Relay in room '{}' failed: {}", room_id, e);
        }
        tracing::debug!(
            "Relayed message from '{}' to {} member(s) of room '{}'",
            sender,
            targets.len(),
            room_id
        );
        Ok(targets)
    }
}
