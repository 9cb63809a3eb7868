//! UseCase: WebSocket 切断時の後始末
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPeerUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した接続がホストだったルームはすべて閉じられること
//! - ゲストとして参加していたルームからは外れること
//! - MessagePusher からも登録解除されること
//!
//! ### どのような状況を想定しているか
//! - ホストとゲストを兼ねる接続の切断
//! - どのルームにも属さない接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, LeaveOutcome, MessagePushError, MessagePusher, RoomRepository};

/// 切断処理のユースケース
pub struct DisconnectPeerUseCase {
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectPeerUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            rooms,
            message_pusher,
        }
    }

    /// 接続が属するすべてのルームから退出し、登録を解除する
    ///
    /// # Returns
    ///
    /// ルームごとの退出結果（通知対象を含む）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<LeaveOutcome> {
        // 1. 全ルームから退出
        let outcomes = self.rooms.remove_connection(connection_id).await;

        // 2. 送信チャンネルの登録解除
        self.message_pusher.unregister_client(connection_id).await;

        tracing::info!(
            "Connection '{}' closed ({} room(s) affected)",
            connection_id,
            outcomes.len()
        );
        outcomes
    }

    /// 残りのメンバーに切断を通知
    pub async fn broadcast_left(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.broadcast(targets, message).await
    }
}
