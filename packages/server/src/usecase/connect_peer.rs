//! UseCase: WebSocket 接続の受け付け

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// 接続受け付けのユースケース
pub struct ConnectPeerUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectPeerUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続 ID を払い出し、送信チャンネルを登録する
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        tracing::info!("Connection '{}' opened", connection_id);
        connection_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::message_pusher::WebSocketMessagePusher;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_registers_unique_connections() {
        // テスト項目: 接続ごとに異なる ID が払い出され、送信可能になる
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectPeerUseCase::new(pusher.clone());
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let first = usecase.execute(tx1).await;
        let second = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(pusher.count_clients().await, 2);
        pusher.push_to(&first, "ping").await.unwrap();
        assert_eq!(rx1.recv().await, Some("ping".to_string()));
    }
}
