//! UseCase: 期限切れルームの掃除
//!
//! 定期タスクから呼ばれ、作成から TTL を超えたルームを削除します。

use std::sync::Arc;

use accentswap_shared::time::Clock;

use crate::domain::{MessagePushError, MessagePusher, Room, RoomRepository, Timestamp};

/// 期限切れルーム削除のユースケース
pub struct ExpireRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    /// ルームの寿命（ミリ秒）
    ttl_millis: i64,
}

impl ExpireRoomsUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        ttl_millis: i64,
    ) -> Self {
        Self {
            rooms,
            message_pusher,
            clock,
            ttl_millis,
        }
    }

    /// 期限切れのルームを削除して返す
    pub async fn execute(&self) -> Vec<Room> {
        let now = Timestamp::new(self.clock.now_millis());
        let expired = self.rooms.remove_expired_rooms(now, self.ttl_millis).await;
        for room in &expired {
            tracing::info!("Room '{}' expired", room.id);
        }
        expired
    }

    /// 削除されたルームの全メンバーに通知
    pub async fn notify_room_expired(
        &self,
        room: &Room,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.broadcast(room.members(), message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ConnectionId,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
    };
    use accentswap_shared::time::ManualClock;
    use tokio::sync::mpsc;

    const HOUR: i64 = 3_600_000;

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_room_expires_after_ttl() {
        // テスト項目: TTL を超えたルームだけが削除される
        // given (前提条件):
        let rooms = Arc::new(InMemoryRoomRepository::default());
        let clock = Arc::new(ManualClock::new(0));
        rooms.create_room(connection("old"), Timestamp::new(0)).await;
        rooms
            .create_room(connection("young"), Timestamp::new(HOUR / 2))
            .await;
        let usecase = ExpireRoomsUseCase::new(
            rooms.clone(),
            Arc::new(WebSocketMessagePusher::default()),
            clock.clone(),
            HOUR,
        );

        // when (操作):
        let before = usecase.execute().await;
        clock.advance(HOUR + 1);
        let after = usecase.execute().await;

        // then (期待する結果):
        assert!(before.is_empty());
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].host, connection("old"));
        assert_eq!(rooms.get_rooms().await.len(), 1);
    }

    #[tokio::test]
    async fn test_notify_room_expired_reaches_all_members() {
        // テスト項目: 期限切れ通知はホストとゲストの両方に届く
        // given (前提条件):
        let rooms = Arc::new(InMemoryRoomRepository::default());
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let (host_tx, mut host_rx) = mpsc::unbounded_channel();
        let (guest_tx, mut guest_rx) = mpsc::unbounded_channel();
        pusher.register_client(connection("host"), host_tx).await;
        pusher.register_client(connection("guest"), guest_tx).await;
        let room = rooms.create_room(connection("host"), Timestamp::new(0)).await;
        rooms.join_room(&connection("guest"), &room.id).await.unwrap();
        let usecase = ExpireRoomsUseCase::new(
            rooms,
            pusher,
            Arc::new(ManualClock::new(HOUR + 1)),
            HOUR,
        );

        // when (操作):
        let expired = usecase.execute().await;
        usecase
            .notify_room_expired(&expired[0], "expired")
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(host_rx.recv().await, Some("expired".to_string()));
        assert_eq!(guest_rx.recv().await, Some("expired".to_string()));
    }
}
