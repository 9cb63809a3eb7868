//! UseCase: シグナリングルームからの退出
//!
//! ホストが退出するとルームは閉じられ、残りのメンバーには `user-disconnected` が、
//! ゲストが退出した場合は `user-left` が届きます（通知内容の組み立ては UI 層）。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, LeaveOutcome, MessagePushError, MessagePusher, RoomId, RoomRepository,
    SignalingError,
};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            rooms,
            message_pusher,
        }
    }

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<LeaveOutcome, SignalingError> {
        let outcome = self.rooms.leave_room(connection_id, room_id).await?;
        match &outcome {
            LeaveOutcome::Closed { .. } => {
                tracing::info!("Host '{}' left; room '{}' closed", connection_id, room_id)
            }
            LeaveOutcome::GuestLeft { .. } => {
                tracing::info!("Connection '{}' left room '{}'", connection_id, room_id)
            }
            LeaveOutcome::NotMember { .. } => tracing::debug!(
                "Connection '{}' is not a member of room '{}'",
                connection_id,
                room_id
            ),
        }
        Ok(outcome)
    }

    /// 残りのメンバーに退出を通知
    pub async fn broadcast_left(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.broadcast(targets, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Timestamp,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
    };

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn create_usecase() -> (Arc<InMemoryRoomRepository>, LeaveRoomUseCase) {
        let rooms = Arc::new(InMemoryRoomRepository::default());
        let usecase =
            LeaveRoomUseCase::new(rooms.clone(), Arc::new(WebSocketMessagePusher::default()));
        (rooms, usecase)
    }

    #[tokio::test]
    async fn test_host_leave_closes_room() {
        // テスト項目: ホストの退出でルームが閉じ、ゲストが通知対象になる
        // given (前提条件):
        let (rooms, usecase) = create_usecase();
        let room = rooms.create_room(connection("host"), Timestamp::new(0)).await;
        rooms.join_room(&connection("guest"), &room.id).await.unwrap();

        // when (操作):
        let outcome = usecase.execute(&connection("host"), &room.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            outcome,
            LeaveOutcome::Closed {
                room_id: room.id.clone(),
                notify: vec![connection("guest")],
            }
        );
        assert!(rooms.get_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_guest_leave_keeps_room() {
        // テスト項目: ゲストの退出ではルームが残り、ホストが通知対象になる
        // given (前提条件):
        let (rooms, usecase) = create_usecase();
        let room = rooms.create_room(connection("host"), Timestamp::new(0)).await;
        rooms.join_room(&connection("guest"), &room.id).await.unwrap();

        // when (操作):
        let outcome = usecase.execute(&connection("guest"), &room.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            outcome,
            LeaveOutcome::GuestLeft {
                room_id: room.id.clone(),
                notify: vec![connection("host")],
            }
        );
        assert_eq!(rooms.get_rooms().await[0].guests.len(), 0);
    }

    #[tokio::test]
    async fn test_leave_unknown_room() {
        // テスト項目: 存在しないルームからの退出は RoomNotFound
        // given (前提条件):
        let (_rooms, usecase) = create_usecase();
        let room_id = RoomId::new("abcdef01".to_string()).unwrap();

        // when (操作):
        let result = usecase.execute(&connection("host"), &room_id).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SignalingError::RoomNotFound("abcdef01".to_string()))
        );
    }
}
