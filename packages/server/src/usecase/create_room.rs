//! UseCase: シグナリングルームの作成

use std::sync::Arc;

use accentswap_shared::time::Clock;

use crate::domain::{ConnectionId, Room, RoomRepository, Timestamp};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { rooms, clock }
    }

    /// `host` をホストとするルームを作成する
    pub async fn execute(&self, host: ConnectionId) -> Room {
        let created_at = Timestamp::new(self.clock.now_millis());
        let room = self.rooms.create_room(host, created_at).await;
        tracing::info!("Room '{}' created by '{}'", room.id, room.host);
        room
    }
}
