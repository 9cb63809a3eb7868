//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! `RoomRegistry` 集約を Mutex で保持し、各操作をロック 1 回で完結させます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, LeaveOutcome, Room, RoomEntry, RoomId, RoomRegistry, RoomRepository,
    SignalingError, Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// RoomRegistry 集約
    registry: Arc<Mutex<RoomRegistry>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(registry: Arc<Mutex<RoomRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(RoomRegistry::new())))
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self, host: ConnectionId, created_at: Timestamp) -> Room {
        let mut registry = self.registry.lock().await;
        registry.create_room(host, created_at)
    }

    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, SignalingError> {
        let mut registry = self.registry.lock().await;
        registry.join_room(connection_id, room_id)
    }

    async fn enter_room(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        created_at: Timestamp,
    ) -> RoomEntry {
        let mut registry = self.registry.lock().await;
        registry.enter_room(connection_id, room_id, created_at)
    }

    async fn get_relay_targets(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, SignalingError> {
        let registry = self.registry.lock().await;
        registry.relay_targets(sender, room_id)
    }

    async fn leave_room(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<LeaveOutcome, SignalingError> {
        let mut registry = self.registry.lock().await;
        registry.leave_room(connection_id, room_id)
    }

    async fn remove_connection(&self, connection_id: &ConnectionId) -> Vec<LeaveOutcome> {
        let mut registry = self.registry.lock().await;
        registry.remove_connection(connection_id)
    }

    async fn remove_expired_rooms(&self, now: Timestamp, ttl_millis: i64) -> Vec<Room> {
        let mut registry = self.registry.lock().await;
        registry.remove_expired(now, ttl_millis)
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let registry = self.registry.lock().await;
        registry.rooms()
    }
}
