//! UseCase: ルーム一覧の取得（管理者向け）

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// 作成日時の古い順
    pub async fn execute(&self) -> Vec<Room> {
        self.rooms.get_rooms().await
    }
}
