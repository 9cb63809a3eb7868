//! Periodic removal of expired signaling rooms.

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::{infrastructure::dto::websocket::ServerEvent, usecase::ExpireRoomsUseCase};

/// Run one sweep and tell every member of each expired room.
///
/// Returns the number of rooms removed.
pub async fn sweep_expired_rooms(usecase: &ExpireRoomsUseCase) -> usize {
    let expired = usecase.execute().await;
    for room in &expired {
        let event = ServerEvent::RoomExpired {
            room_id: room.id.to_string(),
        };
        if let Err(e) = usecase.notify_room_expired(room, &event.to_json()).await {
            tracing::warn!("Failed to notify expiry of room '{}': {}", room.id, e);
        }
    }
    expired.len()
}

/// Spawn the sweeper on a fixed interval. The first sweep runs one interval
/// after start.
pub fn spawn_room_sweeper(usecase: Arc<ExpireRoomsUseCase>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval の最初の tick は即座に完了する
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = sweep_expired_rooms(&usecase).await;
            if removed > 0 {
                tracing::info!("Room sweep removed {} room(s)", removed);
            }
        }
    })
}
