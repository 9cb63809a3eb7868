//! UseCase: マッチしたペア用のシグナリングルームへの入室
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinMatchRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - マッチした 2 人が matchId をルーム ID として同じルームに入れること
//! - マッチの当事者以外はそのルームに入れないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 人目がホストとして作成、2 人目がゲストとして参加
//! - 異常系：ユーザー ID なし、別のマッチ ID、マッチなし

use std::sync::Arc;

use accentswap_shared::time::Clock;

use crate::domain::{
    ConnectionId, MatchmakingRepository, MessagePushError, MessagePusher, RoomEntry, RoomId,
    RoomRepository, SignalingError, Timestamp, UserId,
};

/// マッチ用ルーム入室のユースケース
pub struct JoinMatchRoomUseCase {
    matchmaking: Arc<dyn MatchmakingRepository>,
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinMatchRoomUseCase {
    pub fn new(
        matchmaking: Arc<dyn MatchmakingRepository>,
        rooms: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            matchmaking,
            rooms,
            message_pusher,
            clock,
        }
    }

    /// `match_id` を ID とするルームに入る
    ///
    /// 呼び出し元ユーザーの進行中のマッチが `match_id` と一致する場合のみ許可されます。
    /// ルームがなければ作成してホストになり、あればゲストとして参加します。
    ///
    /// # Returns
    ///
    /// * `Ok(RoomEntry)` - 作成したか参加したか（参加時は通知対象を含む）
    /// * `Err(SignalingError::Unauthenticated)` - 接続にユーザー ID がない
    /// * `Err(SignalingError::NotInMatch)` - `match_id` のマッチの当事者ではない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        user_id: Option<&UserId>,
        match_id: &str,
    ) -> Result<RoomEntry, SignalingError> {
        let user_id = user_id.ok_or(SignalingError::Unauthenticated)?;

        let active = self
            .matchmaking
            .get_match(user_id)
            .await
            .filter(|m| m.id.as_str() == match_id)
            .ok_or_else(|| SignalingError::NotInMatch(match_id.to_string()))?;
        let room_id = RoomId::new(active.id.into_string())
            .map_err(|_| SignalingError::NotInMatch(match_id.to_string()))?;

        let now = Timestamp::new(self.clock.now_millis());
        let entry = self.rooms.enter_room(connection_id, room_id, now).await;
        match &entry {
            RoomEntry::Created(room) => tracing::info!(
                "User '{}' opened match room '{}' on '{}'",
                user_id,
                room.id,
                connection_id
            ),
            RoomEntry::Joined { room_id, .. } => tracing::info!(
                "User '{}' joined match room '{}' on '{}'",
                user_id,
                room_id,
                connection_id
            ),
        }
        Ok(entry)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ProficiencyLevel, UserProfile},
        infrastructure::{
            message_pusher::WebSocketMessagePusher,
            repository::{InMemoryMatchmakingRepository, InMemoryRoomRepository},
        },
    };
    use accentswap_shared::time::FixedClock;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn profile(id: &str, preferred: &str, learning: &str) -> UserProfile {
        UserProfile {
            id: user(id),
            name: id.to_string(),
            preferred_language: preferred.to_string(),
            learning_languages: [learning.to_string()].into_iter().collect(),
            proficiency: ProficiencyLevel::Beginner,
            interests: Default::default(),
        }
    }

    async fn create_matched_usecase() -> (Arc<InMemoryRoomRepository>, JoinMatchRoomUseCase) {
        let matchmaking = Arc::new(InMemoryMatchmakingRepository::default());
        matchmaking
            .add_to_waiting_pool(profile("alice", "English", "Spanish"), Timestamp::new(0))
            .await
            .unwrap();
        matchmaking
            .add_to_waiting_pool(profile("bruno", "Spanish", "English"), Timestamp::new(1))
            .await
            .unwrap();
        matchmaking
            .find_match(&user("alice"), Timestamp::new(2))
            .await
            .unwrap();
        let rooms = Arc::new(InMemoryRoomRepository::default());
        let usecase = JoinMatchRoomUseCase::new(
            matchmaking,
            rooms.clone(),
            Arc::new(WebSocketMessagePusher::default()),
            Arc::new(FixedClock::new(100)),
        );
        (rooms, usecase)
    }

    #[tokio::test]
    async fn test_matched_pair_meets_in_match_room() {
        // テスト項目: マッチした 2 人が matchId のルームでホストとゲストになる
        // given (前提条件):
        let (rooms, usecase) = create_matched_usecase().await;

        // when (操作):
        let first = usecase
            .execute(&connection("c1"), Some(&user("bruno")), "alice-bruno")
            .await
            .unwrap();
        let second = usecase
            .execute(&connection("c2"), Some(&user("alice")), "alice-bruno")
            .await
            .unwrap();

        // then (期待する結果):
        assert!(matches!(first, RoomEntry::Created(ref room) if room.id.as_str() == "alice-bruno"));
        assert_eq!(
            second,
            RoomEntry::Joined {
                room_id: RoomId::new("alice-bruno".to_string()).unwrap(),
                notify: vec![connection("c1")],
            }
        );
        let snapshot = rooms.get_rooms().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].host, connection("c1"));
        assert_eq!(snapshot[0].created_at, Timestamp::new(100));
    }

    #[tokio::test]
    async fn test_outsider_cannot_enter_match_room() {
        // テスト項目: マッチの当事者でないユーザーは NotInMatch になり、ルームは作られない
        // given (前提条件):
        let (rooms, usecase) = create_matched_usecase().await;

        // when (操作):
        let outsider = usecase
            .execute(&connection("c3"), Some(&user("mallory")), "alice-bruno")
            .await;
        let wrong_id = usecase
            .execute(&connection("c1"), Some(&user("alice")), "alice-carol")
            .await;

        // then (期待する結果):
        assert_eq!(
            outsider,
            Err(SignalingError::NotInMatch("alice-bruno".to_string()))
        );
        assert_eq!(
            wrong_id,
            Err(SignalingError::NotInMatch("alice-carol".to_string()))
        );
        assert!(rooms.get_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_connection_without_identity() {
        // テスト項目: ユーザー ID のない接続は Unauthenticated
        // given (前提条件):
        let (_rooms, usecase) = create_matched_usecase().await;

        // when (操作):
        let result = usecase
            .execute(&connection("c1"), None, "alice-bruno")
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SignalingError::Unauthenticated));
    }
}
