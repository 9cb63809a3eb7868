//! UseCase: マッチの終了

use std::sync::Arc;

use crate::domain::{Match, MatchingError, MatchmakingRepository, UserId};

/// マッチ終了のユースケース
pub struct EndMatchUseCase {
    matchmaking: Arc<dyn MatchmakingRepository>,
}

impl EndMatchUseCase {
    pub fn new(matchmaking: Arc<dyn MatchmakingRepository>) -> Self {
        Self { matchmaking }
    }

    /// マッチを終了する。両者ともどこにも属さない状態に戻り、再参加できる。
    pub async fn execute(&self, user_id: &UserId) -> Result<Match, MatchingError> {
        let ended = self.matchmaking.end_match(user_id).await?;
        tracing::info!("Match '{}' ended by '{}'", ended.id, user_id);
        Ok(ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ProficiencyLevel, Timestamp, UserProfile},
        infrastructure::repository::InMemoryMatchmakingRepository,
    };

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
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

    #[tokio::test]
    async fn test_end_match_releases_both_users() {
        // テスト項目: マッチ終了で両者が再参加可能になる
        // given (前提条件):
        let matchmaking = Arc::new(InMemoryMatchmakingRepository::default());
        matchmaking
            .add_to_waiting_pool(profile("a", "English", "Spanish"), Timestamp::new(0))
            .await
            .unwrap();
        matchmaking
            .add_to_waiting_pool(profile("b", "Spanish", "English"), Timestamp::new(1))
            .await
            .unwrap();
        matchmaking
            .find_match(&user("a"), Timestamp::new(2))
            .await
            .unwrap();
        let usecase = EndMatchUseCase::new(matchmaking.clone());

        // when (操作):
        let ended = usecase.execute(&user("b")).await.unwrap();

        // then (期待する結果):
        assert_eq!(ended.id.as_str(), "a-b");
        assert!(matchmaking.get_active_matches().await.is_empty());
        assert!(matchmaking.ensure_can_join(&user("a")).await.is_ok());
        assert!(matchmaking.ensure_can_join(&user("b")).await.is_ok());
    }

    #[tokio::test]
    async fn test_end_without_match() {
        // テスト項目: マッチしていないユーザーの終了は NoActiveMatch
        // given (前提条件):
        let usecase = EndMatchUseCase::new(Arc::new(InMemoryMatchmakingRepository::default()));

        // when (操作):
        let result = usecase.execute(&user("a")).await;

        // then (期待する結果):
        assert_eq!(result, Err(MatchingError::NoActiveMatch));
    }
}
