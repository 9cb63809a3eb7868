//! UseCase: 現在のマッチの取得

use std::sync::Arc;

use crate::domain::{Match, MatchmakingRepository, UserId};

/// 現在のマッチ取得のユースケース
pub struct GetCurrentMatchUseCase {
    matchmaking: Arc<dyn MatchmakingRepository>,
}

impl GetCurrentMatchUseCase {
    pub fn new(matchmaking: Arc<dyn MatchmakingRepository>) -> Self {
        Self { matchmaking }
    }

    pub async fn execute(&self, user_id: &UserId) -> Option<Match> {
        self.matchmaking.get_match(user_id).await
    }
}
