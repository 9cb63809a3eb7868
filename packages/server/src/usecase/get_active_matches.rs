//! UseCase: 進行中のマッチ一覧の取得（管理者向け）

use std::sync::Arc;

use crate::domain::{Match, MatchmakingRepository};

/// 進行中マッチ一覧取得のユースケース
pub struct GetActiveMatchesUseCase {
    matchmaking: Arc<dyn MatchmakingRepository>,
}

impl GetActiveMatchesUseCase {
    pub fn new(matchmaking: Arc<dyn MatchmakingRepository>) -> Self {
        Self { matchmaking }
    }

    /// 1 マッチにつき 1 件
    pub async fn execute(&self) -> Vec<Match> {
        self.matchmaking.get_active_matches().await
    }
}
