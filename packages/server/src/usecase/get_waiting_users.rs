//! UseCase: 待機中ユーザー一覧の取得（管理者向け）

use std::sync::Arc;

use crate::domain::{MatchmakingRepository, WaitingEntry};

/// 待機中ユーザー一覧取得のユースケース
pub struct GetWaitingUsersUseCase {
    matchmaking: Arc<dyn MatchmakingRepository>,
}

impl GetWaitingUsersUseCase {
    pub fn new(matchmaking: Arc<dyn MatchmakingRepository>) -> Self {
        Self { matchmaking }
    }

    /// 参加順の待機エントリ
    pub async fn execute(&self) -> Vec<WaitingEntry> {
        self.matchmaking.get_waiting_entries().await
    }
}
