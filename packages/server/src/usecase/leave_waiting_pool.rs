//! UseCase: 待機プールからの退出

use std::sync::Arc;

use crate::domain::{MatchmakingRepository, UserId};

/// 待機プール退出のユースケース
pub struct LeaveWaitingPoolUseCase {
    matchmaking: Arc<dyn MatchmakingRepository>,
}

impl LeaveWaitingPoolUseCase {
    pub fn new(matchmaking: Arc<dyn MatchmakingRepository>) -> Self {
        Self { matchmaking }
    }

    /// 待機プールから退出する。待機していなくてもエラーにはならない。
    ///
    /// # Returns
    ///
    /// 実際に退出した場合 `true`
    pub async fn execute(&self, user_id: &UserId) -> bool {
        let removed = self.matchmaking.remove_from_waiting_pool(user_id).await;
        if removed {
            tracing::info!("User '{}' left the waiting pool", user_id);
        }
        removed
    }
}
