//! InMemory Matchmaking Repository 実装
//!
//! `Matchmaker` 集約（待機プール + マッチレジストリ）を 1 つの Mutex で保持します。
//! 各メソッドはロックを 1 回だけ取得し、不変条件を回復してから解放するため、
//! `find_match` の「スコア計算 → 選択 → プールから削除 → マッチ記録」は
//! 1 つのクリティカルセクションとして実行されます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Match, MatchFound, MatchingError, Matchmaker, MatchmakingRepository, Timestamp, UserId,
    UserProfile, WaitingEntry,
};

/// インメモリ Matchmaking Repository 実装
pub struct InMemoryMatchmakingRepository {
    /// Matchmaker 集約
    matchmaker: Arc<Mutex<Matchmaker>>,
}

impl InMemoryMatchmakingRepository {
    /// 新しい InMemoryMatchmakingRepository を作成
    pub fn new(matchmaker: Arc<Mutex<Matchmaker>>) -> Self {
        Self { matchmaker }
    }
}

impl Default for InMemoryMatchmakingRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Matchmaker::new())))
    }
}

#[async_trait]
impl MatchmakingRepository for InMemoryMatchmakingRepository {
    async fn ensure_can_join(&self, user_id: &UserId) -> Result<(), MatchingError> {
        let matchmaker = self.matchmaker.lock().await;
        matchmaker.ensure_can_join(user_id)
    }

    async fn add_to_waiting_pool(
        &self,
        profile: UserProfile,
        joined_at: Timestamp,
    ) -> Result<(), MatchingError> {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.join(profile, joined_at)
    }

    async fn remove_from_waiting_pool(&self, user_id: &UserId) -> bool {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.leave(user_id)
    }

    async fn find_match(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<MatchFound, MatchingError> {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.find_match(user_id, now)
    }

    async fn end_match(&self, user_id: &UserId) -> Result<Match, MatchingError> {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.end_match(user_id)
    }

    async fn get_match(&self, user_id: &UserId) -> Option<Match> {
        let matchmaker = self.matchmaker.lock().await;
        matchmaker.current_match(user_id).cloned()
    }

    async fn get_waiting_entries(&self) -> Vec<WaitingEntry> {
        let matchmaker = self.matchmaker.lock().await;
        matchmaker.waiting_entries().cloned().collect()
    }

    async fn get_active_matches(&self) -> Vec<Match> {
        let matchmaker = self.matchmaker.lock().await;
        matchmaker.active_matches()
    }
}
