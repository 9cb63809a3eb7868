//! UseCase: マッチング相手の検索
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - FindMatchUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 言語が合わない相手とは決してマッチしないこと
//! - 相手が見つからない場合は NoMatch（再試行を促す正常系）になること
//!
//! ### どのような状況を想定しているか
//! - 正常系：英語話者とスペイン語話者のマッチ（スコア 100）
//! - 正常系：相手なし（NoMatch）
//! - 異常系：待機プールにいない（NotWaiting）

use std::sync::Arc;

use accentswap_shared::time::Clock;

use crate::domain::{MatchFound, MatchingError, MatchmakingRepository, Timestamp, UserId};

/// マッチング相手検索のユースケース
pub struct FindMatchUseCase {
    matchmaking: Arc<dyn MatchmakingRepository>,
    clock: Arc<dyn Clock>,
}

impl FindMatchUseCase {
    pub fn new(matchmaking: Arc<dyn MatchmakingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { matchmaking, clock }
    }

    /// 待機プール内で最もスコアの高い相手とマッチさせる
    ///
    /// 再試行は呼び出し側（クライアントのポーリング）の責務で、ここでは行わない。
    pub async fn execute(&self, user_id: &UserId) -> Result<MatchFound, MatchingError> {
        let now = Timestamp::new(self.clock.now_millis());
        match self.matchmaking.find_match(user_id, now).await {
            Ok(found) => {
                tracing::info!(
                    "Matched '{}' with '{}' (match '{}', score {})",
                    user_id,
                    found.partner_id,
                    found.match_id,
                    found.score
                );
                Ok(found)
            }
            Err(e) if e.is_retryable() => {
                tracing::debug!("No match yet for '{}'", user_id);
                Err(e)
            }
            Err(e) => {
                tracing::warn!("find_match failed for '{}': {}", user_id, e);
                Err(e)
            }
        }
    }
}
