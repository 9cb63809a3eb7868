//! UseCase: 待機プールへの参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinWaitingPoolUseCase::execute() メソッド
//! - 重複参加・マッチ中・プロフィール未登録の拒否
//!
//! ### なぜこのテストが必要か
//! - 1 人のユーザーが待機プールに 2 回入ることはあってはならない
//! - プロフィールストアの結果がエラー種別に正しく対応することを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加
//! - 異常系：重複参加、マッチ中、プロフィールなし、ストア障害

use std::sync::Arc;

use accentswap_shared::time::Clock;

use crate::domain::{MatchingError, MatchmakingRepository, ProfileRepository, Timestamp, UserId};

use super::error::JoinWaitingPoolError;

/// 待機プール参加のユースケース
pub struct JoinWaitingPoolUseCase {
    /// 待機プールとマッチレジストリ
    matchmaking: Arc<dyn MatchmakingRepository>,
    /// プロフィールストア（外部）
    profiles: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl JoinWaitingPoolUseCase {
    /// 新しい JoinWaitingPoolUseCase を作成
    pub fn new(
        matchmaking: Arc<dyn MatchmakingRepository>,
        profiles: Arc<dyn ProfileRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            matchmaking,
            profiles,
            clock,
        }
    }

    /// 待機プールへの参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 参加時刻
    /// * `Err(JoinWaitingPoolError)` - 参加失敗
    pub async fn execute(&self, user_id: UserId) -> Result<Timestamp, JoinWaitingPoolError> {
        // 1. 待機中・マッチ中でないことを確認（プロフィール取得の前に弾く）
        self.matchmaking.ensure_can_join(&user_id).await?;

        // 2. プロフィールを取得（ここで他の呼び出しが割り込み得る）
        let profile = self
            .profiles
            .get_profile(&user_id)
            .await?
            .ok_or(MatchingError::UserNotFound)?;

        // 3. 待機プールに追加（ロック内で再チェックされる）
        let joined_at = Timestamp::new(self.clock.now_millis());
        self.matchmaking
            .add_to_waiting_pool(profile, joined_at)
            .await?;

        tracing::info!("User '{}' joined the waiting pool", user_id);
        Ok(joined_at)
    }
}
