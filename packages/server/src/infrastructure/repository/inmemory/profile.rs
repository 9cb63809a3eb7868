//! InMemory Profile Repository 実装
//!
//! プロフィールの正本は外部のプロフィールストアにあります。このサーバーでは
//! 起動時に JSON ファイル（プロフィールの配列）から読み込んだものを使います。

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::{
    domain::{ProfileRepository, RepositoryError, UserId, UserProfile, ValueObjectError},
    infrastructure::dto::profile::ProfileRecord,
};

/// プロフィール読み込みのエラー
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("failed to read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse profile file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid profile at index {index}: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: ValueObjectError,
    },
}

/// インメモリ Profile Repository 実装
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryProfileRepository {
    /// プロフィールの一覧から作成（同じ ID は後勝ち）
    pub fn new(profiles: Vec<UserProfile>) -> Self {
        let profiles = profiles.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            profiles: RwLock::new(profiles),
        }
    }

    /// JSON 文字列（ProfileRecord の配列）から作成
    pub fn from_json_str(json: &str) -> Result<Self, ProfileLoadError> {
        let records: Vec<ProfileRecord> = serde_json::from_str(json)?;
        let profiles = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                UserProfile::try_from(record)
                    .map_err(|source| ProfileLoadError::Invalid { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(profiles))
    }

    /// JSON ファイルから作成
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProfileLoadError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&json)
    }

    /// プロフィールを追加または置き換え
    pub async fn upsert(&self, profile: UserProfile) {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.id.clone(), profile);
    }

    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(user_id).cloned())
    }
}
