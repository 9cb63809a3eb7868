//! UseCase 層のエラー

use thiserror::Error;

use crate::domain::{MatchingError, RepositoryError};

/// 待機プール参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinWaitingPoolError {
    #[error(transparent)]
    Matching(#[from] MatchingError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
