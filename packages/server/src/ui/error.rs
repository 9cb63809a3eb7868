//! Mapping from usecase errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{MatchingError, RepositoryError},
    infrastructure::dto::http::ActionResponseDto,
    usecase::JoinWaitingPoolError,
};

/// `{success: false, message}` with a status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ActionResponseDto::failure(self.message))).into_response()
    }
}

impl From<MatchingError> for ApiError {
    fn from(e: MatchingError) -> Self {
        let status = match e {
            MatchingError::AlreadyWaiting
            | MatchingError::AlreadyMatched
            | MatchingError::NotWaiting
            | MatchingError::NoActiveMatch => StatusCode::BAD_REQUEST,
            MatchingError::UserNotFound | MatchingError::NoMatch => StatusCode::NOT_FOUND,
            MatchingError::ConflictingMatch => StatusCode::CONFLICT,
        };
        Self::new(status, e.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        tracing::error!("Repository failure: {}", e);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<JoinWaitingPoolError> for ApiError {
    fn from(e: JoinWaitingPoolError) -> Self {
        match e {
            JoinWaitingPoolError::Matching(e) => e.into(),
            JoinWaitingPoolError::Repository(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_error_status_codes() {
        // テスト項目: MatchingError が想定どおりのステータスに対応する
        // given (前提条件):
        let cases = [
            (MatchingError::AlreadyWaiting, StatusCode::BAD_REQUEST),
            (MatchingError::AlreadyMatched, StatusCode::BAD_REQUEST),
            (MatchingError::NotWaiting, StatusCode::BAD_REQUEST),
            (MatchingError::NoActiveMatch, StatusCode::BAD_REQUEST),
            (MatchingError::UserNotFound, StatusCode::NOT_FOUND),
            (MatchingError::NoMatch, StatusCode::NOT_FOUND),
            (MatchingError::ConflictingMatch, StatusCode::CONFLICT),
        ];

        for (error, expected) in cases {
            // when (操作):
            let api_error = ApiError::from(error.clone());

            // then (期待する結果):
            assert_eq!(api_error.status, expected, "{:?}", error);
            assert_eq!(api_error.message, error.to_string());
        }
    }

    #[test]
    fn test_repository_error_hides_details() {
        // テスト項目: ストア障害は 500 になり、内部の詳細はメッセージに含めない
        // given (前提条件):
        let error = JoinWaitingPoolError::Repository(RepositoryError::Unavailable(
            "connection refused".to_string(),
        ));

        // when (操作):
        let api_error = ApiError::from(error);

        // then (期待する結果):
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api_error.message.contains("refused"));
    }
}
