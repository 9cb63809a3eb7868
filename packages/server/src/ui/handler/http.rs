//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::{
        conversion::current_match_dto,
        http::{
            ActionResponseDto, ActiveMatchDto, CurrentMatchDto, FindMatchResponseDto,
            RoomSummaryDto, WaitingUserDto,
        },
    },
    ui::{
        error::ApiError,
        extractor::{AdminUser, AuthenticatedUser},
        state::AppState,
    },
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /api/matching/waiting-pool`
pub async fn join_waiting_pool(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<ActionResponseDto>, ApiError> {
    state.join_waiting_pool_usecase.execute(user_id).await?;
    Ok(Json(ActionResponseDto::ok("Added to waiting pool")))
}

/// `DELETE /api/matching/waiting-pool`
pub async fn leave_waiting_pool(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Json<ActionResponseDto> {
    let message = if state.leave_waiting_pool_usecase.execute(&user_id).await {
        "Removed from waiting pool"
    } else {
        "Not in waiting pool"
    };
    Json(ActionResponseDto::ok(message))
}

/// `GET /api/matching/find-match`
///
/// `NoMatch` comes back as 404; clients poll until a partner shows up.
pub async fn find_match(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<FindMatchResponseDto>, ApiError> {
    let found = state.find_match_usecase.execute(&user_id).await?;
    Ok(Json(found.into()))
}

/// `GET /api/matching/current-match`
pub async fn get_current_match(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<CurrentMatchDto>, ApiError> {
    state
        .get_current_match_usecase
        .execute(&user_id)
        .await
        .and_then(|m| current_match_dto(&m, &user_id))
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "User not in an active match"))
}

/// `POST /api/matching/end-match`
pub async fn end_match(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<ActionResponseDto>, ApiError> {
    state.end_match_usecase.execute(&user_id).await?;
    Ok(Json(ActionResponseDto::ok("Match ended")))
}

/// `GET /api/matching/waiting-users` (admin)
pub async fn get_waiting_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Json<Vec<WaitingUserDto>> {
    let entries = state.get_waiting_users_usecase.execute().await;
    Json(entries.iter().map(WaitingUserDto::from).collect())
}

/// `GET /api/matching/active-matches` (admin)
pub async fn get_active_matches(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Json<Vec<ActiveMatchDto>> {
    let matches = state.get_active_matches_usecase.execute().await;
    Json(matches.into_iter().map(ActiveMatchDto::from).collect())
}

/// `GET /api/rooms` (admin)
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}
