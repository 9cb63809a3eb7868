//! Conversion logic between DTOs and domain entities.

use accentswap_shared::time::millis_to_rfc3339;

use crate::domain::{
    Match, MatchFound, ProficiencyLevel, Room, RoomState, UserId, UserProfile, ValueObjectError,
    WaitingEntry,
};
use crate::infrastructure::dto::{http as http_dto, profile::ProfileRecord};

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<ProfileRecord> for UserProfile {
    type Error = ValueObjectError;

    /// Unknown proficiency names fall back to Beginner.
    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(record.id)?,
            name: record.name,
            preferred_language: record.preferred_language,
            learning_languages: record.learning_languages.into_iter().collect(),
            proficiency: record
                .proficiency_level
                .as_deref()
                .and_then(ProficiencyLevel::parse)
                .unwrap_or_default(),
            interests: record.interests.into_iter().collect(),
        })
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&WaitingEntry> for http_dto::WaitingUserDto {
    fn from(entry: &WaitingEntry) -> Self {
        Self {
            user_id: entry.user_id.as_str().to_string(),
            name: entry.profile.name.clone(),
            waiting_since: entry.joined_at.value(),
        }
    }
}

impl From<Match> for http_dto::ActiveMatchDto {
    fn from(m: Match) -> Self {
        Self {
            match_id: m.id.into_string(),
            users: vec![m.user_a.into_string(), m.user_b.into_string()],
        }
    }
}

impl From<MatchFound> for http_dto::FindMatchResponseDto {
    fn from(found: MatchFound) -> Self {
        Self {
            success: true,
            match_id: found.match_id.into_string(),
            partner_id: found.partner_id.into_string(),
            score: found.score,
            message: "Match found".to_string(),
        }
    }
}

impl From<Room> for http_dto::RoomSummaryDto {
    fn from(room: Room) -> Self {
        let state = match room.state() {
            RoomState::Open => "open",
            RoomState::Paired => "paired",
        };
        Self {
            room_id: room.id.into_string(),
            host: room.host.into_string(),
            guests: room.guests.into_iter().map(|g| g.into_string()).collect(),
            state: state.to_string(),
            created_at: millis_to_rfc3339(room.created_at.value()),
        }
    }
}

/// Build the caller's view of a match.
pub fn current_match_dto(m: &Match, user_id: &UserId) -> Option<http_dto::CurrentMatchDto> {
    let partner = m.partner_of(user_id)?;
    Some(http_dto::CurrentMatchDto {
        match_id: m.id.as_str().to_string(),
        partner_id: partner.as_str().to_string(),
        created_at: millis_to_rfc3339(m.created_at.value()),
    })
}
