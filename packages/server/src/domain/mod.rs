//! Domain layer: value objects, entities, aggregates and the interfaces the
//! outer layers implement.

pub mod entity;
pub mod error;
pub mod matchmaking;
pub mod message_pusher;
pub mod repository;
pub mod scoring;
pub mod signaling;
pub mod value_object;

pub use entity::{Match, MatchFound, ProficiencyLevel, Room, RoomState, UserProfile, WaitingEntry};
pub use error::{
    MatchingError, MessagePushError, RepositoryError, SignalingError, ValueObjectError,
};
pub use matchmaking::{MatchRegistry, Matchmaker, WaitingPool};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{MatchmakingRepository, ProfileRepository, RoomRepository};
pub use scoring::compatibility_score;
pub use signaling::{LeaveOutcome, RoomEntry, RoomRegistry};
pub use value_object::{ConnectionId, MatchId, RoomId, RoomIdFactory, Timestamp, UserId};
