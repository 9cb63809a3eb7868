//! UseCase 層
//!
//! 1 つの操作につき 1 つのユースケース。ドメイン層の trait にのみ依存し、
//! 具体的なストアや通信手段は知りません。

mod error;

// matching
mod end_match;
mod find_match;
mod get_active_matches;
mod get_current_match;
mod get_waiting_users;
mod join_waiting_pool;
mod leave_waiting_pool;

// signaling
mod connect_peer;
mod create_room;
mod disconnect_peer;
mod expire_rooms;
mod get_rooms;
mod join_match_room;
mod join_room;
mod leave_room;
mod relay_signal;

pub use error::JoinWaitingPoolError;

pub use end_match::EndMatchUseCase;
pub use find_match::FindMatchUseCase;
pub use get_active_matches::GetActiveMatchesUseCase;
pub use get_current_match::GetCurrentMatchUseCase;
pub use get_waiting_users::GetWaitingUsersUseCase;
pub use join_waiting_pool::JoinWaitingPoolUseCase;
pub use leave_waiting_pool::LeaveWaitingPoolUseCase;

pub use connect_peer::ConnectPeerUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_peer::DisconnectPeerUseCase;
pub use expire_rooms::ExpireRoomsUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_match_room::JoinMatchRoomUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use relay_signal::RelaySignalUseCase;
