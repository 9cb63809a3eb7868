//! Shared application state.

use std::sync::Arc;

use accentswap_shared::time::Clock;

use crate::domain::{MatchmakingRepository, MessagePusher, ProfileRepository, RoomRepository};
use crate::usecase::{
    ConnectPeerUseCase, CreateRoomUseCase, DisconnectPeerUseCase, EndMatchUseCase,
    ExpireRoomsUseCase, FindMatchUseCase, GetActiveMatchesUseCase, GetCurrentMatchUseCase,
    GetRoomsUseCase, GetWaitingUsersUseCase, JoinMatchRoomUseCase, JoinRoomUseCase,
    JoinWaitingPoolUseCase,
    LeaveRoomUseCase, LeaveWaitingPoolUseCase, RelaySignalUseCase,
};

/// ハンドラーから参照されるユースケースの集合
pub struct AppState {
    // matching
    pub join_waiting_pool_usecase: Arc<JoinWaitingPoolUseCase>,
    pub leave_waiting_pool_usecase: Arc<LeaveWaitingPoolUseCase>,
    pub find_match_usecase: Arc<FindMatchUseCase>,
    pub end_match_usecase: Arc<EndMatchUseCase>,
    pub get_current_match_usecase: Arc<GetCurrentMatchUseCase>,
    pub get_waiting_users_usecase: Arc<GetWaitingUsersUseCase>,
    pub get_active_matches_usecase: Arc<GetActiveMatchesUseCase>,

    // signaling
    pub connect_peer_usecase: Arc<ConnectPeerUseCase>,
    pub disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub join_match_room_usecase: Arc<JoinMatchRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub expire_rooms_usecase: Arc<ExpireRoomsUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
}

impl AppState {
    /// Wire every usecase onto the given stores.
    pub fn new(
        matchmaking: Arc<dyn MatchmakingRepository>,
        profiles: Arc<dyn ProfileRepository>,
        rooms: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        room_ttl_millis: i64,
    ) -> Self {
        Self {
            join_waiting_pool_usecase: Arc::new(JoinWaitingPoolUseCase::new(
                matchmaking.clone(),
                profiles,
                clock.clone(),
            )),
            leave_waiting_pool_usecase: Arc::new(LeaveWaitingPoolUseCase::new(matchmaking.clone())),
            find_match_usecase: Arc::new(FindMatchUseCase::new(
                matchmaking.clone(),
                clock.clone(),
            )),
            end_match_usecase: Arc::new(EndMatchUseCase::new(matchmaking.clone())),
            get_current_match_usecase: Arc::new(GetCurrentMatchUseCase::new(matchmaking.clone())),
            get_waiting_users_usecase: Arc::new(GetWaitingUsersUseCase::new(matchmaking.clone())),
            get_active_matches_usecase: Arc::new(GetActiveMatchesUseCase::new(
                matchmaking.clone(),
            )),

            connect_peer_usecase: Arc::new(ConnectPeerUseCase::new(message_pusher.clone())),
            disconnect_peer_usecase: Arc::new(DisconnectPeerUseCase::new(
                rooms.clone(),
                message_pusher.clone(),
            )),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(rooms.clone(), clock.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                rooms.clone(),
                message_pusher.clone(),
            )),
            join_match_room_usecase: Arc::new(JoinMatchRoomUseCase::new(
                matchmaking,
                rooms.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                rooms.clone(),
                message_pusher.clone(),
            )),
            relay_signal_usecase: Arc::new(RelaySignalUseCase::new(
                rooms.clone(),
                message_pusher.clone(),
            )),
            expire_rooms_usecase: Arc::new(ExpireRoomsUseCase::new(
                rooms.clone(),
                message_pusher,
                clock,
                room_ttl_millis,
            )),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(rooms)),
        }
    }
}
