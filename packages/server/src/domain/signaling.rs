//! Signaling room aggregate.
//!
//! A room is created by its host and lives until the host leaves or the room
//! outlives the expiry window. Guests come and go without affecting the room.
//! Every method returns the connections that must be notified so the caller
//! can push events after the state change is complete.

use std::collections::HashMap;

use super::{
    entity::Room,
    error::SignalingError,
    value_object::{ConnectionId, RoomId, RoomIdFactory, Timestamp},
};

/// Result of a connection leaving a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The host left; the room is gone and `notify` must get `user-disconnected`.
    Closed {
        room_id: RoomId,
        notify: Vec<ConnectionId>,
    },
    /// A guest left; the room stays and `notify` must get `user-left`.
    GuestLeft {
        room_id: RoomId,
        notify: Vec<ConnectionId>,
    },
    /// The connection was not a member of the room; nothing changed.
    NotMember { room_id: RoomId },
}

/// Result of entering a room addressed by a known id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEntry {
    /// No room had this id; the caller now hosts a new one.
    Created(Room),
    /// The room existed; the caller is a member and `notify` must get `user-joined`.
    Joined {
        room_id: RoomId,
        notify: Vec<ConnectionId>,
    },
}

/// All open signaling rooms
#[derive(Debug, Clone, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room hosted by `host` under a fresh, unused id.
    pub fn create_room(&mut self, host: ConnectionId, created_at: Timestamp) -> Room {
        self.create_room_with(host, created_at, RoomIdFactory::generate)
    }

    /// Same as `create_room` with a caller-supplied id generator.
    ///
    /// The generator is called again while it returns an id already in use.
    pub fn create_room_with(
        &mut self,
        host: ConnectionId,
        created_at: Timestamp,
        mut generate: impl FnMut() -> RoomId,
    ) -> Room {
        let mut room_id = generate();
        while self.rooms.contains_key(&room_id) {
            room_id = generate();
        }
        let room = Room::new(room_id.clone(), host, created_at);
        self.rooms.insert(room_id, room.clone());
        room
    }

    /// Add `connection_id` as a guest. Returns the other members to notify.
    ///
    /// Joining a room twice (or as its host) does not add a duplicate entry.
    pub fn join_room(
        &mut self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, SignalingError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| SignalingError::RoomNotFound(room_id.to_string()))?;
        if !room.has_member(connection_id) {
            room.guests.push(connection_id.clone());
        }
        Ok(room.members_except(connection_id))
    }

    /// Join `room_id`, creating it with `connection_id` as host if it does not exist.
    pub fn enter_room(
        &mut self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        created_at: Timestamp,
    ) -> RoomEntry {
        if let Some(room) = self.rooms.get_mut(&room_id) {
            if !room.has_member(connection_id) {
                room.guests.push(connection_id.clone());
            }
            return RoomEntry::Joined {
                notify: room.members_except(connection_id),
                room_id,
            };
        }
        let room = Room::new(room_id.clone(), connection_id.clone(), created_at);
        self.rooms.insert(room_id, room.clone());
        RoomEntry::Created(room)
    }

    /// Members of `room_id` other than `sender`.
    pub fn relay_targets(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, SignalingError> {
        self.rooms
            .get(room_id)
            .map(|room| room.members_except(sender))
            .ok_or_else(|| SignalingError::RoomNotFound(room_id.to_string()))
    }

    pub fn leave_room(
        &mut self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<LeaveOutcome, SignalingError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| SignalingError::RoomNotFound(room_id.to_string()))?;

        if room.is_host(connection_id) {
            let notify = room.members_except(connection_id);
            self.rooms.remove(room_id);
            return Ok(LeaveOutcome::Closed {
                room_id: room_id.clone(),
                notify,
            });
        }

        let before = room.guests.len();
        room.guests.retain(|guest| guest != connection_id);
        if room.guests.len() == before {
            return Ok(LeaveOutcome::NotMember {
                room_id: room_id.clone(),
            });
        }

        Ok(LeaveOutcome::GuestLeft {
            room_id: room_id.clone(),
            notify: room.members_except(connection_id),
        })
    }

    /// Leave every room `connection_id` hosts or guests in.
    pub fn remove_connection(&mut self, connection_id: &ConnectionId) -> Vec<LeaveOutcome> {
        let mut room_ids: Vec<RoomId> = self
            .rooms
            .values()
            .filter(|room| room.has_member(connection_id))
            .map(|room| room.id.clone())
            .collect();
        room_ids.sort();

        room_ids
            .iter()
            .filter_map(|room_id| self.leave_room(connection_id, room_id).ok())
            .collect()
    }

    /// Remove rooms older than `ttl_millis` and return them.
    pub fn remove_expired(&mut self, now: Timestamp, ttl_millis: i64) -> Vec<Room> {
        let expired_ids: Vec<RoomId> = self
            .rooms
            .values()
            .filter(|room| room.is_expired(now, ttl_millis))
            .map(|room| room.id.clone())
            .collect();

        let mut expired: Vec<Room> = expired_ids
            .iter()
            .filter_map(|room_id| self.rooms.remove(room_id))
            .collect();
        expired.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        expired
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Snapshot of all rooms, oldest first.
    pub fn rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomState;

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn room_id(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_create_room_opens_room_with_host() {
        // テスト項目: ルーム作成でホストのみの Open 状態のルームができる
        // given (前提条件):
        let mut registry = RoomRegistry::new();

        // when (操作):
        let room = registry.create_room(connection("host"), Timestamp::new(0));

        // then (期待する結果):
        assert_eq!(room.state(), RoomState::Open);
        assert_eq!(room.host, connection("host"));
        assert!(registry.contains(&room.id));
    }

    #[test]
    fn test_create_room_regenerates_colliding_id() {
        // テスト項目: 生成した ID が使用中なら別の ID が採用される
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let mut ids = vec![room_id("bbbbbbbb"), room_id("aaaaaaaa"), room_id("aaaaaaaa")];
        registry.create_room_with(connection("h1"), Timestamp::new(0), || {
            ids.pop().unwrap()
        });

        // when (操作):
        let second = registry.create_room_with(connection("h2"), Timestamp::new(1), || {
            ids.pop().unwrap()
        });

        // then (期待する結果):
        assert_eq!(second.id, room_id("bbbbbbbb"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_join_room_notifies_host() {
        // テスト項目: ゲスト参加時、ホストが通知対象になり Paired 状態になる
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let room = registry.create_room(connection("host"), Timestamp::new(0));

        // when (操作):
        let notify = registry.join_room(&connection("guest"), &room.id).unwrap();

        // then (期待する結果):
        assert_eq!(notify, vec![connection("host")]);
        assert_eq!(registry.get(&room.id).unwrap().state(), RoomState::Paired);
    }

    #[test]
    fn test_join_room_twice_does_not_duplicate_guest() {
        // テスト項目: 同じ接続が 2 回参加してもゲストは重複しない
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let room = registry.create_room(connection("host"), Timestamp::new(0));
        registry.join_room(&connection("guest"), &room.id).unwrap();

        // when (操作):
        registry.join_room(&connection("guest"), &room.id).unwrap();

        // then (期待する結果):
        assert_eq!(registry.get(&room.id).unwrap().guests.len(), 1);
    }

    #[test]
    fn test_join_unknown_room() {
        // テスト項目: 存在しないルームへの参加は RoomNotFound
        // given (前提条件):
        let mut registry = RoomRegistry::new();

        // when (操作):
        let result = registry.join_room(&connection("guest"), &room_id("missing1"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SignalingError::RoomNotFound("missing1".to_string()))
        );
    }

    #[test]
    fn test_relay_targets_exclude_sender() {
        // テスト項目: 中継先は送信者以外の全メンバー
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let room = registry.create_room(connection("host"), Timestamp::new(0));
        registry.join_room(&connection("guest"), &room.id).unwrap();

        // when (操作):
        let from_host = registry.relay_targets(&connection("host"), &room.id).unwrap();
        let from_guest = registry.relay_targets(&connection("guest"), &room.id).unwrap();

        // then (期待する結果):
        assert_eq!(from_host, vec![connection("guest")]);
        assert_eq!(from_guest, vec![connection("host")]);
    }

    #[test]
    fn test_host_leave_closes_room() {
        // テスト項目: ホストが退出するとルームが削除され、ゲストが通知対象になる
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let room = registry.create_room(connection("host"), Timestamp::new(0));
        registry.join_room(&connection("guest"), &room.id).unwrap();

        // when (操作):
        let outcome = registry.leave_room(&connection("host"), &room.id).unwrap();

        // then (期待する結果):
        assert_eq!(
            outcome,
            LeaveOutcome::Closed {
                room_id: room.id.clone(),
                notify: vec![connection("guest")],
            }
        );
        assert!(!registry.contains(&room.id));
        assert!(registry.join_room(&connection("other"), &room.id).is_err());
    }

    #[test]
    fn test_guest_leave_keeps_room() {
        // テスト項目: ゲストが退出してもルームは残り、ホストが通知対象になる
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let room = registry.create_room(connection("host"), Timestamp::new(0));
        registry.join_room(&connection("guest"), &room.id).unwrap();

        // when (操作):
        let outcome = registry.leave_room(&connection("guest"), &room.id).unwrap();

        // then (期待する結果):
        assert_eq!(
            outcome,
            LeaveOutcome::GuestLeft {
                room_id: room.id.clone(),
                notify: vec![connection("host")],
            }
        );
        assert_eq!(registry.get(&room.id).unwrap().state(), RoomState::Open);
    }

    #[test]
    fn test_non_member_leave_changes_nothing() {
        // テスト項目: メンバーでない接続の退出は NotMember で、ルームは変わらない
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let room = registry.create_room(connection("host"), Timestamp::new(0));

        // when (操作):
        let outcome = registry.leave_room(&connection("stranger"), &room.id).unwrap();

        // then (期待する結果):
        assert_eq!(
            outcome,
            LeaveOutcome::NotMember {
                room_id: room.id.clone()
            }
        );
        assert!(registry.contains(&room.id));
    }

    #[test]
    fn test_remove_connection_leaves_all_rooms() {
        // テスト項目: 切断時、ホストのルームは閉じられ、ゲスト参加中のルームからは退出する
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let hosted = registry.create_room(connection("peer"), Timestamp::new(0));
        registry.join_room(&connection("guest"), &hosted.id).unwrap();
        let joined = registry.create_room(connection("other-host"), Timestamp::new(1));
        registry.join_room(&connection("peer"), &joined.id).unwrap();

        // when (操作):
        let outcomes = registry.remove_connection(&connection("peer"));

        // then (期待する結果):
        assert_eq!(outcomes.len(), 2);
        assert!(!registry.contains(&hosted.id));
        assert!(registry.get(&joined.id).unwrap().guests.is_empty());
    }

    #[test]
    fn test_remove_expired_rooms() {
        // テスト項目: TTL を超えたルームだけが削除される
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let old = registry.create_room(connection("old-host"), Timestamp::new(0));
        let fresh = registry.create_room(connection("new-host"), Timestamp::new(3_000_000));

        // when (操作):
        let expired = registry.remove_expired(Timestamp::new(3_700_000), 3_600_000);

        // then (期待する結果):
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, old.id);
        assert!(!registry.contains(&old.id));
        assert!(registry.contains(&fresh.id));
    }

    #[test]
    fn test_enter_room_creates_then_joins() {
        // テスト項目: 指定 ID のルームは最初の接続がホストとして作成し、次の接続はゲストとして入る
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let match_room = room_id("alice-bruno");

        // when (操作):
        let first = registry.enter_room(&connection("alice"), match_room.clone(), Timestamp::new(5));
        let second = registry.enter_room(&connection("bruno"), match_room.clone(), Timestamp::new(9));
        let again = registry.enter_room(&connection("bruno"), match_room.clone(), Timestamp::new(9));

        // then (期待する結果):
        assert!(matches!(first, RoomEntry::Created(ref room) if room.host == connection("alice")));
        assert_eq!(
            second,
            RoomEntry::Joined {
                room_id: match_room.clone(),
                notify: vec![connection("alice")],
            }
        );
        assert!(matches!(again, RoomEntry::Joined { .. }));
        let room = registry.get(&match_room).unwrap();
        assert_eq!(room.guests, vec![connection("bruno")]);
        assert_eq!(room.created_at, Timestamp::new(5));
        assert_eq!(room.state(), RoomState::Paired);
    }
}
