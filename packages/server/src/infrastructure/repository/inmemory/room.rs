//! InMemory Room Repository 実装（Room Registry）
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! `DashMap<RoomId, Arc<Room>>` をインメモリ DB として使用します。
//!
//! ## 排他制御
//!
//! DashMap はキーごとにシャードのロックを取るため、同じルームへの更新は
//! 直列化され、別シャードのルームへの更新は並行に進みます。
//! 更新は「現在の `Arc<Room>` から新しい `Room` を作って差し替える」だけで、
//! 返したスナップショットが後から書き換わることはありません。

use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use scoreroom_shared::time::Clock;

use crate::domain::{
    ConnectionId, DetachOutcome, ParticipantId, ParticipantName, RepositoryError, Room, RoomId,
    RoomName, RoomRepository, ScoreFields, ScoreRecord, Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    rooms: DashMap<RoomId, Arc<Room>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: DashMap::new(),
            clock,
        }
    }

    fn create_room(&self, name: &RoomName) -> Arc<Room> {
        let room = Room::new(name.clone(), Timestamp::new(self.clock.now_millis()));
        tracing::info!("Room '{}' ({}) created", room.name, room.id);
        Arc::new(room)
    }

    /// 管理中のルーム数
    pub fn count_rooms(&self) -> usize {
        self.rooms.len()
    }
}

impl RoomRepository for InMemoryRoomRepository {
    fn ensure_room(&self, name: &RoomName) -> RoomId {
        let room_id = RoomId::from_name(name);
        self.rooms
            .entry(room_id)
            .or_insert_with(|| self.create_room(name));
        room_id
    }

    fn attach_member(
        &self,
        room_id: &RoomId,
        participant_name: ParticipantName,
        connection_id: ConnectionId,
    ) -> Result<(ParticipantId, Arc<Room>), RepositoryError> {
        let mut entry = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;

        let (next, participant_id) = entry.with_member_attached(participant_name, connection_id);
        let next = Arc::new(next);
        *entry = Arc::clone(&next);
        Ok((participant_id, next))
    }

    fn join(
        &self,
        room_name: &RoomName,
        participant_name: ParticipantName,
        connection_id: ConnectionId,
    ) -> (ParticipantId, Arc<Room>) {
        let room_id = RoomId::from_name(room_name);
        let mut entry = self
            .rooms
            .entry(room_id)
            .or_insert_with(|| self.create_room(room_name));

        let (next, participant_id) = entry.with_member_attached(participant_name, connection_id);
        let next = Arc::new(next);
        *entry = Arc::clone(&next);
        (participant_id, next)
    }

    fn detach_member(&self, connection_id: &ConnectionId, room_id: &RoomId) -> DetachOutcome {
        let Entry::Occupied(mut occupied) = self.rooms.entry(*room_id) else {
            return DetachOutcome::NotAttached;
        };

        let Some(next) = occupied.get().without_connection(connection_id) else {
            return DetachOutcome::NotAttached;
        };

        if next.is_empty() {
            let removed = occupied.remove();
            tracing::info!(
                "Room '{}' ({}) deleted because it's empty",
                removed.name,
                removed.id
            );
            return DetachOutcome::RoomRemoved;
        }

        let next = Arc::new(next);
        occupied.insert(Arc::clone(&next));
        DetachOutcome::Detached(next)
    }

    fn add_score_entry(
        &self,
        room_id: &RoomId,
        participant_name: ParticipantName,
    ) -> Option<Arc<Room>> {
        let mut entry = self.rooms.get_mut(room_id)?;
        if let Some(next) = entry.with_score_entry(participant_name) {
            *entry = Arc::new(next);
        }
        Some(Arc::clone(&entry))
    }

    fn set_score_fields(
        &self,
        room_id: &RoomId,
        participant_name: &ParticipantName,
        fields: &ScoreFields,
    ) -> Option<(ScoreRecord, Arc<Room>)> {
        let mut entry = self.rooms.get_mut(room_id)?;
        let (next, record) = entry.with_score_fields(participant_name, fields)?;
        let next = Arc::new(next);
        *entry = Arc::clone(&next);
        Some((record, next))
    }

    fn get_snapshot(&self, room_id: &RoomId) -> Option<Arc<Room>> {
        self.rooms.get(room_id).map(|entry| Arc::clone(entry.value()))
    }

    fn list_rooms(&self) -> Vec<Arc<Room>> {
        let mut rooms: Vec<Arc<Room>> = self
            .rooms
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        rooms
    }
}
