//! InMemory Membership Repository 実装（Membership Index）
//!
//! 接続 ID → ルーム ID の対応だけを保持し、ルームの状態には一切触れない。

use dashmap::DashMap;

use crate::domain::{ConnectionId, MembershipRepository, RoomId};

/// インメモリ Membership Repository 実装
#[derive(Default)]
pub struct InMemoryMembershipRepository {
    bindings: DashMap<ConnectionId, RoomId>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームに紐付いている接続数
    pub fn count_bindings(&self) -> usize {
        self.bindings.len()
    }
}

impl MembershipRepository for InMemoryMembershipRepository {
    fn bind(&self, connection_id: ConnectionId, room_id: RoomId) -> Option<RoomId> {
        self.bindings.insert(connection_id, room_id)
    }

    fn lookup(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        self.bindings.get(connection_id).map(|entry| *entry.value())
    }

    fn unbind(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        self.bindings
            .remove(connection_id)
            .map(|(_, room_id)| room_id)
    }
}
