//! UseCase: ルーム退出処理
//!
//! 明示的な `leave` と切断時の後片付けの両方から使われる。
//! Membership Index の `unbind` は一つの接続につき一度しか `Some` を返さないため、
//! 退出と切断が競合しても後片付けは一度だけ行われる。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DetachOutcome, MembershipRepository, MessagePusher, RoomId, RoomRepository,
};

use super::{LeaveRoomError, push_room_data};

/// ルーム退出の結果
#[derive(Debug, Clone)]
pub struct LeftRoom {
    pub room_id: RoomId,
    pub outcome: DetachOutcome,
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    membership_repository: Arc<dyn MembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        membership_repository: Arc<dyn MembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            room_repository,
            membership_repository,
            message_pusher,
        }
    }

    /// 接続をルームから外す
    ///
    /// 残ったメンバーには新しいスナップショットを送る。最後のメンバーだった場合は
    /// ルームごと削除され、誰にも送らない。
    pub async fn execute(&self, connection_id: ConnectionId) -> Result<LeftRoom, LeaveRoomError> {
        let room_id = self
            .membership_repository
            .unbind(&connection_id)
            .ok_or(LeaveRoomError::NotInRoom)?;

        let outcome = self.room_repository.detach_member(&connection_id, &room_id);
        match &outcome {
            DetachOutcome::Detached(room) => {
                tracing::info!(
                    "Connection '{}' left room '{}' ({} member(s) remaining)",
                    connection_id,
                    room.name,
                    room.members.len()
                );
                push_room_data(self.message_pusher.as_ref(), room).await;
            }
            DetachOutcome::RoomRemoved => {
                tracing::info!(
                    "Connection '{}' left room '{}' as the last member",
                    connection_id,
                    room_id
                );
            }
            DetachOutcome::NotAttached => {
                // 同名の参加者が別の接続で再参加済み
                tracing::debug!(
                    "Connection '{}' was no longer attached to room '{}'",
                    connection_id,
                    room_id
                );
            }
        }

        Ok(LeftRoom { room_id, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockMessagePusher, ParticipantName, RoomName},
        infrastructure::repository::{InMemoryMembershipRepository, InMemoryRoomRepository},
    };
    use scoreroom_shared::time::FixedClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 残りのメンバーがいる場合の退出と通知
    // - 最後のメンバーの退出によるルーム削除
    // - 二重の退出（退出後の切断）が何もしないこと
    // - 再参加済みの古い接続の退出がメンバーを消さないこと
    // ========================================

    struct Fixture {
        rooms: Arc<InMemoryRoomRepository>,
        membership: Arc<InMemoryMembershipRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                rooms: Arc::new(InMemoryRoomRepository::new(Arc::new(FixedClock::new(0)))),
                membership: Arc::new(InMemoryMembershipRepository::new()),
            }
        }

        fn join(&self, participant: &str) -> (ConnectionId, RoomId) {
            let conn = ConnectionId::generate();
            let (_, room) = self.rooms.join(
                &RoomName::new("table1").unwrap(),
                ParticipantName::new(participant).unwrap(),
                conn,
            );
            self.membership.bind(conn, room.id);
            (conn, room.id)
        }

        fn usecase(&self, pusher: MockMessagePusher) -> LeaveRoomUseCase {
            LeaveRoomUseCase::new(
                self.rooms.clone(),
                self.membership.clone(),
                Arc::new(pusher),
            )
        }
    }

    #[tokio::test]
    async fn test_leave_notifies_remaining_members() {
        // テスト項目: 退出すると残りのメンバーにスナップショットが送られる
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, room_id) = fixture.join("Alice");
        let (bob, _) = fixture.join("Bob");
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_room_data()
            .withf(move |room| room.connection_ids() == vec![bob])
            .times(1)
            .returning(|_| Ok(()));
        let usecase = fixture.usecase(pusher);

        // when (操作):
        let left = usecase.execute(alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(left.room_id, room_id);
        assert!(matches!(left.outcome, DetachOutcome::Detached(_)));
        assert_eq!(fixture.membership.lookup(&alice), None);
    }

    #[tokio::test]
    async fn test_last_member_leave_removes_room() {
        // テスト項目: 最後のメンバーが退出するとルームが削除され、誰にも送らない
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, room_id) = fixture.join("Alice");
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_room_data().times(0);
        let usecase = fixture.usecase(pusher);

        // when (操作):
        let left = usecase.execute(alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(left.outcome, DetachOutcome::RoomRemoved);
        assert!(fixture.rooms.get_snapshot(&room_id).is_none());
    }

    #[tokio::test]
    async fn test_second_leave_is_not_in_room() {
        // テスト項目: 退出済みの接続が再度退出しても何も起きない
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, _) = fixture.join("Alice");
        fixture.join("Bob");
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_room_data().times(1).returning(|_| Ok(()));
        let usecase = fixture.usecase(pusher);
        usecase.execute(alice).await.unwrap();

        // when (操作):
        let result = usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), LeaveRoomError::NotInRoom);
    }

    #[tokio::test]
    async fn test_stale_connection_leave_keeps_reattached_member() {
        // テスト項目: 同名で再参加した後に古い接続が抜けても、メンバーは残る
        // given (前提条件):
        let fixture = Fixture::new();
        let (old_conn, room_id) = fixture.join("Alice");
        let (new_conn, _) = fixture.join("Alice");
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_room_data().times(0);
        let usecase = fixture.usecase(pusher);

        // when (操作):
        let left = usecase.execute(old_conn).await.unwrap();

        // then (期待する結果):
        assert_eq!(left.outcome, DetachOutcome::NotAttached);
        let room = fixture.rooms.get_snapshot(&room_id).unwrap();
        assert_eq!(room.connection_ids(), vec![new_conn]);
    }
}
