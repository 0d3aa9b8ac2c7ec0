//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時のルーム退出と送信チャンネルの登録解除
//!
//! ### なぜこのテストが必要か
//! - 切断した接続がルームに残り続けないことを保証する
//! - 明示的な退出の後に切断しても二重に後片付けしないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルームに参加中の接続の切断
//! - エッジケース：どのルームにも参加していない接続、退出済みの接続

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

use super::{LeaveRoomError, LeaveRoomUseCase, LeftRoom};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    leave_room: Arc<LeaveRoomUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(leave_room: Arc<LeaveRoomUseCase>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            leave_room,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 参加中のルームがあれば退出し、最後に送信チャンネルの登録を解除する。
    /// ルームから退出した場合はその結果を返す。
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<LeftRoom> {
        let left = match self.leave_room.execute(connection_id).await {
            Ok(left) => Some(left),
            Err(LeaveRoomError::NotInRoom) => None,
        };

        self.message_pusher.unregister_client(&connection_id).await;
        tracing::info!("Connection '{}' closed", connection_id);

        left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            DetachOutcome, MembershipRepository, MockMessagePusher, ParticipantName,
            RoomName, RoomRepository,
        },
        infrastructure::repository::{InMemoryMembershipRepository, InMemoryRoomRepository},
    };
    use scoreroom_shared::time::FixedClock;

    fn build(
        pusher: MockMessagePusher,
    ) -> (
        DisconnectParticipantUseCase,
        Arc<InMemoryRoomRepository>,
        Arc<InMemoryMembershipRepository>,
    ) {
        let rooms = Arc::new(InMemoryRoomRepository::new(Arc::new(FixedClock::new(0))));
        let membership = Arc::new(InMemoryMembershipRepository::new());
        let pusher: Arc<dyn MessagePusher> = Arc::new(pusher);
        let leave_room = Arc::new(LeaveRoomUseCase::new(
            rooms.clone(),
            membership.clone(),
            pusher.clone(),
        ));
        (
            DisconnectParticipantUseCase::new(leave_room, pusher),
            rooms,
            membership,
        )
    }

    #[tokio::test]
    async fn test_disconnect_removes_member_and_unregisters() {
        // テスト項目: 切断するとルームから抜け、送信チャンネルの登録が解除される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().times(1).returning(|_| ());
        pusher.expect_push_room_data().times(0);
        let (usecase, rooms, membership) = build(pusher);
        let alice = ConnectionId::generate();
        let (_, room) = rooms.join(
            &RoomName::new("table1").unwrap(),
            ParticipantName::new("Alice").unwrap(),
            alice,
        );
        membership.bind(alice, room.id);

        // when (操作):
        let left = usecase.execute(alice).await;

        // then (期待する結果):
        let left = left.unwrap();
        assert_eq!(left.outcome, DetachOutcome::RoomRemoved);
        assert_eq!(rooms.count_rooms(), 0);
        assert_eq!(membership.count_bindings(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_without_room_only_unregisters() {
        // テスト項目: どのルームにも参加していない接続の切断は登録解除だけ行う
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().times(1).returning(|_| ());
        pusher.expect_push_room_data().times(0);
        let (usecase, _, _) = build(pusher);

        // when (操作):
        let left = usecase.execute(ConnectionId::generate()).await;

        // then (期待する結果):
        assert!(left.is_none());
    }
}
