//! UseCase: スコア表への参加者追加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AddParticipantUseCase::execute() メソッド
//! - 接続を持たない参加者のスコアエントリ追加
//!
//! ### なぜこのテストが必要か
//! - 追加された参加者がメンバー（接続中の参加者）にならないことを保証する
//! - 既存のスコアを上書きしないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中のルームへの追加
//! - 異常系：どのルームにも参加していない接続からの追加
//! - エッジケース：既にスコアがある参加者の追加

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MembershipRepository, MessagePusher, ParticipantName, Room, RoomRepository,
};

use super::{AddParticipantError, push_room_data};

/// スコア表への参加者追加のユースケース
pub struct AddParticipantUseCase {
    room_repository: Arc<dyn RoomRepository>,
    membership_repository: Arc<dyn MembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl AddParticipantUseCase {
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

    /// 送信者が参加しているルームに、0 点のスコアエントリを追加する
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        participant_name: ParticipantName,
    ) -> Result<Arc<Room>, AddParticipantError> {
        let room_id = self
            .membership_repository
            .lookup(&connection_id)
            .ok_or(AddParticipantError::NotInRoom)?;

        let room = self
            .room_repository
            .add_score_entry(&room_id, participant_name.clone())
            .ok_or(AddParticipantError::RoomNotFound)?;

        tracing::info!(
            "Participant '{}' added to the score sheet of room '{}'",
            participant_name,
            room.name
        );

        push_room_data(self.message_pusher.as_ref(), &room).await;

        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MockMessagePusher,
        infrastructure::repository::{InMemoryMembershipRepository, InMemoryRoomRepository},
    };
    use scoreroom_shared::time::FixedClock;

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value).unwrap()
    }

    /// Alice が "table1" に参加済みの状態を作る
    fn setup() -> (
        Arc<InMemoryRoomRepository>,
        Arc<InMemoryMembershipRepository>,
        ConnectionId,
    ) {
        let rooms = Arc::new(InMemoryRoomRepository::new(Arc::new(FixedClock::new(0))));
        let membership = Arc::new(InMemoryMembershipRepository::new());
        let alice = ConnectionId::generate();
        let (_, room) = rooms.join(
            &crate::domain::RoomName::new("table1").unwrap(),
            name("Alice"),
            alice,
        );
        membership.bind(alice, room.id);
        (rooms, membership, alice)
    }

    #[tokio::test]
    async fn test_add_participant_creates_score_entry_only() {
        // テスト項目: 追加した参加者はスコアだけを持ち、メンバーにはならない
        // given (前提条件):
        let (rooms, membership, alice) = setup();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_room_data()
            .withf(|room| room.scores.len() == 2 && room.members.len() == 1)
            .times(1)
            .returning(|_| Ok(()));
        let usecase = AddParticipantUseCase::new(rooms, membership, Arc::new(pusher));

        // when (操作):
        let room = usecase.execute(alice, name("Carol")).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.scores[&name("Carol")].civil, 0);
        assert!(room.member_by_name(&name("Carol")).is_none());
    }

    #[tokio::test]
    async fn test_add_participant_without_room_fails() {
        // テスト項目: どのルームにも参加していない接続からの追加はエラーになり、通知されない
        // given (前提条件):
        let (rooms, membership, _) = setup();
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_room_data().times(0);
        let usecase = AddParticipantUseCase::new(rooms, membership, Arc::new(pusher));

        // when (操作):
        let result = usecase
            .execute(ConnectionId::generate(), name("Carol"))
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), AddParticipantError::NotInRoom);
    }

    #[tokio::test]
    async fn test_add_existing_participant_keeps_score() {
        // テスト項目: 既にスコアがある参加者を追加してもスコアは初期化されない
        // given (前提条件):
        let (rooms, membership, alice) = setup();
        let room_id = membership.lookup(&alice).unwrap();
        let fields = crate::domain::ScoreFields {
            civil: Some(7),
            ..Default::default()
        };
        rooms
            .set_score_fields(&room_id, &name("Alice"), &fields)
            .unwrap();
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_room_data().returning(|_| Ok(()));
        let usecase = AddParticipantUseCase::new(rooms, membership, Arc::new(pusher));

        // when (操作):
        let room = usecase.execute(alice, name("Alice")).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.scores[&name("Alice")].civil, 7);
    }
}
