//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームの作成・参加者の紐付け・接続とルームの対応付け
//!
//! ### なぜこのテストが必要か
//! - 同名での再参加がスコアを引き継ぐことを保証する（再接続のシナリオ）
//! - 別のルームへ移った接続が元のルームに残らないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームへの参加、既存ルームへの参加
//! - エッジケース：同名での再参加、接続が別のルームへ移動

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DetachOutcome, MembershipRepository, MessagePusher, ParticipantId,
    ParticipantName, Room, RoomId, RoomName, RoomRepository,
};

use super::push_room_data;

/// ルーム参加の結果
#[derive(Debug, Clone)]
pub struct JoinedRoom {
    pub room_id: RoomId,
    pub participant_id: ParticipantId,
    pub room: Arc<Room>,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    membership_repository: Arc<dyn MembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
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

    /// ルーム参加を実行
    ///
    /// ルームが無ければ作成し、参加者を接続に紐付けてから、
    /// 新しいスナップショットをルームのメンバー全員に送る。
    /// 接続が別のルームに参加中だった場合は、先にそのルームから抜ける。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_name: RoomName,
        participant_name: ParticipantName,
    ) -> JoinedRoom {
        let (participant_id, room) =
            self.room_repository
                .join(&room_name, participant_name.clone(), connection_id);

        let previous = self.membership_repository.bind(connection_id, room.id);
        if let Some(previous_room_id) = previous.filter(|id| *id != room.id) {
            self.leave_previous_room(&connection_id, &previous_room_id)
                .await;
        }

        tracing::info!(
            "Participant '{}' joined room '{}' ({}) on connection '{}'",
            participant_name,
            room.name,
            room.id,
            connection_id
        );

        push_room_data(self.message_pusher.as_ref(), &room).await;

        JoinedRoom {
            room_id: room.id,
            participant_id,
            room,
        }
    }

    async fn leave_previous_room(&self, connection_id: &ConnectionId, room_id: &RoomId) {
        match self.room_repository.detach_member(connection_id, room_id) {
            DetachOutcome::Detached(room) => {
                tracing::info!(
                    "Connection '{}' moved out of room '{}'",
                    connection_id,
                    room.name
                );
                push_room_data(self.message_pusher.as_ref(), &room).await;
            }
            DetachOutcome::RoomRemoved | DetachOutcome::NotAttached => {}
        }
    }
}
