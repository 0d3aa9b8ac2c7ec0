//! UseCase: スコア更新
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateScoreUseCase::execute() メソッド
//! - 部分更新と、更新後スナップショットの配信
//!
//! ### なぜこのテストが必要か
//! - 存在しない参加者のスコアが暗黙に作られないことを保証する
//! - 失敗時にはルームの状態も配信も変わらないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバー自身のスコア更新、スコアだけを持つ参加者の更新
//! - 異常系：未参加の接続、存在しない参加者

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MembershipRepository, MessagePusher, ParticipantName, Room, RoomRepository,
    ScoreFields, ScoreRecord,
};

use super::{UpdateScoreError, push_room_data};

/// スコア更新のユースケース
pub struct UpdateScoreUseCase {
    room_repository: Arc<dyn RoomRepository>,
    membership_repository: Arc<dyn MembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateScoreUseCase {
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

    /// 送信者が参加しているルームで、指定された参加者のスコアを部分更新する
    ///
    /// 更新できるのはスコアのエントリを既に持つ参加者だけ。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        participant_name: ParticipantName,
        fields: ScoreFields,
    ) -> Result<(ScoreRecord, Arc<Room>), UpdateScoreError> {
        let room_id = self
            .membership_repository
            .lookup(&connection_id)
            .ok_or(UpdateScoreError::NotInRoom)?;

        let (record, room) = self
            .room_repository
            .set_score_fields(&room_id, &participant_name, &fields)
            .ok_or_else(|| UpdateScoreError::ParticipantNotFound(participant_name.to_string()))?;

        tracing::debug!(
            "Score of '{}' in room '{}' updated (version {})",
            participant_name,
            room.name,
            room.version
        );

        push_room_data(self.message_pusher.as_ref(), &room).await;

        Ok((record, room))
    }
}
