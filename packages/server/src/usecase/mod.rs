//! UseCase 層
//!
//! Session Gateway の各イベントに 1 対 1 で対応するユースケース。
//! 状態の変更に成功したときだけ、変更後のスナップショットをルームのメンバー全員に送る。

mod add_participant;
mod connect_participant;
mod disconnect_participant;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod update_score;

pub use add_participant::AddParticipantUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{
    AddParticipantError, GetRoomDetailError, LeaveRoomError, NOT_IN_ROOM, UpdateScoreError,
};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinRoomUseCase, JoinedRoom};
pub use leave_room::{LeaveRoomUseCase, LeftRoom};
pub use update_score::UpdateScoreUseCase;

use crate::domain::{MessagePusher, Room};

/// ルームのスナップショットをメンバー全員に送る
///
/// 配信の失敗は状態の変更を取り消さない（ログに残すだけ）。
async fn push_room_data(message_pusher: &dyn MessagePusher, room: &Room) {
    if let Err(e) = message_pusher.push_room_data(room).await {
        tracing::warn!("Failed to push room data of '{}': {}", room.name, e);
    }
}
