//! UseCase 層のエラー型
//!
//! いずれも送信者への ack で `{ error: string }` として返される。
//! 表示用メッセージはクライアントとの取り決めなので変更しないこと。

use thiserror::Error;

/// 送信者がどのルームにも参加していない
pub const NOT_IN_ROOM: &str = "not in a room";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddParticipantError {
    #[error("not in a room")]
    NotInRoom,

    #[error("room not found")]
    RoomNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateScoreError {
    #[error("not in a room")]
    NotInRoom,

    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveRoomError {
    #[error("not in a room")]
    NotInRoom,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
