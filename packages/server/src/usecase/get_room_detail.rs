//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::GetRoomDetailError;

pub struct GetRoomDetailUseCase {
    room_repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(room_repository: Arc<dyn RoomRepository>) -> Self {
        Self { room_repository }
    }

    /// ルーム ID（文字列）からスナップショットを取得
    ///
    /// ID として解釈できない文字列も、存在しないルームとして扱う。
    pub fn execute(&self, room_id: &str) -> Result<Arc<Room>, GetRoomDetailError> {
        let room_id =
            RoomId::try_from(room_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        self.room_repository
            .get_snapshot(&room_id)
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
