//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

pub struct GetRoomsUseCase {
    room_repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(room_repository: Arc<dyn RoomRepository>) -> Self {
        Self { room_repository }
    }

    /// 全ルームのスナップショット（ルーム名順）
    pub fn execute(&self) -> Vec<Arc<Room>> {
        self.room_repository.list_rooms()
    }
}
