//! Server state.
//!
//! Repository / MessagePusher の実装を受け取り、ユースケースを組み立てる。

use std::sync::Arc;

use crate::{
    domain::{MembershipRepository, MessagePusher, RoomRepository},
    usecase::{
        AddParticipantUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        UpdateScoreUseCase,
    },
};

use super::gateway::SessionGateway;

/// Shared application state
pub struct AppState {
    /// 接続の確立
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// 切断時の後片付け
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// WebSocket のイベント処理
    pub gateway: SessionGateway,
    /// ルーム一覧（HTTP API）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// ルーム詳細（HTTP API）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// ack の送信に使う
    pub message_pusher: Arc<dyn MessagePusher>,
}

impl AppState {
    /// Repository と MessagePusher からユースケースを組み立てる
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        membership_repository: Arc<dyn MembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
            room_repository.clone(),
            membership_repository.clone(),
            message_pusher.clone(),
        ));
        let gateway = SessionGateway::new(
            Arc::new(JoinRoomUseCase::new(
                room_repository.clone(),
                membership_repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(AddParticipantUseCase::new(
                room_repository.clone(),
                membership_repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(UpdateScoreUseCase::new(
                room_repository.clone(),
                membership_repository,
                message_pusher.clone(),
            )),
            leave_room_usecase.clone(),
        );

        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                leave_room_usecase,
                message_pusher.clone(),
            )),
            gateway,
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(room_repository.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(room_repository)),
            message_pusher,
        }
    }
}
