//! Session Gateway
//!
//! WebSocket で受け取ったフレームをデコードし、対応するユースケースを呼び出して、
//! 送信者に返す `ServerEvent` を組み立てる。
//!
//! どのイベントも必ず一つの応答を返す。失敗は `{ error }` の ack として返し、
//! 他のメンバーには何も配信しない。
//!
//! ## テスト作業記録
//!
//! ### 何をテストしているか
//! - デコードできないフレーム・不正な名前の扱い
//! - 各イベントの ack の形
//! - 未参加の接続からのイベントがエラーの ack になること

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, ParticipantName, RoomName, ScoreFields, ValueObjectError},
    infrastructure::dto::websocket::{AckResult, ClientEvent, RoomSnapshot, ServerEvent},
    usecase::{
        AddParticipantUseCase, JoinRoomUseCase, LeaveRoomUseCase, UpdateScoreUseCase,
    },
};

pub struct SessionGateway {
    join_room_usecase: Arc<JoinRoomUseCase>,
    add_participant_usecase: Arc<AddParticipantUseCase>,
    update_score_usecase: Arc<UpdateScoreUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
}

impl SessionGateway {
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        add_participant_usecase: Arc<AddParticipantUseCase>,
        update_score_usecase: Arc<UpdateScoreUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
    ) -> Self {
        Self {
            join_room_usecase,
            add_participant_usecase,
            update_score_usecase,
            leave_room_usecase,
        }
    }

    /// テキストフレームを処理し、送信者への応答を返す
    ///
    /// デコードできないフレームには `requestId` が無いため、ack ではなく
    /// `error` イベントを返す。
    pub async fn handle_text(&self, connection_id: ConnectionId, text: &str) -> ServerEvent {
        match serde_json::from_str::<ClientEvent>(text) {
            Ok(event) => self.handle_event(connection_id, event).await,
            Err(e) => {
                tracing::warn!(
                    "Failed to decode frame from connection '{}': {}",
                    connection_id,
                    e
                );
                ServerEvent::Error {
                    message: format!("invalid message: {}", e),
                }
            }
        }
    }

    /// デコード済みのイベントを処理し、ack を返す
    pub async fn handle_event(&self, connection_id: ConnectionId, event: ClientEvent) -> ServerEvent {
        let request_id = event.request_id();
        let result = match event {
            ClientEvent::Join {
                room_name,
                participant_name,
                ..
            } => self.join(connection_id, room_name, participant_name).await,
            ClientEvent::AddParticipant {
                participant_name, ..
            } => self.add_participant(connection_id, participant_name).await,
            ClientEvent::UpdateScore {
                participant_name,
                score,
                ..
            } => {
                self.update_score(connection_id, participant_name, score.into())
                    .await
            }
            ClientEvent::Leave { .. } => self.leave(connection_id).await,
        };

        if let AckResult::Error { error } = &result {
            tracing::debug!(
                "Request {} from connection '{}' failed: {}",
                request_id,
                connection_id,
                error
            );
        }

        ServerEvent::Ack { request_id, result }
    }

    async fn join(
        &self,
        connection_id: ConnectionId,
        room_name: String,
        participant_name: String,
    ) -> AckResult {
        let room_name = match RoomName::try_from(room_name) {
            Ok(name) => name,
            Err(e) => return invalid_payload(e),
        };
        let participant_name = match ParticipantName::try_from(participant_name) {
            Ok(name) => name,
            Err(e) => return invalid_payload(e),
        };

        let joined = self
            .join_room_usecase
            .execute(connection_id, room_name, participant_name)
            .await;
        AckResult::Joined {
            room_id: joined.room_id.to_string(),
            room_data: RoomSnapshot::from(joined.room.as_ref()),
        }
    }

    async fn add_participant(
        &self,
        connection_id: ConnectionId,
        participant_name: String,
    ) -> AckResult {
        let participant_name = match ParticipantName::try_from(participant_name) {
            Ok(name) => name,
            Err(e) => return invalid_payload(e),
        };

        match self
            .add_participant_usecase
            .execute(connection_id, participant_name)
            .await
        {
            Ok(room) => AckResult::Updated {
                success: true,
                room_data: RoomSnapshot::from(room.as_ref()),
            },
            Err(e) => AckResult::error(e.to_string()),
        }
    }

    async fn update_score(
        &self,
        connection_id: ConnectionId,
        participant_name: String,
        fields: ScoreFields,
    ) -> AckResult {
        let participant_name = match ParticipantName::try_from(participant_name) {
            Ok(name) => name,
            Err(e) => return invalid_payload(e),
        };
        if let Err(e) = fields.validate() {
            return invalid_payload(e);
        }

        match self
            .update_score_usecase
            .execute(connection_id, participant_name, fields)
            .await
        {
            Ok((_, room)) => AckResult::Updated {
                success: true,
                room_data: RoomSnapshot::from(room.as_ref()),
            },
            Err(e) => AckResult::error(e.to_string()),
        }
    }

    async fn leave(&self, connection_id: ConnectionId) -> AckResult {
        match self.leave_room_usecase.execute(connection_id).await {
            Ok(_) => AckResult::Left { success: true },
            Err(e) => AckResult::error(e.to_string()),
        }
    }
}

fn invalid_payload(e: ValueObjectError) -> AckResult {
    AckResult::error(format!("invalid payload: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MessagePusher,
        infrastructure::{
            message_pusher::WebSocketMessagePusher,
            repository::{InMemoryMembershipRepository, InMemoryRoomRepository},
        },
        ui::state::AppState,
        usecase::NOT_IN_ROOM,
    };
    use scoreroom_shared::time::FixedClock;
    use serde_json::json;
    use tokio::sync::mpsc;

    struct Harness {
        state: AppState,
        pusher: Arc<WebSocketMessagePusher>,
    }

    impl Harness {
        fn new() -> Self {
            let pusher = Arc::new(WebSocketMessagePusher::new());
            let state = AppState::new(
                Arc::new(InMemoryRoomRepository::new(Arc::new(FixedClock::new(0)))),
                Arc::new(InMemoryMembershipRepository::new()),
                pusher.clone(),
            );
            Self { state, pusher }
        }

        async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let conn = ConnectionId::generate();
            self.pusher.register_client(conn, tx).await;
            (conn, rx)
        }

        async fn send(&self, conn: ConnectionId, frame: serde_json::Value) -> ServerEvent {
            self.state
                .gateway
                .handle_text(conn, &frame.to_string())
                .await
        }
    }

    fn ack_result(event: ServerEvent) -> (u64, AckResult) {
        match event {
            ServerEvent::Ack { request_id, result } => (request_id, result),
            other => panic!("expected ack, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_frame_returns_error_event() {
        // テスト項目: JSON として解釈できないフレームには error イベントを返す
        // given (前提条件):
        let harness = Harness::new();
        let (conn, _rx) = harness.connect().await;

        // when (操作):
        let event = harness.state.gateway.handle_text(conn, "hello").await;

        // then (期待する結果):
        assert!(matches!(event, ServerEvent::Error { .. }));
    }

    #[tokio::test]
    async fn test_join_acks_with_room_id_and_snapshot() {
        // テスト項目: join の ack にルーム ID とスナップショットが含まれ、roomData も届く
        // given (前提条件):
        let harness = Harness::new();
        let (conn, mut rx) = harness.connect().await;

        // when (操作):
        let event = harness
            .send(
                conn,
                json!({"type": "join", "requestId": 1, "roomName": "table1", "participantName": "Alice"}),
            )
            .await;

        // then (期待する結果):
        let (request_id, result) = ack_result(event);
        assert_eq!(request_id, 1);
        let AckResult::Joined { room_id, room_data } = result else {
            panic!("expected joined ack");
        };
        assert_eq!(room_id, room_data.id);
        assert_eq!(room_data.users[0].username, "Alice");
        let pushed: ServerEvent = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert!(matches!(pushed, ServerEvent::RoomData { .. }));
    }

    #[tokio::test]
    async fn test_events_before_join_return_not_in_room() {
        // テスト項目: 未参加の接続からの addParticipant / updateScore / leave はエラーの ack
        // given (前提条件):
        let harness = Harness::new();
        let (conn, mut rx) = harness.connect().await;
        let frames = [
            json!({"type": "addParticipant", "requestId": 1, "participantName": "Carol"}),
            json!({"type": "updateScore", "requestId": 2, "participantName": "Alice", "score": {"civilScore": 1}}),
            json!({"type": "leave", "requestId": 3}),
        ];

        for frame in frames {
            // when (操作):
            let (_, result) = ack_result(harness.send(conn, frame).await);

            // then (期待する結果):
            assert_eq!(result, AckResult::error(NOT_IN_ROOM));
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_blank_name_is_invalid_payload() {
        // テスト項目: 空白だけの名前での join は invalid payload のエラーになる
        // given (前提条件):
        let harness = Harness::new();
        let (conn, _rx) = harness.connect().await;

        // when (操作):
        let event = harness
            .send(
                conn,
                json!({"type": "join", "requestId": 5, "roomName": "  ", "participantName": "Alice"}),
            )
            .await;

        // then (期待する結果):
        let (_, result) = ack_result(event);
        let AckResult::Error { error } = result else {
            panic!("expected error ack");
        };
        assert!(error.starts_with("invalid payload:"));
    }

    #[tokio::test]
    async fn test_update_unknown_participant_returns_error() {
        // テスト項目: スコアのない参加者の更新はエラーの ack になる
        // given (前提条件):
        let harness = Harness::new();
        let (conn, _rx) = harness.connect().await;
        harness
            .send(
                conn,
                json!({"type": "join", "requestId": 1, "roomName": "table1", "participantName": "Alice"}),
            )
            .await;

        // when (操作):
        let event = harness
            .send(
                conn,
                json!({"type": "updateScore", "requestId": 2, "participantName": "Dave", "score": {"coinScore": 3}}),
            )
            .await;

        // then (期待する結果):
        let (_, result) = ack_result(event);
        assert_eq!(result, AckResult::error("participant 'Dave' not found"));
    }

    #[tokio::test]
    async fn test_add_and_update_ack_with_success() {
        // テスト項目: addParticipant と updateScore は success とスナップショットを返す
        // given (前提条件):
        let harness = Harness::new();
        let (conn, _rx) = harness.connect().await;
        harness
            .send(
                conn,
                json!({"type": "join", "requestId": 1, "roomName": "table1", "participantName": "Alice"}),
            )
            .await;

        // when (操作):
        let added = harness
            .send(
                conn,
                json!({"type": "addParticipant", "requestId": 2, "participantName": "Carol"}),
            )
            .await;
        let updated = harness
            .send(
                conn,
                json!({"type": "updateScore", "requestId": 3, "participantName": "Carol", "score": {"guildScore": 6}}),
            )
            .await;

        // then (期待する結果):
        let (_, added) = ack_result(added);
        assert!(matches!(added, AckResult::Updated { success: true, .. }));
        let (_, updated) = ack_result(updated);
        let AckResult::Updated { room_data, .. } = updated else {
            panic!("expected updated ack");
        };
        assert_eq!(room_data.scores["Carol"].guild_score, 6);
        assert_eq!(room_data.users.len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_after_joining_under_two_names_removes_room() {
        // テスト項目: 一つの接続が同じルームに別名で二度参加しても、切断でルームが残らない
        // given (前提条件):
        let harness = Harness::new();
        let (conn, _rx) = harness.connect().await;
        for (request_id, participant) in [(1, "Alice"), (2, "Bob")] {
            harness
                .send(
                    conn,
                    json!({"type": "join", "requestId": request_id, "roomName": "table1", "participantName": participant}),
                )
                .await;
        }

        // when (操作):
        let left = harness
            .state
            .disconnect_participant_usecase
            .execute(conn)
            .await;

        // then (期待する結果):
        assert!(left.is_some());
        assert!(harness.state.get_rooms_usecase.execute().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_invalid_payload() {
        // テスト項目: 上限を超えるスコアの更新は invalid payload になり、配信もされない
        // given (前提条件):
        let harness = Harness::new();
        let (conn, mut rx) = harness.connect().await;
        harness
            .send(
                conn,
                json!({"type": "join", "requestId": 1, "roomName": "table1", "participantName": "Alice"}),
            )
            .await;
        rx.recv().await.unwrap();

        // when (操作):
        let event = harness
            .send(
                conn,
                json!({"type": "updateScore", "requestId": 2, "participantName": "Alice",
                       "score": {"scienceScore": {"gear": 4_000_000_000i64, "compass": 0, "tablet": 0}}}),
            )
            .await;

        // then (期待する結果):
        let (_, result) = ack_result(event);
        let AckResult::Error { error } = result else {
            panic!("expected error ack");
        };
        assert!(error.starts_with("invalid payload:"));
        assert!(rx.try_recv().is_err());
    }
}
