//! HTTP API endpoint handlers.
//!
//! 読み取り専用。ルームの状態を変更するのは WebSocket のイベントだけ。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::{
        http::{HealthDto, RoomSummaryDto},
        websocket::RoomSnapshot,
    },
    ui::state::AppState,
    usecase::GetRoomDetailError,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok",
        rooms: state.get_rooms_usecase.execute().len(),
    })
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute();

    // Domain Model から DTO への変換
    let summaries = rooms
        .iter()
        .map(|room| RoomSummaryDto::from(room.as_ref()))
        .collect();

    Json(summaries)
}

/// Get room snapshot by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSnapshot>, StatusCode> {
    match state.get_room_detail_usecase.execute(&room_id) {
        Ok(room) => Ok(Json(RoomSnapshot::from(room.as_ref()))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}
