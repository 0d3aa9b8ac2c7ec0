//! HTTP API response DTOs.

use serde::Serialize;

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
    pub participant_count: usize,
    pub version: u64,
    pub created_at: String,
}

/// Response of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub rooms: usize,
}
