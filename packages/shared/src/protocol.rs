//! WebSocket wire format shared by the server and the client.
//!
//! Every frame is a JSON text message tagged by `type`.
//!
//! ```text
//! client -> server : join | addParticipant | updateScore | leave   (ClientEvent)
//! server -> client : ack | roomData | error                        (ServerEvent)
//! ```
//!
//! Requests carry a client-chosen `requestId` which the server echoes back in
//! the matching `ack`. `roomData` is pushed to every member of a room after
//! each mutation and always contains the full room snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The three science counters that determine the derived science score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScienceScore {
    pub gear: i64,
    pub compass: i64,
    pub tablet: i64,
}

/// Score record of a single participant as sent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub username: String,
    pub civil_score: i64,
    pub military_score: i64,
    pub science_score: ScienceScore,
    pub commercial_score: i64,
    pub guild_score: i64,
    pub city_score: i64,
    pub leader_score: i64,
    pub coin_score: i64,
    pub wonder_score: i64,
}

/// Partial score update. Absent fields are left untouched.
///
/// `scienceScore` is replaced as a whole group when present. Unknown fields
/// are rejected so that typos never silently turn into no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoreUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub civil_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub military_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub science_score: Option<ScienceScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commercial_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wonder_score: Option<i64>,
}

/// A member (connection-bound participant) of a room
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub connection_id: String,
}

/// Full state of a room at one instant.
///
/// `version` increases by one on every mutation of the room, which lets the
/// client drop snapshots that arrive out of order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub id: String,
    pub name: String,
    pub version: u64,
    pub users: Vec<UserInfo>,
    pub scores: BTreeMap<String, ScoreRecord>,
}

/// Events sent from the client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    Join {
        request_id: u64,
        room_name: String,
        participant_name: String,
    },
    AddParticipant {
        request_id: u64,
        participant_name: String,
    },
    UpdateScore {
        request_id: u64,
        participant_name: String,
        score: ScoreUpdate,
    },
    Leave {
        request_id: u64,
    },
}

impl ClientEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            Self::Join { request_id, .. }
            | Self::AddParticipant { request_id, .. }
            | Self::UpdateScore { request_id, .. }
            | Self::Leave { request_id } => *request_id,
        }
    }
}

/// Acknowledgement payload for a client request.
///
/// Variant order matters for deserialization: the most specific shapes come
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AckResult {
    #[serde(rename_all = "camelCase")]
    Joined {
        room_id: String,
        room_data: RoomSnapshot,
    },
    #[serde(rename_all = "camelCase")]
    Updated {
        success: bool,
        room_data: RoomSnapshot,
    },
    Left {
        success: bool,
    },
    Error {
        error: String,
    },
}

impl AckResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

/// Events sent from the server to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Reply to exactly one client request
    Ack { request_id: u64, result: AckResult },
    /// Full room snapshot pushed to every member after a mutation
    RoomData { payload: RoomSnapshot },
    /// A frame that could not be decoded into a `ClientEvent`
    Error { message: String },
}
