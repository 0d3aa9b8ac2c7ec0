//! Conversion logic between DTOs and domain entities.

use scoreroom_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::entity;
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<dto::ScienceScore> for entity::ScienceCounters {
    fn from(dto: dto::ScienceScore) -> Self {
        Self {
            gear: dto.gear,
            compass: dto.compass,
            tablet: dto.tablet,
        }
    }
}

impl From<dto::ScoreUpdate> for entity::ScoreFields {
    fn from(dto: dto::ScoreUpdate) -> Self {
        Self {
            civil: dto.civil_score,
            military: dto.military_score,
            science: dto.science_score.map(Into::into),
            commercial: dto.commercial_score,
            guild: dto.guild_score,
            city: dto.city_score,
            leader: dto.leader_score,
            coin: dto.coin_score,
            wonder: dto.wonder_score,
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ScienceCounters> for dto::ScienceScore {
    fn from(model: entity::ScienceCounters) -> Self {
        Self {
            gear: model.gear,
            compass: model.compass,
            tablet: model.tablet,
        }
    }
}

impl From<&entity::ScoreRecord> for dto::ScoreRecord {
    fn from(model: &entity::ScoreRecord) -> Self {
        Self {
            username: model.participant.as_str().to_string(),
            civil_score: model.civil,
            military_score: model.military,
            science_score: model.science.into(),
            commercial_score: model.commercial,
            guild_score: model.guild,
            city_score: model.city,
            leader_score: model.leader,
            coin_score: model.coin,
            wonder_score: model.wonder,
        }
    }
}

impl From<&entity::Member> for dto::UserInfo {
    fn from(model: &entity::Member) -> Self {
        Self {
            id: model.id.to_string(),
            username: model.name.as_str().to_string(),
            connection_id: model.connection_id.to_string(),
        }
    }
}

impl From<&entity::Room> for dto::RoomSnapshot {
    fn from(model: &entity::Room) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name.as_str().to_string(),
            version: model.version,
            users: model.members.iter().map(Into::into).collect(),
            scores: model
                .scores
                .iter()
                .map(|(name, record)| (name.as_str().to_string(), record.into()))
                .collect(),
        }
    }
}

impl From<&entity::Room> for http::RoomSummaryDto {
    fn from(model: &entity::Room) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name.as_str().to_string(),
            members: model
                .members
                .iter()
                .map(|m| m.name.as_str().to_string())
                .collect(),
            participant_count: model.scores.len(),
            version: model.version,
            created_at: timestamp_to_jst_rfc3339(model.created_at.value()),
        }
    }
}
