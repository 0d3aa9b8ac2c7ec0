//! Derived views over the score state.

use std::sync::Arc;

use scoreroom_shared::protocol::{RoomSnapshot, ScienceScore, ScoreRecord};

use super::reducer::ScoreState;

/// Multiplier applied to the number of complete science sets
const SCIENCE_SET_POINTS: i64 = 7;

/// A participant's score with the derived sums filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedScore {
    pub username: String,
    pub civil: i64,
    pub military: i64,
    pub science: ScienceScore,
    /// Points derived from the three science counters
    pub science_sum: i64,
    pub commercial: i64,
    pub guild: i64,
    pub city: i64,
    pub leader: i64,
    pub coin: i64,
    pub wonder: i64,
    /// Every flat field plus `science_sum`
    pub total: i64,
}

/// `min(gear, compass, tablet) * 7` plus the square of each positive counter
///
/// Saturates at the `i64` bounds instead of overflowing.
pub fn science_points(science: &ScienceScore) -> i64 {
    let sets = science.gear.min(science.compass).min(science.tablet);
    let square = |n: i64| if n > 0 { n.saturating_mul(n) } else { 0 };
    sets.saturating_mul(SCIENCE_SET_POINTS)
        .saturating_add(square(science.gear))
        .saturating_add(square(science.compass))
        .saturating_add(square(science.tablet))
}

pub fn compute_score(record: &ScoreRecord) -> ComputedScore {
    let science_sum = science_points(&record.science_score);
    let total = [
        record.civil_score,
        record.military_score,
        science_sum,
        record.commercial_score,
        record.guild_score,
        record.city_score,
        record.leader_score,
        record.coin_score,
        record.wonder_score,
    ]
    .into_iter()
    .fold(0i64, i64::saturating_add);

    ComputedScore {
        username: record.username.clone(),
        civil: record.civil_score,
        military: record.military_score,
        science: record.science_score,
        science_sum,
        commercial: record.commercial_score,
        guild: record.guild_score,
        city: record.city_score,
        leader: record.leader_score,
        coin: record.coin_score,
        wonder: record.wonder_score,
        total,
    }
}

/// Memoizing selector for the computed score list.
///
/// The cache is keyed by the identity of the snapshot `Arc`. Holding the
/// snapshot in the cache keeps its address from being reused, so an equal
/// pointer always means the same snapshot.
#[derive(Debug, Default)]
pub struct ScoreSelector {
    cache: Option<(Arc<RoomSnapshot>, Arc<Vec<ComputedScore>>)>,
}

impl ScoreSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computed scores of every participant, ordered by name.
    ///
    /// Returns the same `Arc` until the snapshot is replaced.
    pub fn select_computed_scores(&mut self, state: &ScoreState) -> Arc<Vec<ComputedScore>> {
        let Some(snapshot) = &state.snapshot else {
            self.cache = None;
            return Arc::new(Vec::new());
        };

        if let Some((cached_snapshot, scores)) = &self.cache
            && Arc::ptr_eq(cached_snapshot, snapshot)
        {
            return scores.clone();
        }

        let scores = Arc::new(snapshot.scores.values().map(compute_score).collect::<Vec<_>>());
        self.cache = Some((snapshot.clone(), scores.clone()));
        scores
    }
}

pub fn select_score_by_name<'a>(
    scores: &'a [ComputedScore],
    username: &str,
) -> Option<&'a ComputedScore> {
    scores.iter().find(|s| s.username == username)
}

/// Names of the participants currently connected to the room
pub fn select_member_names(state: &ScoreState) -> Vec<&str> {
    state
        .snapshot
        .as_ref()
        .map(|s| s.users.iter().map(|u| u.username.as_str()).collect())
        .unwrap_or_default()
}

pub fn select_room_name(state: &ScoreState) -> Option<&str> {
    state.snapshot.as_ref().map(|s| s.name.as_str())
}
