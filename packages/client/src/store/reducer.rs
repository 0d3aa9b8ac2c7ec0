//! Pure state transitions of the score store.
//!
//! The local snapshot is always replaced as a whole, never merged. Within one
//! room a snapshot is only accepted when its `version` is newer than the one
//! held, so a push that overtakes an ack cannot roll the view back.

use std::sync::Arc;

use scoreroom_shared::protocol::RoomSnapshot;

use super::action::Action;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    /// Room confirmed by the last `join` ack
    pub room_id: Option<String>,
    /// Latest accepted snapshot
    pub snapshot: Option<Arc<RoomSnapshot>>,
}

/// Apply `action` to `state`.
///
/// When nothing changes the returned state shares the same snapshot `Arc`,
/// so callers can detect no-ops with `Arc::ptr_eq`.
pub fn reduce(state: &ScoreState, action: Action) -> ScoreState {
    match action {
        Action::Joined { room_id, snapshot } => ScoreState {
            snapshot: replace_snapshot(state.snapshot.as_ref(), snapshot),
            room_id: Some(room_id),
        },
        Action::RoomDataReceived(snapshot) => ScoreState {
            room_id: state.room_id.clone(),
            snapshot: replace_snapshot(state.snapshot.as_ref(), snapshot),
        },
        Action::Cleared => ScoreState::default(),
    }
}

fn replace_snapshot(
    current: Option<&Arc<RoomSnapshot>>,
    incoming: RoomSnapshot,
) -> Option<Arc<RoomSnapshot>> {
    match current {
        Some(current) if current.id == incoming.id && incoming.version <= current.version => {
            tracing::debug!(
                "Ignoring stale snapshot of room {} (version {} <= {})",
                incoming.id,
                incoming.version,
                current.version
            );
            Some(current.clone())
        }
        _ => Some(Arc::new(incoming)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn snapshot(id: &str, version: u64) -> RoomSnapshot {
        RoomSnapshot {
            id: id.to_string(),
            name: id.to_string(),
            version,
            users: Vec::new(),
            scores: BTreeMap::new(),
        }
    }

    #[test]
    fn test_newer_snapshot_replaces() {
        // テスト項目: 同じルームのより新しいスナップショットで置き換わる
        // given (前提条件):
        let state = reduce(
            &ScoreState::default(),
            Action::RoomDataReceived(snapshot("room-1", 1)),
        );

        // when (操作):
        let next = reduce(&state, Action::RoomDataReceived(snapshot("room-1", 2)));

        // then (期待する結果):
        assert_eq!(next.snapshot.unwrap().version, 2);
    }

    #[test]
    fn test_stale_snapshot_is_ignored() {
        // テスト項目: 古い・同じバージョンのスナップショットは無視され、Arc も共有される
        // given (前提条件):
        let state = reduce(
            &ScoreState::default(),
            Action::RoomDataReceived(snapshot("room-1", 5)),
        );

        for version in [4, 5] {
            // when (操作):
            let next = reduce(
                &state,
                Action::RoomDataReceived(snapshot("room-1", version)),
            );

            // then (期待する結果):
            assert!(Arc::ptr_eq(
                state.snapshot.as_ref().unwrap(),
                next.snapshot.as_ref().unwrap()
            ));
        }
    }

    #[test]
    fn test_snapshot_of_other_room_always_replaces() {
        // テスト項目: 別のルームのスナップショットはバージョンに関係なく置き換わる
        // given (前提条件):
        let state = reduce(
            &ScoreState::default(),
            Action::RoomDataReceived(snapshot("room-1", 9)),
        );

        // when (操作):
        let next = reduce(&state, Action::RoomDataReceived(snapshot("room-2", 1)));

        // then (期待する結果):
        assert_eq!(next.snapshot.unwrap().id, "room-2");
    }

    #[test]
    fn test_joined_sets_room_and_cleared_resets() {
        // テスト項目: Joined でルームが確定し、Cleared で初期状態に戻る
        // given (前提条件):
        let state = ScoreState::default();

        // when (操作):
        let joined = reduce(
            &state,
            Action::Joined {
                room_id: "room-1".to_string(),
                snapshot: snapshot("room-1", 1),
            },
        );
        let cleared = reduce(&joined, Action::Cleared);

        // then (期待する結果):
        assert_eq!(joined.room_id.as_deref(), Some("room-1"));
        assert_eq!(cleared, ScoreState::default());
    }
}
