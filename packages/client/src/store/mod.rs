//! Client-side mirror of one room.
//!
//! Data flows one way: server events become [`Action`]s, the reducer produces
//! the next [`ScoreState`], and selectors derive the view. User intents are
//! sent to the server and never touch local state; their effect shows up with
//! the next snapshot the server pushes.

pub mod action;
pub mod reducer;
pub mod selector;

use std::sync::Arc;

use scoreroom_shared::protocol::{AckResult, ClientEvent, ScoreUpdate, ServerEvent};
use tokio::sync::mpsc;

pub use action::Action;
pub use reducer::{ScoreState, reduce};
pub use selector::{ComputedScore, ScoreSelector, compute_score, science_points, select_score_by_name};

/// What the presentation layer should do after an inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The computed view changed
    ScoresChanged(Arc<Vec<ComputedScore>>),
    /// A request was rejected or the server reported an error
    Failed(String),
    /// Nothing to show
    Unchanged,
}

/// Room name and participant name of the last `join` intent
#[derive(Debug, Clone, PartialEq, Eq)]
struct JoinIntent {
    room: String,
    name: String,
}

pub struct ScoreStore {
    state: ScoreState,
    selector: ScoreSelector,
    outbound: mpsc::UnboundedSender<ClientEvent>,
    next_request_id: u64,
    join_intent: Option<JoinIntent>,
}

impl ScoreStore {
    /// Outgoing events are queued on `outbound`; whoever owns the receiver
    /// forwards them to the current connection.
    pub fn new(outbound: mpsc::UnboundedSender<ClientEvent>) -> Self {
        Self {
            state: ScoreState::default(),
            selector: ScoreSelector::new(),
            outbound,
            next_request_id: 1,
            join_intent: None,
        }
    }

    pub fn state(&self) -> &ScoreState {
        &self.state
    }

    /// Run `action` through the reducer. Returns `true` when the snapshot changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = reduce(&self.state, action);
        let changed = match (&self.state.snapshot, &next.snapshot) {
            (Some(before), Some(after)) => !Arc::ptr_eq(before, after),
            (None, None) => false,
            _ => true,
        };
        self.state = next;
        changed
    }

    pub fn computed_scores(&mut self) -> Arc<Vec<ComputedScore>> {
        self.selector.select_computed_scores(&self.state)
    }

    /// Feed one event received from the server
    pub fn handle_server_event(&mut self, event: ServerEvent) -> Notice {
        let changed = match event {
            ServerEvent::RoomData { payload } => self.dispatch(Action::RoomDataReceived(payload)),
            ServerEvent::Ack { request_id, result } => match result {
                AckResult::Joined { room_id, room_data } => self.dispatch(Action::Joined {
                    room_id,
                    snapshot: room_data,
                }),
                AckResult::Updated { room_data, .. } => {
                    self.dispatch(Action::RoomDataReceived(room_data))
                }
                AckResult::Left { .. } => self.dispatch(Action::Cleared),
                AckResult::Error { error } => {
                    tracing::debug!("Request {} rejected: {}", request_id, error);
                    return Notice::Failed(error);
                }
            },
            ServerEvent::Error { message } => return Notice::Failed(message),
        };

        if changed {
            Notice::ScoresChanged(self.computed_scores())
        } else {
            Notice::Unchanged
        }
    }

    pub fn join(&mut self, room: impl Into<String>, name: impl Into<String>) -> u64 {
        let intent = JoinIntent {
            room: room.into(),
            name: name.into(),
        };
        let request_id = self.send(|request_id| ClientEvent::Join {
            request_id,
            room_name: intent.room.clone(),
            participant_name: intent.name.clone(),
        });
        self.join_intent = Some(intent);
        request_id
    }

    pub fn add_participant(&mut self, name: impl Into<String>) -> u64 {
        let participant_name = name.into();
        self.send(|request_id| ClientEvent::AddParticipant {
            request_id,
            participant_name,
        })
    }

    pub fn update_score(&mut self, name: impl Into<String>, score: ScoreUpdate) -> u64 {
        let participant_name = name.into();
        self.send(|request_id| ClientEvent::UpdateScore {
            request_id,
            participant_name,
            score,
        })
    }

    pub fn leave(&mut self) -> u64 {
        self.join_intent = None;
        self.send(|request_id| ClientEvent::Leave { request_id })
    }

    /// Replay the last join on a fresh connection.
    ///
    /// The previous snapshot is dropped first: the room may have been removed
    /// and recreated with a lower version while we were away.
    pub fn rejoin(&mut self) -> Option<u64> {
        self.dispatch(Action::Cleared);
        let intent = self.join_intent.clone()?;
        tracing::info!("Rejoining room '{}' as '{}'", intent.room, intent.name);
        Some(self.join(intent.room, intent.name))
    }

    /// Participant name of the last join, if any
    pub fn my_name(&self) -> Option<&str> {
        self.join_intent.as_ref().map(|i| i.name.as_str())
    }

    fn send(&mut self, build: impl FnOnce(u64) -> ClientEvent) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        if self.outbound.send(build(request_id)).is_err() {
            tracing::warn!("Outbound queue closed, request {} dropped", request_id);
        }
        request_id
    }
}
