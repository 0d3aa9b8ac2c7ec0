//! Domain 層
//!
//! - `value_object`: 名前・ID などの値
//! - `entity`: Room / Member / ScoreRecord
//! - `repository`: Room Registry と Membership Index のインターフェース
//! - `message_pusher`: クライアントへの通知のインターフェース

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Member, Room, ScienceCounters, ScoreFields, ScoreRecord};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{DetachOutcome, MembershipRepository, RoomRepository};
pub use value_object::{
    ConnectionId, ParticipantId, ParticipantName, RoomId, RoomName, Timestamp,
};
