//! InMemory Repository 実装

pub mod membership;
pub mod room;

pub use membership::InMemoryMembershipRepository;
pub use room::InMemoryRoomRepository;
