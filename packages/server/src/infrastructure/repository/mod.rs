//! Repository 実装
//!
//! - `inmemory`: プロセス内メモリのみを使う実装（再起動で全て消える）

pub mod inmemory;

pub use inmemory::{InMemoryMembershipRepository, InMemoryRoomRepository};
