//! Actions accepted by the score store reducer.

use scoreroom_shared::protocol::RoomSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The server acknowledged our `join`
    Joined {
        room_id: String,
        snapshot: RoomSnapshot,
    },
    /// A `roomData` push, or the snapshot carried by a successful ack
    RoomDataReceived(RoomSnapshot),
    /// Forget the current room (after `leave`, or before replaying a join)
    Cleared,
}
