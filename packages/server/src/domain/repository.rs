//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! どちらの Repository もインメモリの同期処理だけで完結するため、
//! メソッドは `async` ではありません。

use std::sync::Arc;

use super::{
    ConnectionId, ParticipantId, ParticipantName, RepositoryError, Room, RoomId, RoomName,
    ScoreFields, ScoreRecord,
};

/// `detach_member` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetachOutcome {
    /// メンバーを取り除いた。ルームは残っている
    Detached(Arc<Room>),
    /// 最後のメンバーが抜けたのでルームを削除した
    RoomRemoved,
    /// ルームが存在しない、またはその接続のメンバーがいない（変更なし）
    NotAttached,
}

/// Room Registry
///
/// ルーム ID → ルームの対応を所有する。同じルームへの更新は直列化され、
/// 異なるルームへの更新は並行に進められる。
/// 更新系はすべて更新後のスナップショットを返す。
pub trait RoomRepository: Send + Sync {
    /// ルームが無ければ空のルームを作成し、ルーム ID を返す（冪等）
    fn ensure_room(&self, name: &RoomName) -> RoomId;

    /// 参加者を接続に紐付ける
    ///
    /// ルームが存在しない場合は呼び出し側のバグなので `RoomNotFound`。
    fn attach_member(
        &self,
        room_id: &RoomId,
        participant_name: ParticipantName,
        connection_id: ConnectionId,
    ) -> Result<(ParticipantId, Arc<Room>), RepositoryError>;

    /// `ensure_room` と `attach_member` を一つの排他区間で行う
    ///
    /// 二つを別々に呼ぶと、その間に最後のメンバーが抜けてルームが消える可能性がある。
    fn join(
        &self,
        room_name: &RoomName,
        participant_name: ParticipantName,
        connection_id: ConnectionId,
    ) -> (ParticipantId, Arc<Room>);

    /// 接続 ID が一致するメンバーを取り除く。空になったルームは削除する
    fn detach_member(&self, connection_id: &ConnectionId, room_id: &RoomId) -> DetachOutcome;

    /// メンバーにはせず、スコアのエントリだけを追加する
    ///
    /// ルームが無ければ `None`。エントリが既にあれば現在のスナップショットを返す。
    fn add_score_entry(
        &self,
        room_id: &RoomId,
        participant_name: ParticipantName,
    ) -> Option<Arc<Room>>;

    /// スコアを部分更新する
    ///
    /// ルームまたはスコアのエントリが無ければ `None`（エントリは作らない）。
    fn set_score_fields(
        &self,
        room_id: &RoomId,
        participant_name: &ParticipantName,
        fields: &ScoreFields,
    ) -> Option<(ScoreRecord, Arc<Room>)>;

    /// 現在のスナップショット
    fn get_snapshot(&self, room_id: &RoomId) -> Option<Arc<Room>>;

    /// 全ルームのスナップショット（ルーム名順）
    fn list_rooms(&self) -> Vec<Arc<Room>>;
}

/// Membership Index
///
/// 接続 ID → ルーム ID の対応を所有する。一つの接続は高々一つのルームに属する。
pub trait MembershipRepository: Send + Sync {
    /// 接続をルームに紐付ける。既存の紐付けは上書きし、以前のルーム ID を返す
    fn bind(&self, connection_id: ConnectionId, room_id: RoomId) -> Option<RoomId>;

    fn lookup(&self, connection_id: &ConnectionId) -> Option<RoomId>;

    /// 紐付けを解除し、解除したルーム ID を返す
    ///
    /// 同じ接続に対して二度目以降の呼び出しは `None` になる。
    fn unbind(&self, connection_id: &ConnectionId) -> Option<RoomId>;
}
