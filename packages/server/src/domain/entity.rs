//! Entities
//!
//! `Room` は不変なスナップショットとして扱う。更新系のメソッドはすべて
//! `&self` を受け取り、新しい `Room` を返す（copy-on-write）。
//! Repository は古い `Arc<Room>` を新しいものに差し替えるだけなので、
//! ブロードキャスト中の読み手が更新途中の状態を観測することはない。

use std::collections::BTreeMap;

use super::{
    error::ValueObjectError,
    value_object::{ConnectionId, ParticipantId, ParticipantName, RoomId, RoomName, Timestamp},
};

/// ルームに接続中の参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: ParticipantId,
    pub name: ParticipantName,
    pub connection_id: ConnectionId,
}

/// 科学スコアの 3 つのカウンター
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScienceCounters {
    pub gear: i64,
    pub compass: i64,
    pub tablet: i64,
}

/// 参加者ごとのスコア
///
/// 参加者名をキーに保持されるため、再接続してもスコアは失われない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub participant: ParticipantName,
    pub civil: i64,
    pub military: i64,
    pub science: ScienceCounters,
    pub commercial: i64,
    pub guild: i64,
    pub city: i64,
    pub leader: i64,
    pub coin: i64,
    pub wonder: i64,
}

impl ScoreRecord {
    /// 全フィールド 0 のスコアを作成
    pub fn zeroed(participant: ParticipantName) -> Self {
        Self {
            participant,
            civil: 0,
            military: 0,
            science: ScienceCounters::default(),
            commercial: 0,
            guild: 0,
            city: 0,
            leader: 0,
            coin: 0,
            wonder: 0,
        }
    }

    /// 指定されたフィールドだけを上書きした新しいスコアを返す
    pub fn merged(&self, fields: &ScoreFields) -> Self {
        Self {
            participant: self.participant.clone(),
            civil: fields.civil.unwrap_or(self.civil),
            military: fields.military.unwrap_or(self.military),
            science: fields.science.unwrap_or(self.science),
            commercial: fields.commercial.unwrap_or(self.commercial),
            guild: fields.guild.unwrap_or(self.guild),
            city: fields.city.unwrap_or(self.city),
            leader: fields.leader.unwrap_or(self.leader),
            coin: fields.coin.unwrap_or(self.coin),
            wonder: fields.wonder.unwrap_or(self.wonder),
        }
    }
}

/// スコアの部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreFields {
    pub civil: Option<i64>,
    pub military: Option<i64>,
    pub science: Option<ScienceCounters>,
    pub commercial: Option<i64>,
    pub guild: Option<i64>,
    pub city: Option<i64>,
    pub leader: Option<i64>,
    pub coin: Option<i64>,
    pub wonder: Option<i64>,
}

impl ScoreFields {
    /// 各フィールドと科学カウンターの絶対値の上限
    ///
    /// 上限内であれば、科学スコアの二乗や合計を計算しても `i64` に収まる。
    pub const MAX_ABS: i64 = 1_000_000;

    /// 指定されたすべての値が上限内であることを確認する
    pub fn validate(&self) -> Result<(), ValueObjectError> {
        let flat = [
            ("civilScore", self.civil),
            ("militaryScore", self.military),
            ("commercialScore", self.commercial),
            ("guildScore", self.guild),
            ("cityScore", self.city),
            ("leaderScore", self.leader),
            ("coinScore", self.coin),
            ("wonderScore", self.wonder),
        ];
        let science = self.science.map(|s| {
            [
                ("scienceScore.gear", s.gear),
                ("scienceScore.compass", s.compass),
                ("scienceScore.tablet", s.tablet),
            ]
        });

        flat.into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .chain(science.into_iter().flatten())
            .try_for_each(|(field, value)| {
                if !(-Self::MAX_ABS..=Self::MAX_ABS).contains(&value) {
                    Err(ValueObjectError::OutOfRange {
                        field,
                        max: Self::MAX_ABS,
                    })
                } else {
                    Ok(())
                }
            })
    }
}

/// ルーム
///
/// ## 不変条件
///
/// - `members` 内の参加者名は一意
/// - `members` に含まれる参加者は必ず `scores` にもエントリを持つ
/// - `version` は更新のたびに 1 増える
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: RoomName,
    pub version: u64,
    pub members: Vec<Member>,
    pub scores: BTreeMap<ParticipantName, ScoreRecord>,
    pub created_at: Timestamp,
}

impl Room {
    /// 参加者のいない空のルームを作成
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            id: RoomId::from_name(&name),
            name,
            version: 0,
            members: Vec::new(),
            scores: BTreeMap::new(),
            created_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_by_name(&self, name: &ParticipantName) -> Option<&Member> {
        self.members.iter().find(|m| &m.name == name)
    }

    /// ブロードキャスト対象（接続中メンバーの接続 ID）
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().map(|m| m.connection_id).collect()
    }

    /// 参加者を接続に紐付けた新しいルームを返す
    ///
    /// 同名の参加者が既にいれば接続 ID だけを差し替え、既存の参加者 ID を返す。
    /// スコアは未登録の場合のみ 0 で初期化する。
    pub fn with_member_attached(
        &self,
        name: ParticipantName,
        connection_id: ConnectionId,
    ) -> (Self, ParticipantId) {
        let mut next = self.next_version();

        if let Some(existing) = next.members.iter_mut().find(|m| m.name == name) {
            existing.connection_id = connection_id;
            let id = existing.id;
            return (next, id);
        }

        let id = ParticipantId::generate();
        next.scores
            .entry(name.clone())
            .or_insert_with(|| ScoreRecord::zeroed(name.clone()));
        next.members.push(Member {
            id,
            name,
            connection_id,
        });
        (next, id)
    }

    /// 指定された接続のメンバーをすべて取り除いた新しいルームを返す
    ///
    /// 一つの接続が別名で複数回参加している場合も、その全員が取り除かれる。
    /// 該当するメンバーがいなければ `None`。
    pub fn without_connection(&self, connection_id: &ConnectionId) -> Option<Self> {
        if !self.members.iter().any(|m| &m.connection_id == connection_id) {
            return None;
        }
        let mut next = self.next_version();
        next.members.retain(|m| &m.connection_id != connection_id);
        Some(next)
    }

    /// スコアのエントリだけを追加した新しいルームを返す（メンバーにはしない）
    ///
    /// 既にエントリがあれば `None`（変更なし）。
    pub fn with_score_entry(&self, name: ParticipantName) -> Option<Self> {
        if self.scores.contains_key(&name) {
            return None;
        }
        let mut next = self.next_version();
        next.scores.insert(name.clone(), ScoreRecord::zeroed(name));
        Some(next)
    }

    /// スコアを部分更新した新しいルームを返す
    ///
    /// スコアのエントリが存在しなければ `None`。エントリを新規作成することはない。
    pub fn with_score_fields(
        &self,
        name: &ParticipantName,
        fields: &ScoreFields,
    ) -> Option<(Self, ScoreRecord)> {
        let updated = self.scores.get(name)?.merged(fields);
        let mut next = self.next_version();
        next.scores.insert(name.clone(), updated.clone());
        Some((next, updated))
    }

    fn next_version(&self) -> Self {
        let mut next = self.clone();
        next.version = self.version + 1;
        next
    }
}
