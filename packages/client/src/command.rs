//! Parser for the lines typed at the client prompt.
//!
//! ```text
//! /join <room> <name>
//! /add <name>
//! /score <name> <field>=<value> ...
//! /leave
//! /show
//! /help
//! /quit
//! ```

use std::str::FromStr;

use scoreroom_shared::protocol::{ScienceScore, ScoreUpdate};

use crate::error::ClientError;

/// One editable score field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    Civil,
    Military,
    Gear,
    Compass,
    Tablet,
    Commercial,
    Guild,
    City,
    Leader,
    Coin,
    Wonder,
}

impl FromStr for ScoreField {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.to_ascii_lowercase().as_str() {
            "civil" => Self::Civil,
            "military" => Self::Military,
            "gear" => Self::Gear,
            "compass" => Self::Compass,
            "tablet" => Self::Tablet,
            "commercial" => Self::Commercial,
            "guild" => Self::Guild,
            "city" => Self::City,
            "leader" => Self::Leader,
            "coin" => Self::Coin,
            "wonder" => Self::Wonder,
            other => {
                return Err(ClientError::InvalidCommand(format!(
                    "unknown score field '{}'",
                    other
                )));
            }
        };
        Ok(field)
    }
}

/// Field assignments of a `/score` command, in the order they were typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEdit(pub Vec<(ScoreField, i64)>);

impl ScoreEdit {
    /// Build the wire update.
    ///
    /// The science counters travel as one group, so editing a single counter
    /// fills the other two from `current_science`.
    pub fn to_update(&self, current_science: Option<ScienceScore>) -> ScoreUpdate {
        let mut update = ScoreUpdate::default();
        let mut science: Option<ScienceScore> = None;

        for &(field, value) in &self.0 {
            match field {
                ScoreField::Civil => update.civil_score = Some(value),
                ScoreField::Military => update.military_score = Some(value),
                ScoreField::Commercial => update.commercial_score = Some(value),
                ScoreField::Guild => update.guild_score = Some(value),
                ScoreField::City => update.city_score = Some(value),
                ScoreField::Leader => update.leader_score = Some(value),
                ScoreField::Coin => update.coin_score = Some(value),
                ScoreField::Wonder => update.wonder_score = Some(value),
                ScoreField::Gear | ScoreField::Compass | ScoreField::Tablet => {
                    let group = science.get_or_insert(current_science.unwrap_or_default());
                    match field {
                        ScoreField::Gear => group.gear = value,
                        ScoreField::Compass => group.compass = value,
                        _ => group.tablet = value,
                    }
                }
            }
        }

        update.science_score = science;
        update
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join { room: String, name: String },
    Add { name: String },
    Score { name: String, edit: ScoreEdit },
    Leave,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ClientError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words
            .next()
            .ok_or_else(|| ClientError::InvalidCommand("empty line".to_string()))?;
        let args: Vec<&str> = words.collect();

        match (head, args.as_slice()) {
            ("/join", [room, name]) => Ok(Self::Join {
                room: room.to_string(),
                name: name.to_string(),
            }),
            ("/add", [name]) => Ok(Self::Add {
                name: name.to_string(),
            }),
            ("/score", [name, assignments @ ..]) if !assignments.is_empty() => {
                let edit = assignments
                    .iter()
                    .map(|a| parse_assignment(a))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Score {
                    name: name.to_string(),
                    edit: ScoreEdit(edit),
                })
            }
            ("/leave", []) => Ok(Self::Leave),
            ("/show", []) => Ok(Self::Show),
            ("/help", []) => Ok(Self::Help),
            ("/quit" | "/exit", []) => Ok(Self::Quit),
            ("/join" | "/add" | "/score" | "/leave" | "/show" | "/help" | "/quit" | "/exit", _) => {
                Err(ClientError::InvalidCommand(format!(
                    "wrong arguments for {} (type /help)",
                    head
                )))
            }
            _ => Err(ClientError::InvalidCommand(format!(
                "unknown command '{}' (type /help)",
                head
            ))),
        }
    }
}

fn parse_assignment(text: &str) -> Result<(ScoreField, i64), ClientError> {
    let (field, value) = text.split_once('=').ok_or_else(|| {
        ClientError::InvalidCommand(format!("expected <field>=<value>, got '{}'", text))
    })?;
    let value = value
        .parse::<i64>()
        .map_err(|_| ClientError::InvalidCommand(format!("'{}' is not a number", value)))?;
    Ok((field.parse()?, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join() {
        // テスト項目: /join がルーム名と参加者名に分解される
        // given (前提条件):
        let line = "/join table1 Alice";

        // when (操作):
        let command: Command = line.parse().unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Command::Join {
                room: "table1".to_string(),
                name: "Alice".to_string()
            }
        );
    }

    #[test]
    fn test_parse_score_assignments() {
        // テスト項目: /score のフィールド指定が順番どおりに解析される
        // given (前提条件):
        let line = "/score Alice civil=10 Gear=2 wonder=-1";

        // when (操作):
        let command: Command = line.parse().unwrap();

        // then (期待する結果):
        let Command::Score { name, edit } = command else {
            panic!("expected score command");
        };
        assert_eq!(name, "Alice");
        assert_eq!(
            edit.0,
            vec![
                (ScoreField::Civil, 10),
                (ScoreField::Gear, 2),
                (ScoreField::Wonder, -1)
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        // テスト項目: 不正な入力は InvalidCommand になる
        // given (前提条件):
        let lines = [
            "hello",
            "/join table1",
            "/score Alice",
            "/score Alice magic=1",
            "/score Alice civil=ten",
            "/score Alice civil",
        ];

        for line in lines {
            // when (操作):
            let result = line.parse::<Command>();

            // then (期待する結果):
            assert!(
                matches!(result, Err(ClientError::InvalidCommand(_))),
                "{} should be rejected",
                line
            );
        }
    }

    #[test]
    fn test_science_edit_keeps_other_counters() {
        // テスト項目: 科学カウンターの一部だけを変更すると、残りは現在の値が使われる
        // given (前提条件):
        let edit = ScoreEdit(vec![(ScoreField::Compass, 4), (ScoreField::Civil, 1)]);
        let current = ScienceScore {
            gear: 1,
            compass: 2,
            tablet: 3,
        };

        // when (操作):
        let update = edit.to_update(Some(current));

        // then (期待する結果):
        assert_eq!(
            update.science_score,
            Some(ScienceScore {
                gear: 1,
                compass: 4,
                tablet: 3
            })
        );
        assert_eq!(update.civil_score, Some(1));
        assert_eq!(update.military_score, None);
    }

    #[test]
    fn test_edit_without_science_leaves_group_absent() {
        // テスト項目: 科学カウンターを指定しない更新には scienceScore が含まれない
        // given (前提条件):
        let edit = ScoreEdit(vec![(ScoreField::Coin, 5)]);

        // when (操作):
        let update = edit.to_update(None);

        // then (期待する結果):
        assert_eq!(update.science_score, None);
        assert_eq!(update.coin_score, Some(5));
    }
}
