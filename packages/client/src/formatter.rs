//! Output formatting utilities for client display.

use crate::store::ComputedScore;

const RULE: &str = "============================================================";

/// Formatter for everything the client prints
pub struct ScoreFormatter;

impl ScoreFormatter {
    /// Format the score table of a room
    ///
    /// # Arguments
    ///
    /// * `room_name` - Display name of the room, `None` when not in a room
    /// * `members` - Names of the connected participants
    /// * `scores` - Computed scores, one row per participant
    /// * `me` - Our own participant name (marked with "(me)")
    pub fn format_table(
        room_name: Option<&str>,
        members: &[&str],
        scores: &[ComputedScore],
        me: Option<&str>,
    ) -> String {
        let Some(room_name) = room_name else {
            return "\n(Not in a room. Type /join <room> <name>)\n".to_string();
        };

        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Room: {}\n", room_name));
        output.push_str(&format!(
            "{:<16} {:>5} {:>5} {:>11} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>6}\n",
            "name", "civ", "mil", "sci(g/c/t)", "com", "gld", "city", "ldr", "coin", "wnd",
            "sci", "total"
        ));

        if scores.is_empty() {
            output.push_str("(No participants)\n");
        }
        for score in scores {
            let mut label = score.username.clone();
            if !members.contains(&score.username.as_str()) {
                label.push('*');
            }
            if me == Some(score.username.as_str()) {
                label.push_str(" (me)");
            }
            let science = format!(
                "{}/{}/{}",
                score.science.gear, score.science.compass, score.science.tablet
            );
            output.push_str(&format!(
                "{:<16} {:>5} {:>5} {:>11} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>6}\n",
                label,
                score.civil,
                score.military,
                science,
                score.commercial,
                score.guild,
                score.city,
                score.leader,
                score.coin,
                score.wonder,
                score.science_sum,
                score.total
            ));
        }

        output.push_str("(* = not connected)\n");
        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format an error reported by the server or the command parser
    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    pub fn format_help() -> String {
        [
            "",
            "Commands:",
            "  /join <room> <name>              join a room (re-joining keeps your score)",
            "  /add <name>                      add a participant to the score sheet",
            "  /score <name> <field>=<value>..  set score fields",
            "      fields: civil military gear compass tablet commercial",
            "              guild city leader coin wonder",
            "  /leave                           leave the room",
            "  /show                            print the score table",
            "  /quit                            exit",
            "",
        ]
        .join("\n")
    }
}
