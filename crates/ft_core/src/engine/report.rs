//! Play-time reporting.
//!
//! Reports settle a scratch copy of the state up to the requested instant,
//! so reading totals never disturbs the live stint clocks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::game::MatchState;
use crate::models::player::{Millis, PlayerStatus, Role};

/// One roster entry with its accumulated time, settled up to the report
/// instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayTimeRow {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub status: PlayerStatus,
    pub inactive: bool,
    pub field_secs: u32,
    pub defender_secs: u32,
    pub midfielder_secs: u32,
    pub attacker_secs: u32,
    pub goalie_secs: u32,
    pub substitute_secs: u32,
    /// On-field total as `mm:ss`, ready for display.
    pub field_clock: String,
}

/// Everyone's time at a glance, in roster order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayTimeReport {
    pub generated_at: DateTime<Utc>,
    pub paused: bool,
    pub rows: Vec<PlayTimeRow>,
}

impl MatchState {
    pub fn time_report(&self, now: Millis) -> PlayTimeReport {
        let settled = self.tick(now);
        let rows = settled
            .players()
            .iter()
            .map(|player| PlayTimeRow {
                id: player.id.clone(),
                name: player.name.clone(),
                role: player.role,
                status: player.status(),
                inactive: player.inactive,
                field_secs: player.time.field_secs,
                defender_secs: player.time.defender_secs,
                midfielder_secs: player.time.midfielder_secs,
                attacker_secs: player.time.attacker_secs,
                goalie_secs: player.time.goalie_secs,
                substitute_secs: player.time.substitute_secs,
                field_clock: format_clock(player.time.field_secs),
            })
            .collect();
        PlayTimeReport {
            generated_at: DateTime::from_timestamp_millis(now as i64).unwrap_or_default(),
            paused: self.paused,
            rows,
        }
    }
}

/// Formats whole seconds as `mm:ss`. Minutes run past 59 rather than
/// rolling over into hours.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
