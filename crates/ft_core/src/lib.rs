//! # ft_core - Rotation Engine for Live Youth Football Matches
//!
//! This library keeps every player's pitch time fair and visible while a
//! match is running: it tracks per-role stint time, maintains the rotation
//! queue, and applies format-specific substitution rules as pure state
//! transitions driven by the host's clock.
//!
//! ## Features
//! - Per-player time accounting by role, pause-aware, floored to whole seconds
//! - Three squad formats: Pairs-7, Individual-6, Individual-7
//! - Position and goalie switches, bench management, single-level undo
//! - A rejected transition always leaves the caller's state intact

pub mod engine;
pub mod error;
pub mod models;
pub mod state;

// Re-export the engine surface
pub use engine::{
    format_clock, MatchState, NextOff, PlayTimeReport, PlayTimeRow, RotationQueue,
    SubstitutionRecord,
};
pub use error::{Result, RotationError};

// Re-export the model types
pub use models::{
    FieldPair, Individual6Lineup, Individual7Lineup, Lineup, Millis, PairSide, PairsLineup,
    PlayTime, Player, PlayerStatus, Role, RotationEvent, RotationEventKind, Slot, SquadFormat,
};

// Re-export state management
pub use state::{get_state, get_state_mut, reset_state, set_state, update_state, MATCH_STATE};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const STATE_SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    fn seven_a_side() -> MatchState {
        let players = vec![
            Player::new("keeper", "Kim", Role::Goalie),
            Player::new("ld", "Lena", Role::Defender),
            Player::new("rd", "Ravi", Role::Defender),
            Player::new("mid", "Mona", Role::Midfielder),
            Player::new("att", "Ash", Role::Attacker),
            Player::new("s1", "Sam", Role::Substitute),
            Player::new("s2", "Sol", Role::Substitute),
        ];
        let lineup = Lineup::Individual7(Individual7Lineup {
            goalie: "keeper".into(),
            left_defender: "ld".into(),
            right_defender: "rd".into(),
            midfielder: "mid".into(),
            attacker: "att".into(),
            substitute_1: Some("s1".into()),
            substitute_2: Some("s2".into()),
        });
        MatchState::new(lineup, players, 0)
    }

    #[test]
    fn test_full_period_flow() {
        let state = seven_a_side();

        let state = state.substitute(60_000).unwrap();
        assert_eq!(state.highlighted(), ["s1".to_string(), "ld".to_string()]);

        let state = state.switch_positions("mid", "att", 120_000).unwrap();
        let state = state.set_paused(true, 180_000);
        let state = state.set_paused(false, 240_000);
        let state = state.substitute(300_000).unwrap();
        let state = state.undo_substitution(330_000).unwrap();
        let done = state.end_period(360_000);

        // 180s before the pause plus 120s after: everyone accounts for 300s.
        for player in done.players() {
            let time = &player.time;
            let total = time.defender_secs
                + time.midfielder_secs
                + time.attacker_secs
                + time.goalie_secs
                + time.substitute_secs;
            assert_eq!(total, 300, "clock drifted for {}", player.id);
            assert_eq!(time.stint_started_at, None);
        }

        let report = done.time_report(360_000);
        assert_eq!(report.rows.len(), 7);
        assert!(report.paused);
    }

    #[test]
    fn test_match_state_serde_round_trip() {
        let state = seven_a_side().substitute(60_000).unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["lineup"]["format"], "individual7");
        assert_eq!(parsed["paused"], false);
        assert_eq!(parsed["events"][0]["type"], "substitution");

        let restored: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
        assert!(restored.can_undo());
    }

    #[test]
    fn test_queue_survives_persistence_mid_match() {
        let state = seven_a_side();
        let state = state.substitute(60_000).unwrap();
        let state = state.toggle_inactive("s2", 90_000).unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let restored: MatchState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.queue(), state.queue());
        assert_eq!(restored.queue().inactive(), ["s2".to_string()]);
        assert_eq!(
            restored.next_off(),
            Some(NextOff::Queue { next: "rd".to_string(), next_next: Some("mid".to_string()) })
        );
    }
}
