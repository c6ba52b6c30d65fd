//! Global match-state slot.
//!
//! The engine itself is pure; this module is the single place a running
//! match lives between transition calls. The host drives it through
//! [`update_state`], which applies one transition at a time and stores the
//! result, keeping the prior state whenever a transition is rejected.

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

use crate::engine::MatchState;
use crate::error::{Result, RotationError};

/// The active match, if one is running.
pub static MATCH_STATE: Lazy<Arc<RwLock<Option<MatchState>>>> =
    Lazy::new(|| Arc::new(RwLock::new(None)));

/// Get a read lock on the match slot.
pub fn get_state() -> std::sync::RwLockReadGuard<'static, Option<MatchState>> {
    MATCH_STATE.read().expect("MATCH_STATE lock poisoned")
}

/// Get a write lock on the match slot.
pub fn get_state_mut() -> std::sync::RwLockWriteGuard<'static, Option<MatchState>> {
    MATCH_STATE.write().expect("MATCH_STATE lock poisoned")
}

/// Install a freshly built state, replacing any running match.
pub fn set_state(state: MatchState) {
    *MATCH_STATE.write().expect("MATCH_STATE lock poisoned") = Some(state);
}

/// Clear the slot once a period is over and its stats are collected.
pub fn reset_state() {
    *MATCH_STATE.write().expect("MATCH_STATE lock poisoned") = None;
}

/// Applies one transition to the running match and stores the result.
///
/// The slot is locked for the whole call, so transitions are serialized.
/// On `Err` the stored state is untouched and the error is handed back for
/// the host to surface as a no-op.
pub fn update_state<F>(transition: F) -> Result<()>
where
    F: FnOnce(&MatchState) -> Result<MatchState>,
{
    let mut slot = MATCH_STATE.write().expect("MATCH_STATE lock poisoned");
    let current = match slot.as_ref() {
        Some(state) => state,
        None => {
            log::warn!("transition requested with no match in progress");
            return Err(RotationError::NoMatchInProgress);
        }
    };
    *slot = Some(transition(current)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Player, Role};
    use crate::models::squad::{Individual6Lineup, Lineup, Slot};

    fn fixture() -> MatchState {
        let players = vec![
            Player::new("g", "Keeper", Role::Goalie),
            Player::new("a", "A", Role::Defender),
            Player::new("b", "B", Role::Defender),
            Player::new("c", "C", Role::Midfielder),
            Player::new("d", "D", Role::Attacker),
            Player::new("e", "E", Role::Substitute),
        ];
        let lineup = Lineup::Individual6(Individual6Lineup {
            goalie: "g".into(),
            left_defender: "a".into(),
            right_defender: "b".into(),
            midfielder: "c".into(),
            attacker: "d".into(),
            substitute: Some("e".into()),
        });
        MatchState::new(lineup, players, 0)
    }

    // One test function so all access to the shared slot stays on a single
    // thread; cargo runs tests in parallel otherwise.
    #[test]
    fn test_slot_lifecycle() {
        reset_state();
        let missing = update_state(|state| state.substitute(1_000));
        assert_eq!(missing.unwrap_err(), RotationError::NoMatchInProgress);

        set_state(fixture());
        assert!(get_state().is_some());

        update_state(|state| state.substitute(10_000)).unwrap();
        {
            let slot = get_state();
            let state = slot.as_ref().unwrap();
            assert_eq!(state.lineup().occupant(Slot::SubstituteOne), Some("a"));
            assert!(state.can_undo());
        }

        // A rejected transition leaves the stored state untouched.
        let before = get_state().clone();
        let rejected = update_state(|state| state.switch_positions("a", "a", 20_000));
        assert_eq!(rejected.unwrap_err(), RotationError::SamePlayer);
        assert_eq!(get_state().clone(), before);

        reset_state();
        assert!(get_state().is_none());
    }
}
