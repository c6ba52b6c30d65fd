//! Per-format substitution algorithms.
//!
//! Each strategy takes the concrete lineup, the roster, and the rotation
//! queue, and applies one substitution in place, reporting who moved. The
//! caller hands in a scratch copy of the state: on `Err` the copy is
//! discarded, so a partially applied substitution can never escape.

pub mod individual6;
pub mod individual7;
pub mod pairs;

use crate::engine::queue::RotationQueue;
use crate::error::{Result, RotationError};
use crate::models::player::{Millis, Player, Role};
use crate::models::squad::Slot;

/// Players that moved during one substitution, in the order they moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubOutcome {
    pub came_on: Vec<String>,
    pub went_off: Vec<String>,
}

/// Roster lookup. A lineup id that fails to resolve is corrupted state, not
/// caller input, hence the invariant error.
pub(crate) fn player_mut<'a>(players: &'a mut [Player], id: &str) -> Result<&'a mut Player> {
    players
        .iter_mut()
        .find(|player| player.id == id)
        .ok_or_else(|| RotationError::Invariant(format!("lineup references unknown player {id}")))
}

pub(crate) fn player_ref<'a>(players: &'a [Player], id: &str) -> Result<&'a Player> {
    players
        .iter()
        .find(|player| player.id == id)
        .ok_or_else(|| RotationError::Invariant(format!("lineup references unknown player {id}")))
}

/// Whether a bench slot currently holds a live (non-inactive) substitute.
pub(crate) fn occupant_live(players: &[Player], occupant: &Option<String>) -> bool {
    occupant
        .as_ref()
        .and_then(|id| players.iter().find(|player| player.id == *id))
        .map(|player| !player.inactive)
        .unwrap_or(false)
}

/// First queue entry currently occupying a field slot, with that slot.
///
/// The front of the queue is normally a field player; a manual reorder can
/// park a bench occupant in front, in which case it is skipped rather than
/// swapped with itself.
pub(crate) fn next_off_field(
    queue: &RotationQueue,
    slot_of: impl Fn(&str) -> Option<Slot>,
) -> Result<(String, Slot)> {
    for id in queue.active() {
        if let Some(slot) = slot_of(id) {
            if slot.is_field() {
                return Ok((id.clone(), slot));
            }
        }
    }
    Err(RotationError::Invariant("no field player in the rotation queue".to_string()))
}

/// Applies the slot's role to both movers of an individual swap.
pub(crate) fn apply_individual_roles(
    players: &mut [Player],
    comer: &str,
    out_id: &str,
    out_slot: Slot,
    now: Millis,
    paused: bool,
) -> Result<()> {
    player_mut(players, comer)?.change_role(out_slot.role(), now, paused);
    player_mut(players, out_id)?.change_role(Role::Substitute, now, paused);
    Ok(())
}
