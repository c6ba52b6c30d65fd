//! Individual-7: two bench slots, and only slot 1 feeds the field.
//!
//! Slot 2 is a cooling position. The normal shuffle is slot 2 → slot 1 and
//! outgoing player → slot 2; when slot 1 holds an inactive player, slot 2's
//! occupant is promoted for this call and the outgoing player lands in
//! slot 1 instead, leaving the inactive player to cool in slot 2.

use super::{apply_individual_roles, next_off_field, occupant_live, SubOutcome};
use crate::engine::queue::RotationQueue;
use crate::error::{Result, RotationError};
use crate::models::player::{Millis, Player};
use crate::models::squad::Individual7Lineup;

pub(crate) fn substitute(
    lineup: &mut Individual7Lineup,
    players: &mut [Player],
    queue: &mut RotationQueue,
    now: Millis,
    paused: bool,
) -> Result<SubOutcome> {
    let first_live = occupant_live(players, &lineup.substitute_1);
    let second_live = occupant_live(players, &lineup.substitute_2);

    let (comer, from_first) = match (&lineup.substitute_1, &lineup.substitute_2) {
        (Some(id), _) if first_live => (id.clone(), true),
        (_, Some(id)) if second_live => (id.clone(), false),
        (None, None) => return Err(RotationError::EmptyBench),
        (Some(id), _) | (None, Some(id)) => {
            return Err(RotationError::Invariant(format!(
                "incoming substitute {id} is inactive"
            )));
        }
    };

    let (out_id, out_slot) = next_off_field(queue, |id| lineup.slot_of(id))?;

    lineup.set_occupant(out_slot, comer.clone());
    if from_first {
        lineup.substitute_1 = lineup.substitute_2.take();
        if lineup.substitute_1.is_some() {
            lineup.substitute_2 = Some(out_id.clone());
        } else {
            // Lone substitute: the outgoing player is straight back to next-on.
            lineup.substitute_1 = Some(out_id.clone());
        }
    } else {
        lineup.substitute_2 = lineup.substitute_1.take();
        lineup.substitute_1 = Some(out_id.clone());
    }

    apply_individual_roles(players, &comer, &out_id, out_slot, now, paused)?;
    queue.rotate_to_end(&out_id);

    Ok(SubOutcome { came_on: vec![comer], went_off: vec![out_id] })
}

/// Restores the slot ordering rule after an activation toggle: slot 1 must
/// hold a live substitute whenever the bench has one.
pub(crate) fn normalize_bench(lineup: &mut Individual7Lineup, players: &[Player]) {
    let first_live = occupant_live(players, &lineup.substitute_1);
    let second_live = occupant_live(players, &lineup.substitute_2);
    let should_swap = match (&lineup.substitute_1, &lineup.substitute_2) {
        (None, Some(_)) => true,
        (Some(_), Some(_)) => !first_live && second_live,
        _ => false,
    };
    if should_swap {
        std::mem::swap(&mut lineup.substitute_1, &mut lineup.substitute_2);
    }
}
