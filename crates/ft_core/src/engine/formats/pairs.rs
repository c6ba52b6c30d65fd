//! Pairs-7: the pair named by `next_pair_out` swaps with the bench pair.

use super::{player_mut, SubOutcome};
use crate::engine::queue::RotationQueue;
use crate::error::{Result, RotationError};
use crate::models::player::{Millis, Player, Role};
use crate::models::squad::{PairSide, PairsLineup};

/// Swaps one field pair with the bench pair, alternating strictly
/// left-right-left. Both incoming players inherit the role of the slot they
/// now occupy; both outgoing players become substitutes and rotate to the
/// end of the queue.
pub(crate) fn substitute(
    lineup: &mut PairsLineup,
    players: &mut [Player],
    queue: &mut RotationQueue,
    now: Millis,
    paused: bool,
) -> Result<SubOutcome> {
    let incoming = lineup.bench.clone().ok_or(RotationError::EmptyBench)?;
    let side = lineup.next_pair_out;
    let outgoing = match side {
        PairSide::Left => lineup.left.clone(),
        PairSide::Right => lineup.right.clone(),
    };

    match side {
        PairSide::Left => lineup.left = incoming.clone(),
        PairSide::Right => lineup.right = incoming.clone(),
    }
    lineup.bench = Some(outgoing.clone());
    lineup.next_pair_out = side.other();

    player_mut(players, &incoming.defender)?.change_role(Role::Defender, now, paused);
    player_mut(players, &incoming.attacker)?.change_role(Role::Attacker, now, paused);
    player_mut(players, &outgoing.defender)?.change_role(Role::Substitute, now, paused);
    player_mut(players, &outgoing.attacker)?.change_role(Role::Substitute, now, paused);

    queue.rotate_to_end(&outgoing.defender);
    queue.rotate_to_end(&outgoing.attacker);

    Ok(SubOutcome {
        came_on: vec![incoming.defender, incoming.attacker],
        went_off: vec![outgoing.defender, outgoing.attacker],
    })
}
