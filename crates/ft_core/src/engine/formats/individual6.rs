//! Individual-6: the queue front swaps with the single bench slot.

use super::{apply_individual_roles, next_off_field, SubOutcome};
use crate::engine::queue::RotationQueue;
use crate::error::{Result, RotationError};
use crate::models::player::{Millis, Player};
use crate::models::squad::Individual6Lineup;

/// Brings the bench occupant on for the first field player in the queue.
/// The incoming player's role is derived from the vacated slot; the outgoing
/// player rotates to the end of the queue.
pub(crate) fn substitute(
    lineup: &mut Individual6Lineup,
    players: &mut [Player],
    queue: &mut RotationQueue,
    now: Millis,
    paused: bool,
) -> Result<SubOutcome> {
    let comer = lineup.substitute.clone().ok_or(RotationError::EmptyBench)?;
    let (out_id, out_slot) = next_off_field(queue, |id| lineup.slot_of(id))?;

    lineup.set_occupant(out_slot, comer.clone());
    lineup.substitute = Some(out_id.clone());

    apply_individual_roles(players, &comer, &out_id, out_slot, now, paused)?;
    queue.rotate_to_end(&out_id);

    Ok(SubOutcome { came_on: vec![comer], went_off: vec![out_id] })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Role;

    fn roster() -> Vec<Player> {
        let mut players = vec![
            Player::new("g", "Keeper", Role::Goalie),
            Player::new("a", "A", Role::Defender),
            Player::new("b", "B", Role::Defender),
            Player::new("c", "C", Role::Midfielder),
            Player::new("d", "D", Role::Attacker),
            Player::new("e", "E", Role::Substitute),
        ];
        for player in &mut players {
            player.time.stint_started_at = Some(0);
        }
        players
    }

    fn lineup() -> Individual6Lineup {
        Individual6Lineup {
            goalie: "g".into(),
            left_defender: "a".into(),
            right_defender: "b".into(),
            midfielder: "c".into(),
            attacker: "d".into(),
            substitute: Some("e".into()),
        }
    }

    #[test]
    fn test_front_of_queue_swaps_with_bench() {
        let mut lineup = lineup();
        let mut players = roster();
        let mut queue = RotationQueue::from_roster(&players, "g");

        let outcome = substitute(&mut lineup, &mut players, &mut queue, 30_000, false).unwrap();

        assert_eq!(lineup.left_defender, "e");
        assert_eq!(lineup.substitute.as_deref(), Some("a"));
        assert_eq!(outcome.came_on, vec!["e".to_string()]);
        assert_eq!(outcome.went_off, vec!["a".to_string()]);
        assert_eq!(
            queue.active(),
            ["b".to_string(), "c".to_string(), "d".to_string(), "e".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_role_comes_from_vacated_slot() {
        let mut lineup = lineup();
        let mut players = roster();
        let mut queue = RotationQueue::from_roster(&players, "g");
        queue.move_to_front("c");

        substitute(&mut lineup, &mut players, &mut queue, 30_000, false).unwrap();

        assert_eq!(lineup.midfielder, "e");
        let comer = players.iter().find(|p| p.id == "e").unwrap();
        assert_eq!(comer.role, Role::Midfielder);
        let out = players.iter().find(|p| p.id == "c").unwrap();
        assert_eq!(out.role, Role::Substitute);
    }

    #[test]
    fn test_full_rotation_cycle_restores_queue_order() {
        let mut lineup = lineup();
        let mut players = roster();
        let mut queue = RotationQueue::from_roster(&players, "g");

        for step in 0..5u64 {
            substitute(&mut lineup, &mut players, &mut queue, (step + 1) * 10_000, false)
                .unwrap();
        }

        // After five swaps everyone has taken one turn on the bench and the
        // queue is back in its opening order.
        assert_eq!(lineup.substitute.as_deref(), Some("e"));
        assert_eq!(
            queue.active(),
            ["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string(), "e".to_string()]
        );
        assert_eq!(lineup.left_defender, "d");
        assert_eq!(lineup.right_defender, "a");
        assert_eq!(lineup.midfielder, "b");
        assert_eq!(lineup.attacker, "c");
    }

    #[test]
    fn test_bench_occupant_at_front_is_skipped() {
        let mut lineup = lineup();
        let mut players = roster();
        let mut queue = RotationQueue::from_roster(&players, "g");
        queue.move_to_front("e");

        let outcome = substitute(&mut lineup, &mut players, &mut queue, 30_000, false).unwrap();

        assert_eq!(outcome.went_off, vec!["a".to_string()]);
        assert_eq!(lineup.substitute.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_bench_is_rejected() {
        let mut lineup = lineup();
        lineup.substitute = None;
        let mut players = roster();
        let mut queue = RotationQueue::from_roster(&players, "g");

        let err = substitute(&mut lineup, &mut players, &mut queue, 30_000, false).unwrap_err();
        assert_eq!(err, RotationError::EmptyBench);
    }
}
