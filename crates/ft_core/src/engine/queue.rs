//! Rotation queue: the priority order in which active players leave the field.
//!
//! The queue owns two disjoint ordered lists. The active list is the
//! substitution order; the inactive list holds bench players excluded from
//! rotation. Goalies are never members. Every operation on an id the queue
//! does not hold is a silent no-op.

use serde::{Deserialize, Serialize};

use crate::models::player::Player;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RotationQueue {
    active: Vec<String>,
    inactive: Vec<String>,
}

impl RotationQueue {
    pub fn new(active: Vec<String>, inactive: Vec<String>) -> Self {
        Self { active, inactive }
    }

    /// Partitions the roster into active/inactive buckets by each player's
    /// inactive flag, preserving roster order. The goalie never enters.
    pub fn from_roster(players: &[Player], goalie_id: &str) -> Self {
        let mut active = Vec::new();
        let mut inactive = Vec::new();
        for player in players {
            if player.id == goalie_id {
                continue;
            }
            if player.inactive {
                inactive.push(player.id.clone());
            } else {
                active.push(player.id.clone());
            }
        }
        Self { active, inactive }
    }

    pub fn active(&self) -> &[String] {
        &self.active
    }

    pub fn inactive(&self) -> &[String] {
        &self.inactive
    }

    /// First `n` active ids in priority order, fewer if the list is shorter.
    pub fn next_active(&self, n: usize) -> &[String] {
        &self.active[..n.min(self.active.len())]
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|member| member == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.is_active(id) || self.inactive.iter().any(|member| member == id)
    }

    /// Moves `id` to the back of the active list. Ignored when `id` is not
    /// active, so an inactive player can never be rotated toward the front.
    pub fn rotate_to_end(&mut self, id: &str) {
        if let Some(index) = self.active.iter().position(|member| member == id) {
            let member = self.active.remove(index);
            self.active.push(member);
        }
    }

    /// Active -> end of the inactive list. Idempotent.
    pub fn deactivate(&mut self, id: &str) {
        if let Some(index) = self.active.iter().position(|member| member == id) {
            let member = self.active.remove(index);
            self.inactive.push(member);
        }
    }

    /// Inactive -> end of the active list. A reactivated player must never
    /// jump ahead of players already on the field.
    pub fn reactivate(&mut self, id: &str) {
        if let Some(index) = self.inactive.iter().position(|member| member == id) {
            let member = self.inactive.remove(index);
            self.active.push(member);
        }
    }

    /// Manual override: place `id` immediately before `target` in the active
    /// list. No-op unless both are active.
    pub fn insert_before(&mut self, id: &str, target: &str) {
        if id == target || !self.is_active(id) || !self.is_active(target) {
            return;
        }
        if let Some(index) = self.active.iter().position(|member| member == id) {
            let member = self.active.remove(index);
            let target_index =
                self.active.iter().position(|member| member == target).unwrap_or(index);
            self.active.insert(target_index, member);
        }
    }

    /// Manual override: make `id` the next to go off. No-op unless active.
    pub fn move_to_front(&mut self, id: &str) {
        if let Some(index) = self.active.iter().position(|member| member == id) {
            let member = self.active.remove(index);
            self.active.insert(0, member);
        }
    }

    /// Drops `id` from whichever list holds it (goalie promotion).
    pub fn remove(&mut self, id: &str) {
        self.active.retain(|member| member != id);
        self.inactive.retain(|member| member != id);
    }

    /// Appends `id` to the end of the active list unless already a member of
    /// either list (outgoing goalie re-entering rotation).
    pub fn append_active(&mut self, id: &str) {
        if !self.contains(id) {
            self.active.push(id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Role;

    fn queue_of(active: &[&str], inactive: &[&str]) -> RotationQueue {
        RotationQueue::new(
            active.iter().map(|id| id.to_string()).collect(),
            inactive.iter().map(|id| id.to_string()).collect(),
        )
    }

    #[test]
    fn test_from_roster_partitions_by_inactive_flag() {
        let mut players = vec![
            Player::new("g", "Keeper", Role::Goalie),
            Player::new("a", "A", Role::Defender),
            Player::new("b", "B", Role::Attacker),
            Player::new("c", "C", Role::Substitute),
        ];
        players[3].inactive = true;

        let queue = RotationQueue::from_roster(&players, "g");

        assert_eq!(queue.active(), ["a".to_string(), "b".to_string()]);
        assert_eq!(queue.inactive(), ["c".to_string()]);
        assert!(!queue.contains("g"));
    }

    #[test]
    fn test_next_active_returns_fewer_when_short() {
        let queue = queue_of(&["a", "b"], &[]);
        assert_eq!(queue.next_active(1), ["a".to_string()]);
        assert_eq!(queue.next_active(5).len(), 2);
    }

    #[test]
    fn test_rotate_to_end_moves_member_to_back() {
        let mut queue = queue_of(&["a", "b", "c"], &[]);
        queue.rotate_to_end("a");
        assert_eq!(queue.active(), ["b".to_string(), "c".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_rotate_to_end_ignores_inactive_and_unknown() {
        let mut queue = queue_of(&["a", "b"], &["d"]);
        queue.rotate_to_end("d");
        queue.rotate_to_end("zz");
        assert_eq!(queue.active(), ["a".to_string(), "b".to_string()]);
        assert_eq!(queue.inactive(), ["d".to_string()]);
    }

    #[test]
    fn test_reactivated_player_joins_at_the_end() {
        let mut queue = queue_of(&["a", "b", "c"], &[]);
        queue.deactivate("a");
        queue.reactivate("a");

        // A reactivated player must never become the next to go off.
        assert_eq!(
            queue.active(),
            ["b".to_string(), "c".to_string(), "a".to_string()]
        );
        assert!(queue.inactive().is_empty());
    }

    #[test]
    fn test_deactivate_twice_same_as_once() {
        let mut queue = queue_of(&["a", "b"], &[]);
        queue.deactivate("a");
        let once = queue.clone();
        queue.deactivate("a");
        assert_eq!(queue, once);
    }

    #[test]
    fn test_rotate_twice_matches_single_rotate_of_same_member() {
        let mut queue = queue_of(&["a", "b", "c"], &[]);
        queue.rotate_to_end("b");
        let once = queue.clone();
        queue.rotate_to_end("b");
        assert_eq!(queue, once);
    }

    #[test]
    fn test_insert_before_reorders_active_members() {
        let mut queue = queue_of(&["a", "b", "c", "d"], &[]);
        queue.insert_before("d", "b");
        assert_eq!(
            queue.active(),
            ["a".to_string(), "d".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_insert_before_noop_for_unknown_or_inactive_parties() {
        let mut queue = queue_of(&["a", "b"], &["c"]);
        let before = queue.clone();
        queue.insert_before("c", "a");
        queue.insert_before("a", "zz");
        queue.insert_before("a", "a");
        assert_eq!(queue, before);
    }

    #[test]
    fn test_move_to_front() {
        let mut queue = queue_of(&["a", "b", "c"], &[]);
        queue.move_to_front("c");
        assert_eq!(
            queue.active(),
            ["c".to_string(), "a".to_string(), "b".to_string()]
        );
        queue.move_to_front("zz");
        assert_eq!(queue.active().len(), 3);
    }

    #[test]
    fn test_remove_and_append_active_for_goalie_swap() {
        let mut queue = queue_of(&["a", "b"], &["c"]);
        queue.remove("b");
        assert!(!queue.contains("b"));

        queue.append_active("g_old");
        assert_eq!(queue.active(), ["a".to_string(), "g_old".to_string()]);

        // Appending an existing member leaves the order alone.
        queue.append_active("a");
        assert_eq!(queue.active(), ["a".to_string(), "g_old".to_string()]);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const IDS: [&str; 6] = ["p1", "p2", "p3", "p4", "p5", "ghost"];

        fn seed_queue() -> RotationQueue {
            queue_of(&["p1", "p2", "p3", "p4"], &["p5"])
        }

        proptest! {
            /// Property: active ∪ inactive stays exactly the seeded roster,
            /// with no duplicates, after any operation sequence. Unknown ids
            /// ("ghost") must never slip in.
            #[test]
            fn prop_queue_membership_closed(
                ops in proptest::collection::vec((0u8..5, 0usize..6, 0usize..6), 0..40)
            ) {
                let mut queue = seed_queue();
                for (op, first, second) in ops {
                    let id = IDS[first];
                    let target = IDS[second];
                    match op {
                        0 => queue.rotate_to_end(id),
                        1 => queue.deactivate(id),
                        2 => queue.reactivate(id),
                        3 => queue.insert_before(id, target),
                        _ => queue.move_to_front(id),
                    }

                    let mut members: Vec<&str> = queue
                        .active()
                        .iter()
                        .chain(queue.inactive().iter())
                        .map(String::as_str)
                        .collect();
                    members.sort_unstable();
                    prop_assert_eq!(members, vec!["p1", "p2", "p3", "p4", "p5"]);
                }
            }

            /// Property: rotate_to_end and deactivate are idempotent.
            #[test]
            fn prop_repeat_rotate_and_deactivate_idempotent(pick in 0usize..5) {
                let id = IDS[pick];
                let mut queue = seed_queue();
                queue.rotate_to_end(id);
                let once = queue.clone();
                queue.rotate_to_end(id);
                prop_assert_eq!(&queue, &once);

                let mut queue = seed_queue();
                queue.deactivate(id);
                let once = queue.clone();
                queue.deactivate(id);
                prop_assert_eq!(&queue, &once);
            }
        }
    }
}
