//! Match-state transitions.
//!
//! Every transition borrows the current state, applies the change to a
//! scratch clone, and returns the clone; on `Err` the caller keeps the
//! original, so a half-applied change can never escape. The driver decides
//! what to do with each result, typically storing it back through
//! [`crate::state`].

use std::mem;

use serde::{Deserialize, Serialize};

use crate::engine::formats::{self, SubOutcome};
use crate::engine::queue::RotationQueue;
use crate::error::{Result, RotationError};
use crate::models::events::RotationEvent;
use crate::models::player::{Millis, Player, Role};
use crate::models::squad::{Lineup, PairSide, Slot, SquadFormat};

/// Full engine state for one period of play.
///
/// Constructed once per period from the host's roster configuration and
/// then advanced only through the transition methods below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchState {
    pub(crate) lineup: Lineup,
    pub(crate) players: Vec<Player>,
    pub(crate) queue: RotationQueue,
    #[serde(default)]
    pub(crate) paused: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) paused_at: Option<Millis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) last_substitution: Option<SubstitutionRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) highlighted: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) events: Vec<RotationEvent>,
}

/// Snapshot taken right before a substitution so it can be rolled back.
///
/// `players` holds pre-call copies of the movers only; everyone else is
/// left alone by the undo path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubstitutionRecord {
    pub lineup: Lineup,
    pub queue: RotationQueue,
    pub players: Vec<Player>,
    pub went_off: Vec<String>,
    pub came_on: Vec<String>,
    pub at: Millis,
}

/// Who is due to come off next, derived on demand from the current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextOff {
    Pair { side: PairSide, defender: String, attacker: String },
    Queue { next: String, next_next: Option<String> },
}

impl MatchState {
    /// Builds the state for a fresh period.
    ///
    /// Roles are derived from the slot each player occupies, every stint
    /// clock starts at `now`, and the rotation queue is seeded from the
    /// roster in its given order, goalie excluded.
    pub fn new(lineup: Lineup, mut players: Vec<Player>, now: Millis) -> MatchState {
        for player in &mut players {
            if let Some(slot) = lineup.slot_of(&player.id) {
                player.role = slot.role();
            }
            player.time.stint_started_at = Some(now);
        }
        let queue = RotationQueue::from_roster(&players, lineup.goalie());
        MatchState {
            lineup,
            players,
            queue,
            paused: false,
            paused_at: None,
            last_substitution: None,
            highlighted: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn format(&self) -> SquadFormat {
        self.lineup.format()
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn inactive_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|player| player.inactive).collect()
    }

    pub fn queue(&self) -> &RotationQueue {
        &self.queue
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn can_undo(&self) -> bool {
        self.last_substitution.is_some()
    }

    pub fn events(&self) -> &[RotationEvent] {
        &self.events
    }

    /// Ids that moved in the most recent substitution-like transition, for
    /// the host to call out visually.
    pub fn highlighted(&self) -> &[String] {
        &self.highlighted
    }

    /// The next player or pair due off, or `None` when nobody on the field
    /// is queue-eligible.
    pub fn next_off(&self) -> Option<NextOff> {
        match &self.lineup {
            Lineup::Pairs7(lineup) => {
                let pair = match lineup.next_pair_out {
                    PairSide::Left => &lineup.left,
                    PairSide::Right => &lineup.right,
                };
                Some(NextOff::Pair {
                    side: lineup.next_pair_out,
                    defender: pair.defender.clone(),
                    attacker: pair.attacker.clone(),
                })
            }
            _ => {
                let mut due = self.queue.active().iter().filter(|id| {
                    self.lineup
                        .slot_of(id)
                        .map(|slot| slot.is_field())
                        .unwrap_or(false)
                });
                let next = due.next()?.clone();
                let next_next = due.next().cloned();
                Some(NextOff::Queue { next, next_next })
            }
        }
    }

    /// Credits every running stint up to `now`. While paused this is a
    /// no-op, so the driver may keep ticking unconditionally.
    pub fn tick(&self, now: Millis) -> MatchState {
        let mut next = self.clone();
        let paused = next.paused;
        for player in &mut next.players {
            player.accrue(now, paused);
        }
        next
    }

    /// Pauses or resumes the match clock. Pausing settles every stint up to
    /// `now` first; resuming restarts every stint at `now` so the paused
    /// interval is attributed to nobody. Repeated calls in the same
    /// direction change nothing.
    pub fn set_paused(&self, paused: bool, now: Millis) -> MatchState {
        if paused == self.paused {
            return self.clone();
        }
        let mut next = self.clone();
        if paused {
            for player in &mut next.players {
                player.accrue(now, false);
            }
            next.paused = true;
            next.paused_at = Some(now);
            next.events.push(RotationEvent::paused(now));
        } else {
            next.paused = false;
            next.paused_at = None;
            for player in &mut next.players {
                player.time.stint_started_at = Some(now);
            }
            next.events.push(RotationEvent::resumed(now));
        }
        next
    }

    /// Finalizes the period: settles all stints, stops every clock, and
    /// drops the undo record. The host builds a fresh state for the next
    /// period; this one is only read for statistics afterwards.
    pub fn end_period(&self, now: Millis) -> MatchState {
        let mut next = self.tick(now);
        for player in &mut next.players {
            player.time.stint_started_at = None;
        }
        next.paused = true;
        next.paused_at = Some(now);
        next.last_substitution = None;
        next.highlighted.clear();
        next.events.push(RotationEvent::period_end(now));
        next
    }

    /// Performs one substitution according to the active format and stamps
    /// a record so it can be undone.
    pub fn substitute(&self, now: Millis) -> Result<MatchState> {
        self.substitute_inner(now).map_err(logged)
    }

    /// Swaps the slots (and therefore roles) of two field players.
    pub fn switch_positions(&self, first: &str, second: &str, now: Millis) -> Result<MatchState> {
        self.switch_positions_inner(first, second, now).map_err(logged)
    }

    /// Promotes `incoming` to goalie; the old goalie takes over the slot
    /// `incoming` vacated and joins the end of the rotation queue.
    pub fn switch_goalie(&self, incoming: &str, now: Millis) -> Result<MatchState> {
        self.switch_goalie_inner(incoming, now).map_err(logged)
    }

    /// Rolls back the most recent substitution. Single level only: the
    /// record is consumed, and there is no redo.
    pub fn undo_substitution(&self, now: Millis) -> Result<MatchState> {
        self.undo_inner(now).map_err(logged)
    }

    /// Marks a bench player unavailable for rotation, or brings them back.
    /// Individual-7 only.
    pub fn toggle_inactive(&self, id: &str, now: Millis) -> Result<MatchState> {
        self.toggle_inactive_inner(id, now).map_err(logged)
    }

    /// Manually exchanges the two bench slots. Individual-7 only.
    pub fn swap_bench_slots(&self, first: &str, second: &str, now: Millis) -> Result<MatchState> {
        self.swap_bench_slots_inner(first, second, now).map_err(logged)
    }

    /// Manual override: makes `id` the next field player due off.
    /// Individual formats only; the pairs rotation is driven by its
    /// alternating pointer.
    pub fn set_next_off(&self, id: &str, now: Millis) -> Result<MatchState> {
        self.set_next_off_inner(id, now).map_err(logged)
    }

    /// Manual override: reorders the rotation so `id` comes up for
    /// substitution just ahead of `target`. Individual formats only.
    pub fn queue_ahead_of(&self, id: &str, target: &str, now: Millis) -> Result<MatchState> {
        self.queue_ahead_of_inner(id, target, now).map_err(logged)
    }

    fn substitute_inner(&self, now: Millis) -> Result<MatchState> {
        let mut next = self.clone();
        let paused = self.paused;
        let outcome = match &mut next.lineup {
            Lineup::Pairs7(lineup) => {
                formats::pairs::substitute(lineup, &mut next.players, &mut next.queue, now, paused)?
            }
            Lineup::Individual6(lineup) => formats::individual6::substitute(
                lineup,
                &mut next.players,
                &mut next.queue,
                now,
                paused,
            )?,
            Lineup::Individual7(lineup) => formats::individual7::substitute(
                lineup,
                &mut next.players,
                &mut next.queue,
                now,
                paused,
            )?,
        };

        next.last_substitution = Some(self.record_of(&outcome, now));
        next.highlighted = outcome
            .came_on
            .iter()
            .chain(outcome.went_off.iter())
            .cloned()
            .collect();
        next.events
            .push(RotationEvent::substitution(now, outcome.came_on, outcome.went_off));
        Ok(next)
    }

    fn switch_positions_inner(&self, first: &str, second: &str, now: Millis) -> Result<MatchState> {
        if first == second {
            return Err(RotationError::SamePlayer);
        }
        self.roster(first)?;
        self.roster(second)?;
        let slot_a = self.swappable_slot(first)?;
        let slot_b = self.swappable_slot(second)?;

        let mut next = self.clone();
        next.lineup.set_occupant(slot_a, second.to_string());
        next.lineup.set_occupant(slot_b, first.to_string());
        formats::player_mut(&mut next.players, first)?.change_role(slot_b.role(), now, self.paused);
        formats::player_mut(&mut next.players, second)?.change_role(slot_a.role(), now, self.paused);
        next.highlighted = vec![first.to_string(), second.to_string()];
        next.events
            .push(RotationEvent::position_switch(now, first.to_string(), second.to_string()));
        Ok(next)
    }

    fn switch_goalie_inner(&self, incoming: &str, now: Millis) -> Result<MatchState> {
        let player = self.roster(incoming)?;
        if self.lineup.goalie() == incoming {
            return Err(RotationError::AlreadyGoalie { id: incoming.to_string() });
        }
        if player.inactive {
            return Err(RotationError::PlayerInactive { id: incoming.to_string() });
        }
        let vacated = self.lineup.slot_of(incoming).ok_or_else(|| {
            RotationError::Invariant(format!("player {incoming} holds no slot in the lineup"))
        })?;
        let old_goalie = self.lineup.goalie().to_string();

        let mut next = self.clone();
        next.lineup.set_occupant(Slot::Goalie, incoming.to_string());
        next.lineup.set_occupant(vacated, old_goalie.clone());
        formats::player_mut(&mut next.players, incoming)?.change_role(Role::Goalie, now, self.paused);
        formats::player_mut(&mut next.players, &old_goalie)?.change_role(
            vacated.role(),
            now,
            self.paused,
        );
        next.queue.remove(incoming);
        next.queue.append_active(&old_goalie);
        next.highlighted = vec![incoming.to_string(), old_goalie.clone()];
        next.events
            .push(RotationEvent::goalie_switch(now, incoming.to_string(), old_goalie));
        Ok(next)
    }

    fn undo_inner(&self, now: Millis) -> Result<MatchState> {
        let record = self.last_substitution.as_ref().ok_or(RotationError::NothingToUndo)?;

        // Nothing accrues past the pause instant, so any credit granted
        // here has to stop there as well.
        let settle_at = if self.paused {
            self.paused_at.map(|at| at.min(now))
        } else {
            Some(now)
        };

        let mut next = self.clone();
        next.lineup = record.lineup.clone();
        next.queue = record.queue.clone();
        for snapshot in &record.players {
            let live = formats::player_mut(&mut next.players, &snapshot.id)?;
            *live = snapshot.clone();
            // Settling from the restored stint start credits the outgoing
            // players' bench interval as if they had stayed on in their old
            // role. Incoming players keep their restored stats untouched,
            // except under pause: the resume re-stamp would wipe their stint
            // anchor, so their span up to the pause is banked now, in the
            // role they re-entered with.
            if record.went_off.contains(&snapshot.id) || self.paused {
                if let Some(at) = settle_at {
                    live.accrue(at, false);
                }
            }
        }

        // A switch made after the recorded substitution can leave a player's
        // role out of line with the slot the restored lineup puts them in.
        // Realign those players, crediting the time actually spent in the
        // later role.
        for slot in next.lineup.format().slots() {
            let occupant = match next.lineup.occupant(*slot) {
                Some(id) => id.to_string(),
                None => continue,
            };
            let live = formats::player_mut(&mut next.players, &occupant)?;
            if live.role != slot.role() {
                live.change_role(slot.role(), now, self.paused);
            }
        }

        next.highlighted = record
            .came_on
            .iter()
            .chain(record.went_off.iter())
            .cloned()
            .collect();
        next.events
            .push(RotationEvent::undo(now, record.came_on.clone(), record.went_off.clone()));
        next.last_substitution = None;
        Ok(next)
    }

    fn toggle_inactive_inner(&self, id: &str, now: Millis) -> Result<MatchState> {
        let lineup = match &self.lineup {
            Lineup::Individual7(lineup) => lineup,
            _ => {
                return Err(RotationError::WrongFormat {
                    op: "toggle_inactive",
                    format: self.format().code(),
                })
            }
        };
        let player = self.roster(id)?;
        let slot = lineup
            .slot_of(id)
            .filter(|slot| slot.is_bench())
            .ok_or_else(|| RotationError::NotOnBench { id: id.to_string() })?;

        let deactivating = !player.inactive;
        if deactivating {
            let other = match slot {
                Slot::SubstituteOne => &lineup.substitute_2,
                _ => &lineup.substitute_1,
            };
            if !formats::occupant_live(&self.players, other) {
                return Err(RotationError::LastLiveSubstitute { id: id.to_string() });
            }
        }

        let mut next = self.clone();
        formats::player_mut(&mut next.players, id)?.inactive = deactivating;
        if deactivating {
            next.queue.deactivate(id);
            next.events.push(RotationEvent::deactivated(now, id.to_string()));
        } else {
            next.queue.reactivate(id);
            next.events.push(RotationEvent::reactivated(now, id.to_string()));
        }
        if let Lineup::Individual7(lineup) = &mut next.lineup {
            formats::individual7::normalize_bench(lineup, &next.players);
        }
        Ok(next)
    }

    fn swap_bench_slots_inner(&self, first: &str, second: &str, now: Millis) -> Result<MatchState> {
        let lineup = match &self.lineup {
            Lineup::Individual7(lineup) => lineup,
            _ => {
                return Err(RotationError::WrongFormat {
                    op: "swap_bench_slots",
                    format: self.format().code(),
                })
            }
        };
        if first == second {
            return Err(RotationError::SamePlayer);
        }
        for id in [first, second] {
            let on_bench = lineup.substitute_1.as_deref() == Some(id)
                || lineup.substitute_2.as_deref() == Some(id);
            if !on_bench {
                return Err(RotationError::NotOnBench { id: id.to_string() });
            }
        }

        let mut next = self.clone();
        if let Lineup::Individual7(lineup) = &mut next.lineup {
            mem::swap(&mut lineup.substitute_1, &mut lineup.substitute_2);
        }
        next.events
            .push(RotationEvent::bench_swap(now, first.to_string(), second.to_string()));
        Ok(next)
    }

    fn set_next_off_inner(&self, id: &str, now: Millis) -> Result<MatchState> {
        if matches!(self.lineup, Lineup::Pairs7(_)) {
            return Err(RotationError::WrongFormat {
                op: "set_next_off",
                format: self.format().code(),
            });
        }
        self.field_rotation_member(id)?;

        let mut next = self.clone();
        next.queue.move_to_front(id);
        next.events.push(RotationEvent::next_off_override(now, id.to_string()));
        Ok(next)
    }

    fn queue_ahead_of_inner(&self, id: &str, target: &str, now: Millis) -> Result<MatchState> {
        if matches!(self.lineup, Lineup::Pairs7(_)) {
            return Err(RotationError::WrongFormat {
                op: "queue_ahead_of",
                format: self.format().code(),
            });
        }
        if id == target {
            return Err(RotationError::SamePlayer);
        }
        self.field_rotation_member(id)?;
        self.field_rotation_member(target)?;

        let mut next = self.clone();
        next.queue.insert_before(id, target);
        next.events
            .push(RotationEvent::queue_reorder(now, id.to_string(), target.to_string()));
        Ok(next)
    }

    fn record_of(&self, outcome: &SubOutcome, at: Millis) -> SubstitutionRecord {
        let involved = self
            .players
            .iter()
            .filter(|player| {
                outcome.went_off.contains(&player.id) || outcome.came_on.contains(&player.id)
            })
            .cloned()
            .collect();
        SubstitutionRecord {
            lineup: self.lineup.clone(),
            queue: self.queue.clone(),
            players: involved,
            went_off: outcome.went_off.clone(),
            came_on: outcome.came_on.clone(),
            at,
        }
    }

    fn roster(&self, id: &str) -> Result<&Player> {
        self.players
            .iter()
            .find(|player| player.id == id)
            .ok_or_else(|| RotationError::UnknownPlayer { id: id.to_string() })
    }

    /// A manual queue override only applies to players currently holding a
    /// field slot; the goalie and the bench rotate by other means.
    fn field_rotation_member(&self, id: &str) -> Result<()> {
        self.roster(id)?;
        let on_field = self
            .lineup
            .slot_of(id)
            .map(|slot| slot.is_field())
            .unwrap_or(false);
        if !on_field {
            return Err(RotationError::NotOnField { id: id.to_string() });
        }
        Ok(())
    }

    fn swappable_slot(&self, id: &str) -> Result<Slot> {
        let slot = self
            .lineup
            .slot_of(id)
            .ok_or_else(|| RotationError::NotOnField { id: id.to_string() })?;
        if slot.is_goalie() {
            return Err(RotationError::GoalieNotSwappable);
        }
        if !slot.is_field() {
            return Err(RotationError::NotOnField { id: id.to_string() });
        }
        Ok(slot)
    }
}

/// Routes a rejected transition to the log before handing it back.
/// Contract violations are errors; domain rejections are expected traffic
/// and only warn.
fn logged(err: RotationError) -> RotationError {
    if err.is_contract_violation() {
        log::error!("rotation engine contract violated: {err}");
    } else {
        log::warn!("transition rejected: {err}");
    }
    err
}
