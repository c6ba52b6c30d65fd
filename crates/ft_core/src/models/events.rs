use serde::{Deserialize, Serialize};

use super::player::Millis;

/// One entry in the append-only match journal.
///
/// The journal records history for the host to route (UI toasts, logs,
/// persistence); it is never consulted by the engine's own logic, and the
/// undo transition appends rather than erases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RotationEvent {
    pub at: Millis,
    #[serde(flatten)]
    pub kind: RotationEventKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RotationEventKind {
    Substitution { came_on: Vec<String>, went_off: Vec<String> },
    PositionSwitch { first: String, second: String },
    GoalieSwitch { new_goalie: String, old_goalie: String },
    Undo { reverted_on: Vec<String>, reverted_off: Vec<String> },
    Deactivated { player: String },
    Reactivated { player: String },
    BenchSwap { first: String, second: String },
    NextOffOverride { player: String },
    QueueReorder { player: String, ahead_of: String },
    Paused,
    Resumed,
    PeriodEnd,
}

impl RotationEvent {
    pub fn substitution(at: Millis, came_on: Vec<String>, went_off: Vec<String>) -> Self {
        Self { at, kind: RotationEventKind::Substitution { came_on, went_off } }
    }

    pub fn position_switch(at: Millis, first: String, second: String) -> Self {
        Self { at, kind: RotationEventKind::PositionSwitch { first, second } }
    }

    pub fn goalie_switch(at: Millis, new_goalie: String, old_goalie: String) -> Self {
        Self { at, kind: RotationEventKind::GoalieSwitch { new_goalie, old_goalie } }
    }

    /// `reverted_on` are the players whose entry is being rolled back,
    /// `reverted_off` the players returning to the field.
    pub fn undo(at: Millis, reverted_on: Vec<String>, reverted_off: Vec<String>) -> Self {
        Self { at, kind: RotationEventKind::Undo { reverted_on, reverted_off } }
    }

    pub fn deactivated(at: Millis, player: String) -> Self {
        Self { at, kind: RotationEventKind::Deactivated { player } }
    }

    pub fn reactivated(at: Millis, player: String) -> Self {
        Self { at, kind: RotationEventKind::Reactivated { player } }
    }

    pub fn bench_swap(at: Millis, first: String, second: String) -> Self {
        Self { at, kind: RotationEventKind::BenchSwap { first, second } }
    }

    pub fn next_off_override(at: Millis, player: String) -> Self {
        Self { at, kind: RotationEventKind::NextOffOverride { player } }
    }

    pub fn queue_reorder(at: Millis, player: String, ahead_of: String) -> Self {
        Self { at, kind: RotationEventKind::QueueReorder { player, ahead_of } }
    }

    pub fn paused(at: Millis) -> Self {
        Self { at, kind: RotationEventKind::Paused }
    }

    pub fn resumed(at: Millis) -> Self {
        Self { at, kind: RotationEventKind::Resumed }
    }

    pub fn period_end(at: Millis) -> Self {
        Self { at, kind: RotationEventKind::PeriodEnd }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_flat_type_tag() {
        let event = RotationEvent::substitution(
            90_000,
            vec!["5".to_string()],
            vec!["2".to_string()],
        );
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["at"], 90_000);
        assert_eq!(json["type"], "substitution");
        assert_eq!(json["came_on"][0], "5");
        assert_eq!(json["went_off"][0], "2");
    }

    #[test]
    fn test_unit_kinds_round_trip() {
        let event = RotationEvent::paused(1_000);
        let json = serde_json::to_string(&event).unwrap();
        let back: RotationEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.kind, RotationEventKind::Paused);
    }
}
