pub mod events;
pub mod player;
pub mod squad;

pub use events::{RotationEvent, RotationEventKind};
pub use player::{Millis, PlayTime, Player, PlayerStatus, Role};
pub use squad::{
    FieldPair, Individual6Lineup, Individual7Lineup, Lineup, PairSide, PairsLineup, Slot,
    SquadFormat,
};
