//! The rotation engine: queue, per-format substitution strategies, and the
//! state transitions built on top of them.

pub mod formats;
pub mod game;
pub mod queue;
pub mod report;


pub use game::{MatchState, NextOff, SubstitutionRecord};
pub use queue::RotationQueue;
pub use report::{format_clock, PlayTimeReport, PlayTimeRow};
