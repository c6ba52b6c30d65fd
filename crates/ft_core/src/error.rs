use thiserror::Error;

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, RotationError>;

/// Errors produced by the rotation engine.
///
/// Every `Err` from a transition means "state unchanged": the caller keeps
/// the value it passed in. `Invariant` is the one hard-failure class; it
/// signals a broken precondition in the state itself rather than a request
/// the domain simply forbids.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotationError {
    #[error("No substitute populated to come on")]
    EmptyBench,

    #[error("Player not found: {id}")]
    UnknownPlayer { id: String },

    #[error("Goalie cannot take part in a position switch")]
    GoalieNotSwappable,

    #[error("Player {id} does not hold a field position")]
    NotOnField { id: String },

    #[error("Cannot switch a player with themselves")]
    SamePlayer,

    #[error("Player {id} is already the goalie")]
    AlreadyGoalie { id: String },

    #[error("Player {id} is inactive")]
    PlayerInactive { id: String },

    #[error("{op} is not available in the {format} format")]
    WrongFormat { op: &'static str, format: &'static str },

    #[error("Player {id} is not on the bench")]
    NotOnBench { id: String },

    #[error("Deactivating {id} would leave no live substitute")]
    LastLiveSubstitute { id: String },

    #[error("No substitution to undo")]
    NothingToUndo,

    #[error("No match in progress")]
    NoMatchInProgress,

    #[error("State contract violated: {0}")]
    Invariant(String),
}

impl RotationError {
    /// True for errors that indicate corrupted state rather than a rejected
    /// request. These come from bugs upstream (usually in state construction)
    /// and should not be swallowed as ordinary no-ops.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, RotationError::Invariant(_))
    }
}
