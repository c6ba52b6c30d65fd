use serde::{Deserialize, Serialize};

/// Epoch timestamp in milliseconds, supplied by the host clock at every call.
pub type Millis = u64;

/// Role a player currently performs. Field roles carry their own second
/// counters so playing time can be broken down per position afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Goalie,
    Defender,
    Midfielder,
    Attacker,
    Substitute,
}

impl Role {
    pub fn code(&self) -> &'static str {
        match self {
            Role::Goalie => "goalie",
            Role::Defender => "defender",
            Role::Midfielder => "midfielder",
            Role::Attacker => "attacker",
            Role::Substitute => "substitute",
        }
    }

    /// Outfield playing role (not goalie, not bench).
    pub fn is_field(&self) -> bool {
        matches!(self, Role::Defender | Role::Midfielder | Role::Attacker)
    }

    pub fn status(&self) -> PlayerStatus {
        match self {
            Role::Goalie => PlayerStatus::Goalie,
            Role::Substitute => PlayerStatus::Substitute,
            Role::Defender | Role::Midfielder | Role::Attacker => PlayerStatus::OnField,
        }
    }
}

/// Coarse on-field status. Derived from [`Role`], never stored separately,
/// so a player holds exactly one status at any time by construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    OnField,
    Substitute,
    Goalie,
}

/// Accumulated playing seconds per role plus the start of the current stint.
///
/// Counters only ever grow during a match; the single exception is the
/// verbatim restore performed by the undo transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayTime {
    /// Total on-field seconds (defender + midfielder + attacker).
    pub field_secs: u32,
    pub defender_secs: u32,
    pub midfielder_secs: u32,
    pub attacker_secs: u32,
    pub goalie_secs: u32,
    pub substitute_secs: u32,
    /// Wall-clock start of the current stint; `None` while not accruing
    /// (before the period starts and after it ends).
    pub stint_started_at: Option<Millis>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    /// Host-assigned id, stable for the duration of a match.
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub time: PlayTime,
    /// Bench-only exclusion flag (individual-7): an inactive substitute is
    /// skipped by rotation until reactivated.
    #[serde(default)]
    pub inactive: bool,
    #[serde(default)]
    pub captain: bool,
    #[serde(default)]
    pub fair_play_medal: bool,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            time: PlayTime::default(),
            inactive: false,
            captain: false,
            fair_play_medal: false,
        }
    }

    pub fn status(&self) -> PlayerStatus {
        self.role.status()
    }

    /// Credits elapsed whole seconds since the stint start to the counters of
    /// the current role, then restarts the stint at `now`.
    ///
    /// An unset stint start counts as zero elapsed, and a clock that ran
    /// backwards credits nothing. While paused this is a full no-op: counters
    /// stay put and the stint start is not advanced, so nothing is lost or
    /// double-counted around a pause.
    pub fn accrue(&mut self, now: Millis, paused: bool) {
        if paused {
            return;
        }
        let elapsed_secs = match self.time.stint_started_at {
            Some(start) => (now.saturating_sub(start) / 1000) as u32,
            None => 0,
        };
        if elapsed_secs > 0 {
            match self.role {
                Role::Goalie => self.time.goalie_secs += elapsed_secs,
                Role::Defender => {
                    self.time.field_secs += elapsed_secs;
                    self.time.defender_secs += elapsed_secs;
                }
                Role::Midfielder => {
                    self.time.field_secs += elapsed_secs;
                    self.time.midfielder_secs += elapsed_secs;
                }
                Role::Attacker => {
                    self.time.field_secs += elapsed_secs;
                    self.time.attacker_secs += elapsed_secs;
                }
                Role::Substitute => self.time.substitute_secs += elapsed_secs,
            }
        }
        self.time.stint_started_at = Some(now);
    }

    /// Credits the stint so far to the old role, then switches to `new_role`.
    ///
    /// The stint restarts at `now` unless paused, in which case the stint
    /// start is left untouched; the resume path re-stamps every stint so the
    /// paused span is never attributed to any role.
    pub fn change_role(&mut self, new_role: Role, now: Millis, paused: bool) {
        self.accrue(now, paused);
        self.role = new_role;
        if !paused {
            self.time.stint_started_at = Some(now);
        }
    }
}
