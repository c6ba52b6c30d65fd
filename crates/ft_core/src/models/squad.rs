use serde::{Deserialize, Serialize};

use super::player::Role;

/// Squad format in play for the current period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum SquadFormat {
    /// Seven players, field organized as two fixed defender/attacker pairs
    /// plus a bench pair that swaps in as a unit.
    Pairs7,
    /// Six players rotating individually through a single bench slot.
    Individual6,
    /// Seven players rotating individually through two ordered bench slots;
    /// bench players can be marked inactive.
    Individual7,
}

impl SquadFormat {
    /// Canonical format code string.
    pub fn code(&self) -> &'static str {
        match self {
            SquadFormat::Pairs7 => "pairs-7",
            SquadFormat::Individual6 => "individual-6",
            SquadFormat::Individual7 => "individual-7",
        }
    }

    /// Total squad size the format is played with.
    pub fn squad_size(&self) -> usize {
        match self {
            SquadFormat::Pairs7 | SquadFormat::Individual7 => 7,
            SquadFormat::Individual6 => 6,
        }
    }

    /// Slot keys valid for this format, goalie first.
    pub fn slots(&self) -> &'static [Slot] {
        match self {
            SquadFormat::Pairs7 => &[
                Slot::Goalie,
                Slot::LeftPairDefender,
                Slot::LeftPairAttacker,
                Slot::RightPairDefender,
                Slot::RightPairAttacker,
                Slot::SubPairDefender,
                Slot::SubPairAttacker,
            ],
            SquadFormat::Individual6 => &[
                Slot::Goalie,
                Slot::LeftDefender,
                Slot::RightDefender,
                Slot::Midfielder,
                Slot::Attacker,
                Slot::SubstituteOne,
            ],
            SquadFormat::Individual7 => &[
                Slot::Goalie,
                Slot::LeftDefender,
                Slot::RightDefender,
                Slot::Midfielder,
                Slot::Attacker,
                Slot::SubstituteOne,
                Slot::SubstituteTwo,
            ],
        }
    }
}

/// Which field pair is due to leave at the next pairs-7 substitution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PairSide {
    Left,
    Right,
}

impl PairSide {
    pub fn other(&self) -> PairSide {
        match self {
            PairSide::Left => PairSide::Right,
            PairSide::Right => PairSide::Left,
        }
    }
}

/// Every slot key across all formats. Role and field/bench classification
/// come from explicit tables here rather than from parsing the key strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Goalie,
    LeftPairDefender,
    LeftPairAttacker,
    RightPairDefender,
    RightPairAttacker,
    SubPairDefender,
    SubPairAttacker,
    LeftDefender,
    RightDefender,
    Midfielder,
    Attacker,
    SubstituteOne,
    SubstituteTwo,
}

impl Slot {
    /// Stable slot key string, matching the host configuration format.
    pub fn code(&self) -> &'static str {
        match self {
            Slot::Goalie => "goalie",
            Slot::LeftPairDefender => "leftPair.defender",
            Slot::LeftPairAttacker => "leftPair.attacker",
            Slot::RightPairDefender => "rightPair.defender",
            Slot::RightPairAttacker => "rightPair.attacker",
            Slot::SubPairDefender => "subPair.defender",
            Slot::SubPairAttacker => "subPair.attacker",
            Slot::LeftDefender => "leftDefender",
            Slot::RightDefender => "rightDefender",
            Slot::Midfielder => "midfielder",
            Slot::Attacker => "attacker",
            Slot::SubstituteOne => "substitute_1",
            Slot::SubstituteTwo => "substitute_2",
        }
    }

    /// Role a player holds while occupying this slot.
    pub fn role(&self) -> Role {
        match self {
            Slot::Goalie => Role::Goalie,
            Slot::LeftPairDefender | Slot::RightPairDefender => Role::Defender,
            Slot::LeftPairAttacker | Slot::RightPairAttacker => Role::Attacker,
            Slot::LeftDefender | Slot::RightDefender => Role::Defender,
            Slot::Midfielder => Role::Midfielder,
            Slot::Attacker => Role::Attacker,
            Slot::SubPairDefender
            | Slot::SubPairAttacker
            | Slot::SubstituteOne
            | Slot::SubstituteTwo => Role::Substitute,
        }
    }

    pub fn is_goalie(&self) -> bool {
        matches!(self, Slot::Goalie)
    }

    pub fn is_bench(&self) -> bool {
        matches!(
            self,
            Slot::SubPairDefender | Slot::SubPairAttacker | Slot::SubstituteOne | Slot::SubstituteTwo
        )
    }

    /// Outfield slot a player actively plays in (not goalie, not bench).
    pub fn is_field(&self) -> bool {
        !self.is_goalie() && !self.is_bench()
    }
}

/// A defender/attacker pair, the rotation unit of the pairs-7 format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldPair {
    pub defender: String,
    pub attacker: String,
}

impl FieldPair {
    pub fn new(defender: impl Into<String>, attacker: impl Into<String>) -> Self {
        Self { defender: defender.into(), attacker: attacker.into() }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.defender == id || self.attacker == id
    }
}

/// Pairs-7 snapshot: goalie, two field pairs, optional bench pair, and the
/// alternating pointer naming the pair that leaves next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PairsLineup {
    pub goalie: String,
    pub left: FieldPair,
    pub right: FieldPair,
    pub bench: Option<FieldPair>,
    pub next_pair_out: PairSide,
}

impl PairsLineup {
    pub fn slot_of(&self, id: &str) -> Option<Slot> {
        if self.goalie == id {
            return Some(Slot::Goalie);
        }
        if self.left.defender == id {
            return Some(Slot::LeftPairDefender);
        }
        if self.left.attacker == id {
            return Some(Slot::LeftPairAttacker);
        }
        if self.right.defender == id {
            return Some(Slot::RightPairDefender);
        }
        if self.right.attacker == id {
            return Some(Slot::RightPairAttacker);
        }
        if let Some(bench) = &self.bench {
            if bench.defender == id {
                return Some(Slot::SubPairDefender);
            }
            if bench.attacker == id {
                return Some(Slot::SubPairAttacker);
            }
        }
        None
    }

    pub fn occupant(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Goalie => Some(self.goalie.as_str()),
            Slot::LeftPairDefender => Some(self.left.defender.as_str()),
            Slot::LeftPairAttacker => Some(self.left.attacker.as_str()),
            Slot::RightPairDefender => Some(self.right.defender.as_str()),
            Slot::RightPairAttacker => Some(self.right.attacker.as_str()),
            Slot::SubPairDefender => self.bench.as_ref().map(|b| b.defender.as_str()),
            Slot::SubPairAttacker => self.bench.as_ref().map(|b| b.attacker.as_str()),
            _ => None,
        }
    }

    pub(crate) fn set_occupant(&mut self, slot: Slot, id: String) {
        match slot {
            Slot::Goalie => self.goalie = id,
            Slot::LeftPairDefender => self.left.defender = id,
            Slot::LeftPairAttacker => self.left.attacker = id,
            Slot::RightPairDefender => self.right.defender = id,
            Slot::RightPairAttacker => self.right.attacker = id,
            Slot::SubPairDefender => {
                if let Some(bench) = &mut self.bench {
                    bench.defender = id;
                }
            }
            Slot::SubPairAttacker => {
                if let Some(bench) = &mut self.bench {
                    bench.attacker = id;
                }
            }
            _ => {}
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids = vec![
            self.goalie.as_str(),
            self.left.defender.as_str(),
            self.left.attacker.as_str(),
            self.right.defender.as_str(),
            self.right.attacker.as_str(),
        ];
        if let Some(bench) = &self.bench {
            ids.push(bench.defender.as_str());
            ids.push(bench.attacker.as_str());
        }
        ids
    }
}

/// Individual-6 snapshot: four field slots and one bench slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Individual6Lineup {
    pub goalie: String,
    pub left_defender: String,
    pub right_defender: String,
    pub midfielder: String,
    pub attacker: String,
    pub substitute: Option<String>,
}

impl Individual6Lineup {
    pub fn slot_of(&self, id: &str) -> Option<Slot> {
        if self.goalie == id {
            return Some(Slot::Goalie);
        }
        if self.left_defender == id {
            return Some(Slot::LeftDefender);
        }
        if self.right_defender == id {
            return Some(Slot::RightDefender);
        }
        if self.midfielder == id {
            return Some(Slot::Midfielder);
        }
        if self.attacker == id {
            return Some(Slot::Attacker);
        }
        if self.substitute.as_deref() == Some(id) {
            return Some(Slot::SubstituteOne);
        }
        None
    }

    pub fn occupant(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Goalie => Some(self.goalie.as_str()),
            Slot::LeftDefender => Some(self.left_defender.as_str()),
            Slot::RightDefender => Some(self.right_defender.as_str()),
            Slot::Midfielder => Some(self.midfielder.as_str()),
            Slot::Attacker => Some(self.attacker.as_str()),
            Slot::SubstituteOne => self.substitute.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn set_occupant(&mut self, slot: Slot, id: String) {
        match slot {
            Slot::Goalie => self.goalie = id,
            Slot::LeftDefender => self.left_defender = id,
            Slot::RightDefender => self.right_defender = id,
            Slot::Midfielder => self.midfielder = id,
            Slot::Attacker => self.attacker = id,
            Slot::SubstituteOne => self.substitute = Some(id),
            _ => {}
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids = vec![
            self.goalie.as_str(),
            self.left_defender.as_str(),
            self.right_defender.as_str(),
            self.midfielder.as_str(),
            self.attacker.as_str(),
        ];
        if let Some(substitute) = &self.substitute {
            ids.push(substitute.as_str());
        }
        ids
    }
}

/// Individual-7 snapshot: four field slots plus two ordered bench slots.
/// Slot 1 is the entry slot; slot 2 is the cooling slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Individual7Lineup {
    pub goalie: String,
    pub left_defender: String,
    pub right_defender: String,
    pub midfielder: String,
    pub attacker: String,
    pub substitute_1: Option<String>,
    pub substitute_2: Option<String>,
}

impl Individual7Lineup {
    pub fn slot_of(&self, id: &str) -> Option<Slot> {
        if self.goalie == id {
            return Some(Slot::Goalie);
        }
        if self.left_defender == id {
            return Some(Slot::LeftDefender);
        }
        if self.right_defender == id {
            return Some(Slot::RightDefender);
        }
        if self.midfielder == id {
            return Some(Slot::Midfielder);
        }
        if self.attacker == id {
            return Some(Slot::Attacker);
        }
        if self.substitute_1.as_deref() == Some(id) {
            return Some(Slot::SubstituteOne);
        }
        if self.substitute_2.as_deref() == Some(id) {
            return Some(Slot::SubstituteTwo);
        }
        None
    }

    pub fn occupant(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Goalie => Some(self.goalie.as_str()),
            Slot::LeftDefender => Some(self.left_defender.as_str()),
            Slot::RightDefender => Some(self.right_defender.as_str()),
            Slot::Midfielder => Some(self.midfielder.as_str()),
            Slot::Attacker => Some(self.attacker.as_str()),
            Slot::SubstituteOne => self.substitute_1.as_deref(),
            Slot::SubstituteTwo => self.substitute_2.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn set_occupant(&mut self, slot: Slot, id: String) {
        match slot {
            Slot::Goalie => self.goalie = id,
            Slot::LeftDefender => self.left_defender = id,
            Slot::RightDefender => self.right_defender = id,
            Slot::Midfielder => self.midfielder = id,
            Slot::Attacker => self.attacker = id,
            Slot::SubstituteOne => self.substitute_1 = Some(id),
            Slot::SubstituteTwo => self.substitute_2 = Some(id),
            _ => {}
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids = vec![
            self.goalie.as_str(),
            self.left_defender.as_str(),
            self.right_defender.as_str(),
            self.midfielder.as_str(),
            self.attacker.as_str(),
        ];
        if let Some(substitute) = &self.substitute_1 {
            ids.push(substitute.as_str());
        }
        if let Some(substitute) = &self.substitute_2 {
            ids.push(substitute.as_str());
        }
        ids
    }
}

/// Structural snapshot of who occupies which slot, tagged by format.
///
/// Field and goalie slots are always occupied; bench slots may be vacant,
/// which is exactly the "no substitute populated" error case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Lineup {
    Pairs7(PairsLineup),
    Individual6(Individual6Lineup),
    Individual7(Individual7Lineup),
}

impl Lineup {
    pub fn format(&self) -> SquadFormat {
        match self {
            Lineup::Pairs7(_) => SquadFormat::Pairs7,
            Lineup::Individual6(_) => SquadFormat::Individual6,
            Lineup::Individual7(_) => SquadFormat::Individual7,
        }
    }

    pub fn goalie(&self) -> &str {
        match self {
            Lineup::Pairs7(lineup) => &lineup.goalie,
            Lineup::Individual6(lineup) => &lineup.goalie,
            Lineup::Individual7(lineup) => &lineup.goalie,
        }
    }

    pub fn slot_of(&self, id: &str) -> Option<Slot> {
        match self {
            Lineup::Pairs7(lineup) => lineup.slot_of(id),
            Lineup::Individual6(lineup) => lineup.slot_of(id),
            Lineup::Individual7(lineup) => lineup.slot_of(id),
        }
    }

    pub fn occupant(&self, slot: Slot) -> Option<&str> {
        match self {
            Lineup::Pairs7(lineup) => lineup.occupant(slot),
            Lineup::Individual6(lineup) => lineup.occupant(slot),
            Lineup::Individual7(lineup) => lineup.occupant(slot),
        }
    }

    pub(crate) fn set_occupant(&mut self, slot: Slot, id: String) {
        match self {
            Lineup::Pairs7(lineup) => lineup.set_occupant(slot, id),
            Lineup::Individual6(lineup) => lineup.set_occupant(slot, id),
            Lineup::Individual7(lineup) => lineup.set_occupant(slot, id),
        }
    }

    /// All occupant ids in stable slot order.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Lineup::Pairs7(lineup) => lineup.ids(),
            Lineup::Individual6(lineup) => lineup.ids(),
            Lineup::Individual7(lineup) => lineup.ids(),
        }
    }
}
