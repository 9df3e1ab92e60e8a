use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ScoringSettings;
use crate::domain::{Player, PlayerId};

/// Player identity as it appears in a leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

impl From<&Player> for PlayerRef {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
        }
    }
}

/// Win/loss/points tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: i32,
    pub losses: i32,
    pub points: i32,
}

impl Record {
    pub fn record(&mut self, is_win: bool, scoring: &ScoringSettings) {
        if is_win {
            self.wins += 1;
            self.points += scoring.points_per_win;
        } else {
            self.losses += 1;
            self.points += scoring.points_per_loss;
        }
    }

    pub fn matches_played(&self) -> i32 {
        self.wins + self.losses
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinglesStats {
    pub player: PlayerRef,
    pub wins: i32,
    pub losses: i32,
    pub points: i32,
}

impl SinglesStats {
    pub fn new(player: PlayerRef, record: Record) -> Self {
        Self {
            player,
            wins: record.wins,
            losses: record.losses,
            points: record.points,
        }
    }

    pub fn record(&self) -> Record {
        Record {
            wins: self.wins,
            losses: self.losses,
            points: self.points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoublesStats {
    pub player1: PlayerRef,
    pub player2: PlayerRef,
    pub wins: i32,
    pub losses: i32,
    pub points: i32,
}

impl DoublesStats {
    pub fn new(player1: PlayerRef, player2: PlayerRef, record: Record) -> Self {
        Self {
            player1,
            player2,
            wins: record.wins,
            losses: record.losses,
            points: record.points,
        }
    }

    pub fn record(&self) -> Record {
        Record {
            wins: self.wins,
            losses: self.losses,
            points: self.points,
        }
    }

    /// Entries always carry distinct players, so the key exists
    pub fn pair_key(&self) -> PairKey {
        PairKey::ordered(&self.player1.id, &self.player2.id)
    }
}

/// Order-independent identity of a doubles pair: (A,B) == (B,A)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: PlayerId,
    high: PlayerId,
}

impl PairKey {
    /// `None` when both ids name the same player
    pub fn new(a: &str, b: &str) -> Option<Self> {
        if a == b {
            return None;
        }
        Some(Self::ordered(a, b))
    }

    fn ordered(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    pub fn low(&self) -> &str {
        &self.low
    }

    pub fn high(&self) -> &str {
        &self.high
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.low, self.high)
    }
}

/// Per-record data problem found while aggregating. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationIssue {
    #[serde(rename_all = "camelCase")]
    UnknownPlayer { match_id: String, player_id: PlayerId },
    #[serde(rename_all = "camelCase")]
    MissingPartner { match_id: String },
    #[serde(rename_all = "camelCase")]
    SamePlayerTwice { match_id: String, player_id: PlayerId },
    #[serde(rename_all = "camelCase")]
    UnexpectedSecondPlayer { match_id: String },
    #[serde(rename_all = "camelCase")]
    NotOnRoster { match_id: String, player_id: PlayerId },
    #[serde(rename_all = "camelCase")]
    SplitTeams { match_id: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnknownPlayer { match_id, player_id } => {
                write!(f, "match {} references unknown player {}", match_id, player_id)
            }
            ValidationIssue::MissingPartner { match_id } => {
                write!(f, "doubles match {} has no second player", match_id)
            }
            ValidationIssue::SamePlayerTwice { match_id, player_id } => {
                write!(f, "doubles match {} lists player {} twice", match_id, player_id)
            }
            ValidationIssue::UnexpectedSecondPlayer { match_id } => {
                write!(f, "singles match {} carries a second player", match_id)
            }
            ValidationIssue::NotOnRoster { match_id, player_id } => {
                write!(f, "match {}: player {} is not on the roster", match_id, player_id)
            }
            ValidationIssue::SplitTeams { match_id } => {
                write!(f, "doubles match {} pairs players from opposite teams", match_id)
            }
        }
    }
}

/// Ranked leaderboard plus the records that were skipped to build it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standings<T> {
    pub entries: Vec<T>,
    pub issues: Vec<ValidationIssue>,
}

impl<T> Standings<T> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First `n` entries; truncation is left to the caller
    pub fn top(&self, n: usize) -> &[T] {
        &self.entries[..n.min(self.entries.len())]
    }
}

impl<T> Default for Standings<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            issues: Vec::new(),
        }
    }
}
