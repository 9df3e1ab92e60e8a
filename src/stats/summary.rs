use serde::Serialize;

use crate::domain::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatCategory {
    Players,
    Matches,
    Singles,
    Doubles,
}

/// One dashboard card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum StatCard {
    TotalPlayers(usize),
    TotalMatches(usize),
    SinglesMatches(usize),
    DoublesMatches(usize),
}

impl StatCard {
    pub fn label(&self) -> &'static str {
        match self {
            StatCard::TotalPlayers(_) => "Total Players",
            StatCard::TotalMatches(_) => "Total Matches",
            StatCard::SinglesMatches(_) => "Singles Matches",
            StatCard::DoublesMatches(_) => "Doubles Matches",
        }
    }

    pub fn value(&self) -> usize {
        match *self {
            StatCard::TotalPlayers(v)
            | StatCard::TotalMatches(v)
            | StatCard::SinglesMatches(v)
            | StatCard::DoublesMatches(v) => v,
        }
    }

    pub fn category(&self) -> StatCategory {
        match self {
            StatCard::TotalPlayers(_) => StatCategory::Players,
            StatCard::TotalMatches(_) => StatCategory::Matches,
            StatCard::SinglesMatches(_) => StatCategory::Singles,
            StatCard::DoublesMatches(_) => StatCategory::Doubles,
        }
    }
}

/// Headline counts shown on the home dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_players: usize,
    pub total_matches: usize,
    pub singles_matches: usize,
    pub doubles_matches: usize,
}

impl DashboardSummary {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            total_players: snapshot.players.len(),
            total_matches: snapshot.matches.len(),
            singles_matches: snapshot.singles_count(),
            doubles_matches: snapshot.doubles_count(),
        }
    }

    pub fn cards(&self) -> [StatCard; 4] {
        [
            StatCard::TotalPlayers(self.total_players),
            StatCard::TotalMatches(self.total_matches),
            StatCard::SinglesMatches(self.singles_matches),
            StatCard::DoublesMatches(self.doubles_matches),
        ]
    }
}
