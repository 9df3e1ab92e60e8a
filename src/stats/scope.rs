use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Match;

/// Subset of matches a leaderboard is computed over. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScope {
    pub league_game_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl MatchScope {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn league_game(league_game_id: &str) -> Self {
        Self {
            league_game_id: Some(league_game_id.to_string()),
            ..Self::default()
        }
    }

    pub fn between(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            league_game_id: None,
            from,
            to,
        }
    }

    pub fn admits(&self, m: &Match) -> bool {
        self.admits_league_game(m)
            && self.from.is_none_or(|from| m.match_date >= from)
            && self.to.is_none_or(|to| m.match_date <= to)
    }

    fn admits_league_game(&self, m: &Match) -> bool {
        match &self.league_game_id {
            Some(id) => m.belongs_to(id),
            None => true,
        }
    }

    pub fn filter(&self, matches: &[Match]) -> Vec<Match> {
        matches.iter().filter(|m| self.admits(m)).cloned().collect()
    }
}
