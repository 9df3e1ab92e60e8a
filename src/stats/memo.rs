use std::collections::HashMap;

use anyhow::Result;
use log::debug;

use super::scope::MatchScope;
use super::types::{DoublesStats, SinglesStats, Standings};
use crate::domain::Match;

/// Memoized standings per scope.
///
/// Entries are dropped on writes: a match write invalidates every cached
/// scope that admits the match, since one changed tally can reorder the whole
/// leaderboard of that scope.
#[derive(Debug, Default)]
pub struct StandingsCache {
    singles: HashMap<MatchScope, Standings<SinglesStats>>,
    doubles: HashMap<MatchScope, Standings<DoublesStats>>,
}

impl StandingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singles_or_compute<F>(&mut self, scope: &MatchScope, compute: F) -> Result<Standings<SinglesStats>>
    where
        F: FnOnce() -> Result<Standings<SinglesStats>>,
    {
        get_or_compute(&mut self.singles, scope, compute)
    }

    pub fn doubles_or_compute<F>(&mut self, scope: &MatchScope, compute: F) -> Result<Standings<DoublesStats>>
    where
        F: FnOnce() -> Result<Standings<DoublesStats>>,
    {
        get_or_compute(&mut self.doubles, scope, compute)
    }

    /// Call after inserting, relinking or deleting `m`
    pub fn invalidate_for_match(&mut self, m: &Match) -> usize {
        let before = self.len();
        self.singles.retain(|scope, _| !scope.admits(m));
        self.doubles.retain(|scope, _| !scope.admits(m));
        let dropped = before - self.len();
        debug!("Match {} invalidated {} cached standings", m.id, dropped);
        dropped
    }

    /// Call when a league game is deleted and its matches lose their link.
    /// Scopes without a league game filter keep the same match set.
    pub fn invalidate_league_game(&mut self, league_game_id: &str) -> usize {
        let before = self.len();
        let affected = |scope: &MatchScope| scope.league_game_id.as_deref() == Some(league_game_id);
        self.singles.retain(|scope, _| !affected(scope));
        self.doubles.retain(|scope, _| !affected(scope));
        before - self.len()
    }

    pub fn invalidate_all(&mut self) {
        self.singles.clear();
        self.doubles.clear();
    }

    pub fn len(&self) -> usize {
        self.singles.len() + self.doubles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn get_or_compute<T, F>(entries: &mut HashMap<MatchScope, Standings<T>>, scope: &MatchScope, compute: F) -> Result<Standings<T>>
where
    T: Clone,
    F: FnOnce() -> Result<Standings<T>>,
{
    if let Some(cached) = entries.get(scope) {
        return Ok(cached.clone());
    }
    let standings = compute()?;
    entries.insert(scope.clone(), standings.clone());
    Ok(standings)
}
