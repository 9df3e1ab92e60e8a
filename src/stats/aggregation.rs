use std::collections::HashMap;

use log::{debug, warn};

use super::ranking::{rank_doubles, rank_singles};
use super::scope::MatchScope;
use super::types::{DoublesStats, PairKey, PlayerRef, Record, SinglesStats, Standings, ValidationIssue};
use crate::config::ScoringSettings;
use crate::domain::{Match, Player};

/// Singles leaderboard over every singles match in `matches`.
///
/// Each match credits `player1_id` with a win or a loss. Matches naming an
/// unknown player are skipped and reported; players without singles matches
/// are absent from the result.
pub fn compute_singles_stats(
    players: &[Player],
    matches: &[Match],
    scoring: &ScoringSettings,
) -> Standings<SinglesStats> {
    let roster = index_players(players);
    let mut tallies: HashMap<&str, (&Player, Record)> = HashMap::new();
    let mut issues = Vec::new();

    for m in matches.iter().filter(|m| m.is_singles()) {
        let Some(&player) = roster.get(m.player1_id.as_str()) else {
            issues.push(ValidationIssue::UnknownPlayer {
                match_id: m.id.clone(),
                player_id: m.player1_id.clone(),
            });
            continue;
        };

        if m.player2_id.is_some() {
            issues.push(ValidationIssue::UnexpectedSecondPlayer {
                match_id: m.id.clone(),
            });
        }

        tallies
            .entry(player.id.as_str())
            .or_insert_with(|| (player, Record::default()))
            .1
            .record(m.is_win, scoring);
    }

    let mut entries: Vec<SinglesStats> = tallies
        .into_values()
        .map(|(player, record)| SinglesStats::new(PlayerRef::from(player), record))
        .collect();
    rank_singles(&mut entries);

    report("singles", entries.len(), &issues);
    Standings { entries, issues }
}

/// Doubles leaderboard grouped by unordered pair.
///
/// A doubles match without a partner, or with the same player twice, cannot
/// form a pair and is skipped with an issue.
pub fn compute_doubles_stats(
    players: &[Player],
    matches: &[Match],
    scoring: &ScoringSettings,
) -> Standings<DoublesStats> {
    let roster = index_players(players);
    let mut tallies: HashMap<PairKey, (&Player, &Player, Record)> = HashMap::new();
    let mut issues = Vec::new();

    for m in matches.iter().filter(|m| m.is_doubles()) {
        let Some(partner_id) = m.player2_id.as_deref() else {
            issues.push(ValidationIssue::MissingPartner {
                match_id: m.id.clone(),
            });
            continue;
        };

        let Some(key) = PairKey::new(&m.player1_id, partner_id) else {
            issues.push(ValidationIssue::SamePlayerTwice {
                match_id: m.id.clone(),
                player_id: partner_id.to_string(),
            });
            continue;
        };

        let low = roster.get(key.low()).copied();
        let high = roster.get(key.high()).copied();
        let (Some(low), Some(high)) = (low, high) else {
            for id in [key.low(), key.high()] {
                if !roster.contains_key(id) {
                    issues.push(ValidationIssue::UnknownPlayer {
                        match_id: m.id.clone(),
                        player_id: id.to_string(),
                    });
                }
            }
            continue;
        };

        tallies
            .entry(key)
            .or_insert_with(|| (low, high, Record::default()))
            .2
            .record(m.is_win, scoring);
    }

    let mut entries: Vec<DoublesStats> = tallies
        .into_values()
        .map(|(low, high, record)| {
            DoublesStats::new(PlayerRef::from(low), PlayerRef::from(high), record)
        })
        .collect();
    rank_doubles(&mut entries);

    report("doubles", entries.len(), &issues);
    Standings { entries, issues }
}

pub fn compute_singles_stats_in_scope(
    players: &[Player],
    matches: &[Match],
    scope: &MatchScope,
    scoring: &ScoringSettings,
) -> Standings<SinglesStats> {
    compute_singles_stats(players, &scope.filter(matches), scoring)
}

pub fn compute_doubles_stats_in_scope(
    players: &[Player],
    matches: &[Match],
    scope: &MatchScope,
    scoring: &ScoringSettings,
) -> Standings<DoublesStats> {
    compute_doubles_stats(players, &scope.filter(matches), scoring)
}

fn index_players(players: &[Player]) -> HashMap<&str, &Player> {
    players.iter().map(|p| (p.id.as_str(), p)).collect()
}

fn report(kind: &str, entries: usize, issues: &[ValidationIssue]) {
    debug!("Aggregated {} {} leaderboard entries", entries, kind);
    for issue in issues {
        warn!("Skipped record in {} aggregation: {}", kind, issue);
    }
}
