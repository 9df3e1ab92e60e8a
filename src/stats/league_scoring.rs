use std::collections::HashMap;

use log::{debug, warn};
use serde::Serialize;

use super::types::ValidationIssue;
use crate::domain::{LeagueGame, LeagueGameStatus, Match, Participant, Team};

pub const EXPECTED_SINGLES: usize = 6;
pub const EXPECTED_DOUBLES: usize = 3;

/// Team totals of one league game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueScore {
    pub league_game_id: String,
    pub team_a: i32,
    pub team_b: i32,
    pub counted_matches: usize,
    pub issues: Vec<ValidationIssue>,
}

impl LeagueScore {
    fn credit(&mut self, team: Team) {
        match team {
            Team::A => self.team_a += 1,
            Team::B => self.team_b += 1,
        }
        self.counted_matches += 1;
    }
}

/// Scores a league game from its linked matches.
///
/// A match belongs to the team of `player1_id` on the game's roster. A win
/// is a point for that team, a loss a point for the other one. The result
/// depends only on the set of inputs, not on their order.
pub fn compute_league_score(
    game: &LeagueGame,
    participants: &[Participant],
    matches: &[Match],
) -> LeagueScore {
    let roster = build_roster(&game.id, participants);
    let mut score = LeagueScore {
        league_game_id: game.id.clone(),
        team_a: 0,
        team_b: 0,
        counted_matches: 0,
        issues: Vec::new(),
    };

    for m in matches.iter().filter(|m| m.belongs_to(&game.id)) {
        match team_of(m, &roster) {
            Ok(team) => score.credit(if m.is_win { team } else { team.opponent() }),
            Err(issue) => score.issues.push(issue),
        }
    }

    debug!(
        "League game {} scored {}-{} from {} matches",
        game.id, score.team_a, score.team_b, score.counted_matches
    );
    for issue in &score.issues {
        warn!("Skipped match while scoring league game {}: {}", game.id, issue);
    }
    score
}

// A player listed on both teams has no usable team and maps to None.
fn build_roster<'a>(league_game_id: &str, participants: &'a [Participant]) -> HashMap<&'a str, Option<Team>> {
    let mut roster: HashMap<&str, Option<Team>> = HashMap::new();
    for p in participants.iter().filter(|p| p.league_game_id == league_game_id) {
        roster
            .entry(p.player_id.as_str())
            .and_modify(|team| {
                if *team != Some(p.team) {
                    *team = None;
                }
            })
            .or_insert(Some(p.team));
    }
    roster
}

fn team_of(m: &Match, roster: &HashMap<&str, Option<Team>>) -> Result<Team, ValidationIssue> {
    let team = lookup(m, &m.player1_id, roster)?;

    if m.is_doubles() {
        let partner = m.player2_id.as_deref().ok_or_else(|| ValidationIssue::MissingPartner {
            match_id: m.id.clone(),
        })?;
        if lookup(m, partner, roster)? != team {
            return Err(ValidationIssue::SplitTeams {
                match_id: m.id.clone(),
            });
        }
    }

    Ok(team)
}

fn lookup(m: &Match, player_id: &str, roster: &HashMap<&str, Option<Team>>) -> Result<Team, ValidationIssue> {
    roster
        .get(player_id)
        .copied()
        .flatten()
        .ok_or_else(|| ValidationIssue::NotOnRoster {
            match_id: m.id.clone(),
            player_id: player_id.to_string(),
        })
}

impl LeagueGame {
    /// Stores computed totals. A scheduled game with at least one counted
    /// match becomes in progress; completion stays an explicit action.
    pub fn apply_score(&mut self, score: &LeagueScore) {
        self.team_a_score = score.team_a;
        self.team_b_score = score.team_b;
        if self.status == LeagueGameStatus::Scheduled && score.counted_matches > 0 {
            self.status = LeagueGameStatus::InProgress;
        }
    }
}

/// Recorded vs expected matches of a league game. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueGameProgress {
    pub singles_recorded: usize,
    pub doubles_recorded: usize,
    pub expected_singles: usize,
    pub expected_doubles: usize,
}

impl LeagueGameProgress {
    pub fn from_matches(league_game_id: &str, matches: &[Match]) -> Self {
        let linked = || matches.iter().filter(|m| m.belongs_to(league_game_id));
        Self {
            singles_recorded: linked().filter(|m| m.is_singles()).count(),
            doubles_recorded: linked().filter(|m| m.is_doubles()).count(),
            expected_singles: EXPECTED_SINGLES,
            expected_doubles: EXPECTED_DOUBLES,
        }
    }

    pub fn is_fully_recorded(&self) -> bool {
        self.singles_recorded >= self.expected_singles && self.doubles_recorded >= self.expected_doubles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{doubles, in_game, league_game, participant, singles};

    fn roster() -> Vec<Participant> {
        vec![
            participant("lg1", "p1", Team::A),
            participant("lg1", "p2", Team::A),
            participant("lg1", "p3", Team::B),
            participant("lg1", "p4", Team::B),
            participant("lg2", "p5", Team::A),
        ]
    }

    fn linked(m: Match) -> Match {
        in_game(m, "lg1")
    }

    #[test]
    fn wins_credit_own_team_losses_credit_opponent() {
        let matches = vec![
            linked(singles("m1", "p1", true)),
            linked(singles("m2", "p3", false)),
            linked(singles("m3", "p4", true)),
            linked(doubles("m4", "p1", Some("p2"), false)),
        ];

        let score = compute_league_score(&league_game("lg1"), &roster(), &matches);

        assert_eq!((score.team_a, score.team_b), (2, 2));
        assert_eq!(score.counted_matches, 4);
        assert!(score.issues.is_empty());
    }

    #[test]
    fn unlinked_matches_are_ignored() {
        let matches = vec![
            singles("m1", "p1", true),
            in_game(singles("m2", "p1", true), "lg2"),
        ];

        let score = compute_league_score(&league_game("lg1"), &roster(), &matches);

        assert_eq!(score.counted_matches, 0);
        assert!(score.issues.is_empty());
    }

    #[test]
    fn order_of_matches_and_roster_does_not_matter() {
        let matches = vec![
            linked(singles("m1", "p1", true)),
            linked(singles("m2", "p3", true)),
            linked(doubles("m3", "p3", Some("p4"), false)),
            linked(singles("m4", "p9", true)),
        ];
        let mut reversed_matches = matches.clone();
        reversed_matches.reverse();
        let mut reversed_roster = roster();
        reversed_roster.reverse();

        let game = league_game("lg1");
        let first = compute_league_score(&game, &roster(), &matches);
        let again = compute_league_score(&game, &roster(), &matches);
        let shuffled = compute_league_score(&game, &reversed_roster, &reversed_matches);

        assert_eq!(first, again);
        assert_eq!((first.team_a, first.team_b), (shuffled.team_a, shuffled.team_b));
        assert_eq!((first.team_a, first.team_b), (2, 1));
    }

    #[test]
    fn off_roster_and_split_pairs_are_reported() {
        let matches = vec![
            linked(singles("m1", "p9", true)),
            linked(doubles("m2", "p1", Some("p3"), true)),
            linked(doubles("m3", "p1", None, true)),
        ];

        let score = compute_league_score(&league_game("lg1"), &roster(), &matches);

        assert_eq!(score.counted_matches, 0);
        assert_eq!(
            score.issues,
            vec![
                ValidationIssue::NotOnRoster { match_id: "m1".into(), player_id: "p9".into() },
                ValidationIssue::SplitTeams { match_id: "m2".into() },
                ValidationIssue::MissingPartner { match_id: "m3".into() },
            ]
        );
    }

    #[test]
    fn player_on_both_teams_is_not_scored() {
        let mut participants = roster();
        participants.push(participant("lg1", "p1", Team::B));

        let score = compute_league_score(
            &league_game("lg1"),
            &participants,
            &[linked(singles("m1", "p1", true))],
        );

        assert_eq!(score.counted_matches, 0);
        assert_eq!(score.issues.len(), 1);
    }

    #[test]
    fn applying_a_score_starts_but_never_completes_the_game() {
        let mut game = league_game("lg1");
        let matches: Vec<Match> = (0..9)
            .map(|i| linked(singles(&format!("m{}", i), "p1", true)))
            .collect();
        let score = compute_league_score(&game, &roster(), &matches);

        game.apply_score(&score);

        assert_eq!(game.team_a_score, 9);
        assert_eq!(game.status, LeagueGameStatus::InProgress);
        assert!(game.completed_at.is_none());
    }

    #[test]
    fn empty_score_keeps_game_scheduled() {
        let mut game = league_game("lg1");
        let score = compute_league_score(&game, &roster(), &[]);
        game.apply_score(&score);
        assert_eq!(game.status, LeagueGameStatus::Scheduled);
    }

    #[test]
    fn progress_counts_linked_matches_by_type() {
        let mut matches: Vec<Match> = (0..6)
            .map(|i| linked(singles(&format!("s{}", i), "p1", true)))
            .collect();
        matches.push(linked(doubles("d1", "p1", Some("p2"), true)));
        matches.push(singles("loose", "p1", true));

        let progress = LeagueGameProgress::from_matches("lg1", &matches);

        assert_eq!(progress.singles_recorded, 6);
        assert_eq!(progress.doubles_recorded, 1);
        assert!(!progress.is_fully_recorded());
    }
}
