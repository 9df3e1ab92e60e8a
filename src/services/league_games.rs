use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use log::info;
use serde::Serialize;

use crate::database::{self, with_transaction, DbConn, NewMatch};
use crate::domain::{LeagueGame, Match};
use crate::errors::LeagueError;
use crate::stats::{compute_league_score, LeagueGameProgress, LeagueScore};

/// A league game after a scoring pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredLeagueGame {
    pub game: LeagueGame,
    pub score: LeagueScore,
    pub progress: LeagueGameProgress,
}

/// Recomputes the team totals of one league game and persists them
pub fn rescore_league_game(conn: &mut DbConn, id: &str) -> Result<ScoredLeagueGame> {
    with_transaction(conn, |conn| {
        let game = load_game(conn, id)?;
        score_and_save(conn, game)
    })
}

/// Scores every league game; used after bulk loads
pub fn rescore_all(conn: &mut DbConn) -> Result<Vec<ScoredLeagueGame>> {
    with_transaction(conn, |conn| {
        let games = database::league_games::list_all(conn)?;
        games
            .into_iter()
            .map(|game| score_and_save(conn, game))
            .collect()
    })
}

/// Takes final totals and marks the game completed.
/// Fails with `AlreadyCompleted` on a second call.
pub fn complete_league_game(conn: &mut DbConn, id: &str) -> Result<ScoredLeagueGame> {
    complete_league_game_at(conn, id, Utc::now().naive_utc())
}

pub fn complete_league_game_at(conn: &mut DbConn, id: &str, at: NaiveDateTime) -> Result<ScoredLeagueGame> {
    with_transaction(conn, |conn| {
        let mut game = load_game(conn, id)?;
        let (score, progress) = score_game(conn, &game)?;

        game.apply_score(&score);
        game.complete(at)?;
        let game = database::league_games::save_progress(conn, &game)?;

        info!(
            "League game {} completed {}-{} ({} singles, {} doubles recorded)",
            game.id, game.team_a_score, game.team_b_score, progress.singles_recorded, progress.doubles_recorded
        );
        Ok(ScoredLeagueGame { game, score, progress })
    })
}

/// Deletes a league game; its matches survive unlinked. Returns the ids of
/// the matches that lost their link.
pub fn delete_league_game(conn: &mut DbConn, id: &str) -> Result<Vec<String>> {
    with_transaction(conn, |conn| {
        let unlinked: Vec<String> = database::matches::list_by_league_game(conn, id)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if !database::league_games::delete_league_game(conn, id)? {
            return Err(LeagueError::LeagueGameNotFound(id.to_string()).into());
        }
        Ok(unlinked)
    })
}

/// Records a match result after checking that everything it names exists
pub fn record_match(conn: &mut DbConn, new_match: &NewMatch) -> Result<Match> {
    with_transaction(conn, |conn| {
        let player_ids = std::iter::once(new_match.player1_id.as_str()).chain(new_match.player2_id.as_deref());
        for player_id in player_ids {
            if database::players::find_by_id(conn, player_id)?.is_none() {
                return Err(LeagueError::PlayerNotFound(player_id.to_string()).into());
            }
        }

        if let Some(league_game_id) = &new_match.league_game_id {
            load_game(conn, league_game_id)?;
        }

        database::matches::insert_match(conn, new_match)
    })
}

fn load_game(conn: &mut DbConn, id: &str) -> Result<LeagueGame> {
    database::league_games::find_by_id(conn, id)?
        .ok_or_else(|| LeagueError::LeagueGameNotFound(id.to_string()).into())
}

fn score_game(conn: &mut DbConn, game: &LeagueGame) -> Result<(LeagueScore, LeagueGameProgress)> {
    let participants = database::participants::list_by_league_game(conn, &game.id)?;
    let matches = database::matches::list_by_league_game(conn, &game.id)?;

    let score = compute_league_score(game, &participants, &matches);
    let progress = LeagueGameProgress::from_matches(&game.id, &matches);
    Ok((score, progress))
}

fn score_and_save(conn: &mut DbConn, mut game: LeagueGame) -> Result<ScoredLeagueGame> {
    let (score, progress) = score_game(conn, &game)?;
    game.apply_score(&score);
    let game = database::league_games::save_progress(conn, &game)?;
    Ok(ScoredLeagueGame { game, score, progress })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::get_connection;
    use crate::database::connection::test_support::temp_pool;
    use crate::database::{NewLeagueGame, NewParticipant, NewPlayer};
    use crate::domain::fixtures::date;
    use crate::domain::{LeagueGameStatus, MatchType, Team};

    fn seed(conn: &mut DbConn) {
        for (id, name) in [("p1", "Alice"), ("p2", "Bob"), ("p3", "Cara"), ("p4", "Dan")] {
            database::players::insert_player(
                conn,
                &NewPlayer { id: Some(id.into()), name: name.into(), is_regular: true },
            )
            .unwrap();
        }
        database::league_games::insert_league_game(
            conn,
            &NewLeagueGame {
                id: Some("lg1".into()),
                scheduled_date: date(2026, 4, 11),
                scheduled_time: Some("10:00".into()),
                opponent_team_name: "Riverside TC".into(),
                is_home_game: true,
                description: None,
            },
        )
        .unwrap();
        let roster: Vec<NewParticipant> = [("p1", Team::A), ("p2", Team::A), ("p3", Team::B), ("p4", Team::B)]
            .into_iter()
            .map(|(player_id, team)| NewParticipant {
                league_game_id: "lg1".into(),
                player_id: player_id.into(),
                team,
            })
            .collect();
        database::participants::replace_roster(conn, "lg1", &roster).unwrap();
    }

    fn new_match(id: &str, player1: &str, player2: Option<&str>, is_win: bool) -> NewMatch {
        NewMatch {
            id: Some(id.into()),
            match_type: if player2.is_some() { MatchType::Doubles } else { MatchType::Singles },
            player1_id: player1.into(),
            player2_id: player2.map(str::to_string),
            is_win,
            match_date: date(2026, 4, 11),
            league_game_id: Some("lg1".into()),
        }
    }

    #[test]
    fn rescoring_persists_totals_and_starts_the_game() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        seed(&mut conn);
        record_match(&mut conn, &new_match("m1", "p1", None, true)).unwrap();
        record_match(&mut conn, &new_match("m2", "p3", None, true)).unwrap();
        record_match(&mut conn, &new_match("m3", "p1", Some("p2"), false)).unwrap();

        let scored = rescore_league_game(&mut conn, "lg1").unwrap();

        assert_eq!((scored.game.team_a_score, scored.game.team_b_score), (1, 2));
        assert_eq!(scored.game.status, LeagueGameStatus::InProgress);
        assert_eq!(scored.progress.singles_recorded, 2);
        assert_eq!(scored.progress.doubles_recorded, 1);

        let stored = database::league_games::find_by_id(&mut conn, "lg1").unwrap().unwrap();
        assert_eq!(stored, scored.game);
    }

    #[test]
    fn rescoring_without_matches_keeps_the_game_scheduled() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        seed(&mut conn);

        let scored = rescore_all(&mut conn).unwrap();

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].game.status, LeagueGameStatus::Scheduled);
    }

    #[test]
    fn completion_is_explicit_and_happens_once() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        seed(&mut conn);
        record_match(&mut conn, &new_match("m1", "p1", None, true)).unwrap();
        let at = date(2026, 4, 11).and_hms_opt(18, 0, 0).unwrap();

        let done = complete_league_game_at(&mut conn, "lg1", at).unwrap();
        assert_eq!(done.game.status, LeagueGameStatus::Completed);
        assert_eq!(done.game.completed_at, Some(at));
        assert_eq!(done.game.team_a_score, 1);

        let err = complete_league_game_at(&mut conn, "lg1", at).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LeagueError>(),
            Some(&LeagueError::AlreadyCompleted("lg1".into()))
        );
    }

    #[test]
    fn unknown_games_are_reported_as_not_found() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();

        let err = rescore_league_game(&mut conn, "nope").unwrap_err();
        assert_eq!(
            err.downcast_ref::<LeagueError>(),
            Some(&LeagueError::LeagueGameNotFound("nope".into()))
        );
        assert!(delete_league_game(&mut conn, "nope").is_err());
    }

    #[test]
    fn deleting_a_game_unlinks_its_matches() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        seed(&mut conn);
        record_match(&mut conn, &new_match("m1", "p1", None, true)).unwrap();

        let unlinked = delete_league_game(&mut conn, "lg1").unwrap();

        assert_eq!(unlinked, vec!["m1".to_string()]);
        let m1 = database::matches::find_by_id(&mut conn, "m1").unwrap().unwrap();
        assert_eq!(m1.league_game_id, None);
        assert!(database::participants::list_by_league_game(&mut conn, "lg1").unwrap().is_empty());
    }

    #[test]
    fn recording_rejects_unknown_players() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        seed(&mut conn);

        let err = record_match(&mut conn, &new_match("m1", "p1", Some("ghost"), true)).unwrap_err();

        assert_eq!(
            err.downcast_ref::<LeagueError>(),
            Some(&LeagueError::PlayerNotFound("ghost".into()))
        );
        assert!(database::matches::find_by_id(&mut conn, "m1").unwrap().is_none());
    }
}
