use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::NewLeagueGame;
use crate::domain::LeagueGame;

const COLUMNS: &str = "id, scheduled_date, scheduled_time, opponent_team_name, is_home_game, description, status, team_a_score, team_b_score, completed_at, created_at, updated_at";

pub fn insert_league_game(conn: &mut DbConn, game: &NewLeagueGame) -> Result<LeagueGame> {
    let sql = format!(
        "INSERT INTO league_games (id, scheduled_date, scheduled_time, opponent_team_name, is_home_game, description) VALUES (COALESCE(?1, lower(hex(randomblob(16)))), ?2, ?3, ?4, ?5, ?6) RETURNING {}",
        COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            game.id,
            game.scheduled_date,
            game.scheduled_time,
            game.opponent_team_name,
            game.is_home_game,
            game.description
        ],
        parse_league_game_row,
    )
    .context("Failed to insert league game")
}

/// Refreshes schedule details only; status and scores are owned locally
pub fn upsert_league_game(conn: &mut DbConn, game: &NewLeagueGame) -> Result<LeagueGame> {
    if let Some(id) = &game.id {
        if find_by_id(conn, id)?.is_some() {
            let sql = format!(
                "UPDATE league_games SET scheduled_date = ?1, scheduled_time = ?2, opponent_team_name = ?3, is_home_game = ?4, description = ?5, updated_at = datetime('now') WHERE id = ?6 RETURNING {}",
                COLUMNS
            );
            return conn
                .query_row(
                    &sql,
                    params![
                        game.scheduled_date,
                        game.scheduled_time,
                        game.opponent_team_name,
                        game.is_home_game,
                        game.description,
                        id
                    ],
                    parse_league_game_row,
                )
                .context("Failed to update league game");
        }
    }

    insert_league_game(conn, game)
}

/// Persists status, scores and completion time
pub fn save_progress(conn: &mut DbConn, game: &LeagueGame) -> Result<LeagueGame> {
    let sql = format!(
        "UPDATE league_games SET status = ?1, team_a_score = ?2, team_b_score = ?3, completed_at = ?4, updated_at = datetime('now') WHERE id = ?5 RETURNING {}",
        COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            game.status,
            game.team_a_score,
            game.team_b_score,
            game.completed_at,
            game.id
        ],
        parse_league_game_row,
    )
    .with_context(|| format!("Failed to save league game {}", game.id))
}

/// Participants go with the game; linked matches stay with a null link.
/// Returns whether a row was deleted.
pub fn delete_league_game(conn: &mut DbConn, id: &str) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM league_games WHERE id = ?1", params![id])
        .context("Failed to delete league game")?;
    Ok(deleted > 0)
}

fn parse_league_game_row(row: &rusqlite::Row) -> rusqlite::Result<LeagueGame> {
    Ok(LeagueGame {
        id: row.get(0)?,
        scheduled_date: row.get(1)?,
        scheduled_time: row.get(2)?,
        opponent_team_name: row.get(3)?,
        is_home_game: row.get(4)?,
        description: row.get(5)?,
        status: row.get(6)?,
        team_a_score: row.get(7)?,
        team_b_score: row.get(8)?,
        completed_at: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<LeagueGame>> {
    let sql = format!("SELECT {} FROM league_games WHERE id = ?1", COLUMNS);

    conn.query_row(&sql, params![id], parse_league_game_row)
        .optional()
        .context("Failed to query league game by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<LeagueGame>> {
    let sql = format!(
        "SELECT {} FROM league_games ORDER BY scheduled_date, id",
        COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_league_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
