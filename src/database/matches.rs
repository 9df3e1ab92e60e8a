use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::NewMatch;
use crate::domain::Match;

const COLUMNS: &str = "id, type, player1_id, player2_id, is_win, match_date, league_game_id, created_at";

pub fn insert_match(conn: &mut DbConn, m: &NewMatch) -> Result<Match> {
    let sql = format!(
        "INSERT INTO matches (id, type, player1_id, player2_id, is_win, match_date, league_game_id) VALUES (COALESCE(?1, lower(hex(randomblob(16)))), ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {}",
        COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            m.id,
            m.match_type,
            m.player1_id,
            m.player2_id,
            m.is_win,
            m.match_date,
            m.league_game_id
        ],
        parse_match_row,
    )
    .context("Failed to insert match")
}

/// Matches are immutable once recorded; re-ingesting a known match only relinks it.
/// Without an id, a stored match with the same type, players, outcome and date is
/// the same match.
pub fn upsert_match(conn: &mut DbConn, m: &NewMatch) -> Result<Match> {
    let existing = match &m.id {
        Some(id) => find_by_id(conn, id)?,
        None => find_equivalent(conn, m)?,
    };

    match existing {
        Some(stored) => relink_league_game(conn, &stored.id, m.league_game_id.as_deref()),
        None => insert_match(conn, m),
    }
}

fn find_equivalent(conn: &mut DbConn, m: &NewMatch) -> Result<Option<Match>> {
    let sql = format!(
        "SELECT {} FROM matches WHERE type = ?1 AND player1_id = ?2 AND player2_id IS ?3 AND is_win = ?4 AND match_date = ?5 ORDER BY created_at, id LIMIT 1",
        COLUMNS
    );

    conn.query_row(
        &sql,
        params![m.match_type, m.player1_id, m.player2_id, m.is_win, m.match_date],
        parse_match_row,
    )
    .optional()
    .context("Failed to query equivalent match")
}

pub fn relink_league_game(
    conn: &mut DbConn,
    match_id: &str,
    league_game_id: Option<&str>,
) -> Result<Match> {
    let sql = format!(
        "UPDATE matches SET league_game_id = ?1 WHERE id = ?2 RETURNING {}",
        COLUMNS
    );

    conn.query_row(&sql, params![league_game_id, match_id], parse_match_row)
        .with_context(|| format!("Failed to relink match {}", match_id))
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        match_type: row.get(1)?,
        player1_id: row.get(2)?,
        player2_id: row.get(3)?,
        is_win: row.get(4)?,
        match_date: row.get(5)?,
        league_game_id: row.get(6)?,
        created_at: row.get(7)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Match>> {
    let sql = format!("SELECT {} FROM matches WHERE id = ?1", COLUMNS);

    conn.query_row(&sql, params![id], parse_match_row)
        .optional()
        .context("Failed to query match by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Match>> {
    let sql = format!("SELECT {} FROM matches ORDER BY match_date, id", COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_league_game(conn: &mut DbConn, league_game_id: &str) -> Result<Vec<Match>> {
    let sql = format!(
        "SELECT {} FROM matches WHERE league_game_id = ?1 ORDER BY match_date, id",
        COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![league_game_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
