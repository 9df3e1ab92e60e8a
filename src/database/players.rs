use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::NewPlayer;
use crate::domain::Player;
use crate::errors::LeagueError;

const COLUMNS: &str = "id, name, is_regular, created_at";

pub fn insert_player(conn: &mut DbConn, player: &NewPlayer) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (id, name, is_regular) VALUES (COALESCE(?1, lower(hex(randomblob(16)))), ?2, ?3) RETURNING {}",
        COLUMNS
    );

    conn.query_row(&sql, params![player.id, player.name, player.is_regular], parse_player_row)
        .context("Failed to insert new player")
}

/// Insert or refresh a player coming from the upstream snapshot
pub fn upsert_player(conn: &mut DbConn, player: &NewPlayer) -> Result<Player> {
    if let Some(id) = &player.id {
        if let Some(existing) = find_by_id(conn, id)? {
            if existing.name == player.name && existing.is_regular == player.is_regular {
                return Ok(existing);
            }
            let sql = format!(
                "UPDATE players SET name = ?1, is_regular = ?2 WHERE id = ?3 RETURNING {}",
                COLUMNS
            );
            return conn
                .query_row(&sql, params![player.name, player.is_regular, id], parse_player_row)
                .context("Failed to update player");
        }
    }

    insert_player(conn, player)
}

pub fn rename_player(conn: &mut DbConn, id: &str, name: &str) -> Result<Player> {
    let sql = format!("UPDATE players SET name = ?1 WHERE id = ?2 RETURNING {}", COLUMNS);

    conn.query_row(&sql, params![name, id], parse_player_row)
        .optional()
        .context("Failed to rename player")?
        .ok_or_else(|| LeagueError::PlayerNotFound(id.to_string()).into())
}

/// Rejects the delete while any match or roster entry still points at the player
pub fn delete_player(conn: &mut DbConn, id: &str) -> Result<()> {
    let references = count_references(conn, id)?;
    if references > 0 {
        return Err(LeagueError::PlayerInUse {
            id: id.to_string(),
            references,
        }
        .into());
    }

    let deleted = conn
        .execute("DELETE FROM players WHERE id = ?1", params![id])
        .context("Failed to delete player")?;
    if deleted == 0 {
        return Err(LeagueError::PlayerNotFound(id.to_string()).into());
    }
    Ok(())
}

fn count_references(conn: &mut DbConn, id: &str) -> Result<i64> {
    let sql = "
        SELECT
            (SELECT COUNT(*) FROM matches WHERE player1_id = ?1 OR player2_id = ?1)
          + (SELECT COUNT(*) FROM league_game_participants WHERE player_id = ?1)
    ";

    conn.query_row(sql, params![id], |row| row.get(0))
        .context("Failed to count player references")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        is_regular: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Player>> {
    let sql = format!("SELECT {} FROM players WHERE id = ?1", COLUMNS);

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = format!("SELECT {} FROM players ORDER BY name, id", COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
