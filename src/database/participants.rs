use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::NewParticipant;
use crate::domain::Participant;

const COLUMNS: &str = "id, league_game_id, player_id, team, created_at";

pub fn add_participant(conn: &mut DbConn, participant: &NewParticipant) -> Result<Participant> {
    let sql = format!(
        "INSERT INTO league_game_participants (league_game_id, player_id, team) VALUES (?1, ?2, ?3) RETURNING {}",
        COLUMNS
    );

    conn.query_row(
        &sql,
        params![participant.league_game_id, participant.player_id, participant.team],
        parse_participant_row,
    )
    .with_context(|| {
        format!(
            "Failed to add player {} to league game {}",
            participant.player_id, participant.league_game_id
        )
    })
}

/// Replaces the whole roster of a league game
pub fn replace_roster(
    conn: &mut DbConn,
    league_game_id: &str,
    roster: &[NewParticipant],
) -> Result<Vec<Participant>> {
    conn.execute(
        "DELETE FROM league_game_participants WHERE league_game_id = ?1",
        params![league_game_id],
    )
    .context("Failed to clear league game roster")?;

    roster
        .iter()
        .map(|participant| add_participant(conn, participant))
        .collect()
}

fn parse_participant_row(row: &rusqlite::Row) -> rusqlite::Result<Participant> {
    Ok(Participant {
        id: row.get(0)?,
        league_game_id: row.get(1)?,
        player_id: row.get(2)?,
        team: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn list_by_league_game(conn: &mut DbConn, league_game_id: &str) -> Result<Vec<Participant>> {
    let sql = format!(
        "SELECT {} FROM league_game_participants WHERE league_game_id = ?1 ORDER BY team, player_id",
        COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![league_game_id], parse_participant_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Participant>> {
    let sql = format!("SELECT {} FROM league_game_participants", COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_participant_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::get_connection;
    use crate::database::connection::test_support::temp_pool;
    use crate::database::models::{NewLeagueGame, NewPlayer};
    use crate::database::{league_games, players};
    use crate::domain::fixtures::date;
    use crate::domain::Team;

    #[test]
    fn replace_roster_swaps_every_entry() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        for id in ["p1", "p2", "p3"] {
            players::insert_player(
                &mut conn,
                &NewPlayer { id: Some(id.into()), name: id.into(), is_regular: true },
            )
            .unwrap();
        }
        league_games::insert_league_game(
            &mut conn,
            &NewLeagueGame {
                id: Some("lg1".into()),
                scheduled_date: date(2026, 5, 1),
                scheduled_time: None,
                opponent_team_name: "Parkside".into(),
                is_home_game: true,
                description: None,
            },
        )
        .unwrap();
        let entry = |player: &str, team| NewParticipant {
            league_game_id: "lg1".into(),
            player_id: player.into(),
            team,
        };

        replace_roster(&mut conn, "lg1", &[entry("p1", Team::A), entry("p2", Team::B)]).unwrap();
        let roster = replace_roster(&mut conn, "lg1", &[entry("p3", Team::B)]).unwrap();

        assert_eq!(roster.len(), 1);
        let stored = list_by_league_game(&mut conn, "lg1").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].player_id, "p3");
        assert_eq!(stored[0].team, Team::B);
    }

    #[test]
    fn participant_needs_existing_league_game() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        players::insert_player(
            &mut conn,
            &NewPlayer { id: Some("p1".into()), name: "Alice".into(), is_regular: true },
        )
        .unwrap();

        let result = add_participant(
            &mut conn,
            &NewParticipant { league_game_id: "missing".into(), player_id: "p1".into(), team: Team::A },
        );

        assert!(result.is_err());
    }
}
