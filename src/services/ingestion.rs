use anyhow::Result;
use log::{info, warn};
use std::collections::HashSet;

use crate::api::{Resource, RosterEntry, UpstreamClient, UpstreamSnapshot};
use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::database::{self, with_transaction, DbConn, NewParticipant};

/// Row counts of one load into SQLite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub players: usize,
    pub league_games: usize,
    pub participants: usize,
    pub matches: usize,
    pub skipped: usize,
}

pub struct IngestionService {
    config: AppConfig,
    cache: Cache,
    client: UpstreamClient,
}

impl IngestionService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.storage.cache_dir)?,
            client: UpstreamClient::new(&config.upstream)?,
            config,
        })
    }

    pub async fn run(&self) -> Result<IngestReport> {
        info!("=== Starting Data Ingestion ===\n");

        // Step 1: Fetch everything upstream serves
        let snapshot = self.fetch_snapshot().await?;
        info!(
            "  → Fetched {} players, {} matches, {} league games\n",
            snapshot.players.len(),
            snapshot.matches.len(),
            snapshot.league_games.len()
        );

        // Step 2: Keep the pre-aggregated leaderboards for reconciliation
        self.save_parsed_cache(&snapshot)?;
        info!("  → Saved upstream stats to parsed cache\n");

        // Step 3: Load into the database
        let report = self.load_into_database(&snapshot)?;
        info!(
            "  → Loaded {} players, {} league games ({} roster entries), {} matches; skipped {}\n",
            report.players, report.league_games, report.participants, report.matches, report.skipped
        );

        info!("=== Ingestion Complete ===");
        Ok(report)
    }

    async fn fetch_snapshot(&self) -> Result<UpstreamSnapshot> {
        info!("Step 1: Fetching upstream snapshot from {}...", self.config.upstream.base_url);
        self.client.fetch_snapshot(&self.cache).await
    }

    fn save_parsed_cache(&self, snapshot: &UpstreamSnapshot) -> Result<()> {
        info!("Step 2: Saving parsed upstream stats...");

        if let Some(singles) = &snapshot.singles_stats {
            self.cache.save_parsed(Resource::SinglesStats.cache_key(), singles)?;
        }
        if let Some(doubles) = &snapshot.doubles_stats {
            self.cache.save_parsed(Resource::DoublesStats.cache_key(), doubles)?;
        }
        Ok(())
    }

    fn load_into_database(&self, snapshot: &UpstreamSnapshot) -> Result<IngestReport> {
        info!("Step 3: Loading snapshot into {}...", self.config.storage.database_path);

        let pool = database::create_pool(&self.config.storage.database_path)?;
        let mut conn = database::get_connection(&pool)?;
        database::setup::create_schema(&mut conn)?;

        load_snapshot(&mut conn, snapshot)
    }
}

/// Upserts a snapshot in one transaction. Rows that break a reference
/// (unknown player or league game) are skipped with a warning.
pub fn load_snapshot(conn: &mut DbConn, snapshot: &UpstreamSnapshot) -> Result<IngestReport> {
    with_transaction(conn, |conn| {
        let mut report = IngestReport::default();

        for player in &snapshot.players {
            database::players::upsert_player(conn, player)?;
            report.players += 1;
        }

        let known_players: HashSet<String> = database::players::list_all(conn)?
            .into_iter()
            .map(|p| p.id)
            .collect();

        for entry in &snapshot.league_games {
            let game = database::league_games::upsert_league_game(conn, &entry.game)?;
            let roster = build_roster(&game.id, &entry.participants, &known_players, &mut report);
            report.participants += database::participants::replace_roster(conn, &game.id, &roster)?.len();
            report.league_games += 1;
        }

        for m in &snapshot.matches {
            match database::matches::upsert_match(conn, m) {
                Ok(_) => report.matches += 1,
                Err(e) => {
                    warn!("Skipping match {}: {:#}", m.id.as_deref().unwrap_or("<new>"), e);
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    })
}

fn build_roster(
    league_game_id: &str,
    entries: &[RosterEntry],
    known_players: &HashSet<String>,
    report: &mut IngestReport,
) -> Vec<NewParticipant> {
    entries
        .iter()
        .filter(|entry| {
            let known = known_players.contains(&entry.player_id);
            if !known {
                warn!("Skipping unknown player {} on league game {} roster", entry.player_id, league_game_id);
                report.skipped += 1;
            }
            known
        })
        .map(|entry| NewParticipant {
            league_game_id: league_game_id.to_string(),
            player_id: entry.player_id.clone(),
            team: entry.team,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_resource;
    use crate::database::connection::get_connection;
    use crate::database::connection::test_support::temp_pool;
    use crate::config::settings::ScoringSettings;
    use crate::domain::Team;
    use crate::stats::compute_singles_stats;
    use serde_json::json;

    fn upstream() -> UpstreamSnapshot {
        UpstreamSnapshot {
            players: parse_resource(
                Resource::Players,
                json!([{"id": "p1", "name": "Alice"}, {"id": "p2", "name": "Bob", "isRegular": false}]),
            )
            .unwrap(),
            league_games: parse_resource(
                Resource::LeagueGames,
                json!([{
                    "id": "lg1",
                    "scheduledDate": "2026-04-11",
                    "opponentTeamName": "Riverside TC",
                    "participants": [
                        {"playerId": "p1", "team": "A"},
                        {"playerId": "p2", "team": "B"},
                        {"playerId": "ghost", "team": "B"}
                    ]
                }]),
            )
            .unwrap(),
            matches: parse_resource(
                Resource::Matches,
                json!([
                    {"id": "m1", "type": "singles", "player1Id": "p1", "isWin": true,
                     "matchDate": "2026-04-11", "leagueGameId": "lg1"},
                    {"id": "m2", "type": "singles", "player1Id": "ghost", "isWin": false,
                     "matchDate": "2026-04-11"}
                ]),
            )
            .unwrap(),
            singles_stats: None,
            doubles_stats: None,
        }
    }

    #[test]
    fn loads_rows_and_skips_broken_references() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();

        let report = load_snapshot(&mut conn, &upstream()).unwrap();

        assert_eq!(
            report,
            IngestReport { players: 2, league_games: 1, participants: 2, matches: 1, skipped: 2 }
        );
        let roster = database::participants::list_by_league_game(&mut conn, "lg1").unwrap();
        assert_eq!(roster.iter().map(|p| p.team).collect::<Vec<_>>(), vec![Team::A, Team::B]);
        assert!(database::matches::find_by_id(&mut conn, "m2").unwrap().is_none());
    }

    #[test]
    fn reloading_the_same_snapshot_is_idempotent() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();

        load_snapshot(&mut conn, &upstream()).unwrap();
        load_snapshot(&mut conn, &upstream()).unwrap();

        assert_eq!(database::players::list_all(&mut conn).unwrap().len(), 2);
        assert_eq!(database::matches::list_all(&mut conn).unwrap().len(), 1);
        assert_eq!(database::participants::list_all(&mut conn).unwrap().len(), 2);
    }

    #[test]
    fn reload_keeps_local_scores() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        load_snapshot(&mut conn, &upstream()).unwrap();
        crate::services::league_games::rescore_league_game(&mut conn, "lg1").unwrap();

        load_snapshot(&mut conn, &upstream()).unwrap();

        let game = database::league_games::find_by_id(&mut conn, "lg1").unwrap().unwrap();
        assert_eq!(game.team_a_score, 1);
    }

    #[test]
    fn reloading_matches_without_ids_does_not_duplicate_them() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        let snapshot = UpstreamSnapshot {
            matches: parse_resource(
                Resource::Matches,
                json!([{"type": "singles", "player1Id": "p1", "isWin": true, "matchDate": "2026-03-01"}]),
            )
            .unwrap(),
            ..upstream()
        };

        load_snapshot(&mut conn, &snapshot).unwrap();
        let report = load_snapshot(&mut conn, &snapshot).unwrap();

        assert_eq!(report.matches, 1);
        let stored = database::matches::list_all(&mut conn).unwrap();
        assert_eq!(stored.len(), 1);
        let players = database::players::list_all(&mut conn).unwrap();
        let standings = compute_singles_stats(&players, &stored, &ScoringSettings::default());
        let alice = standings.entries.iter().find(|e| e.player.id == "p1").unwrap();
        assert_eq!(alice.wins, 1);
    }
}
