use anyhow::Result;
use log::{info, warn};

use crate::api::Resource;
use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::database::{self, DbConn};
use crate::domain::{LeagueGameStatus, SnapshotSource};
use crate::services::league_games::{self, ScoredLeagueGame};
use crate::stats::{
    compute_doubles_stats, compute_singles_stats, reconcile, DashboardSummary, Discrepancy,
    DoublesStats, SinglesStats, Standings,
};

/// Everything one processing pass produced
#[derive(Debug)]
pub struct ProcessReport {
    pub summary: DashboardSummary,
    pub singles: Standings<SinglesStats>,
    pub doubles: Standings<DoublesStats>,
    pub league_games: Vec<ScoredLeagueGame>,
    pub discrepancies: Vec<Discrepancy>,
}

pub struct ProcessingService {
    config: AppConfig,
    cache: Cache,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.storage.cache_dir)?,
            config,
        })
    }

    pub fn run(&self) -> Result<ProcessReport> {
        info!("=== Starting Data Processing ===\n");
        info!("Database: {}", self.config.storage.database_path);

        let pool = database::create_pool(&self.config.storage.database_path)?;
        let mut conn = database::get_connection(&pool)?;
        database::setup::create_schema(&mut conn)?;

        let report = self.process(&mut conn)?;

        info!("=== Processing Complete ===");
        Ok(report)
    }

    pub fn process(&self, conn: &mut DbConn) -> Result<ProcessReport> {
        // Step 1: Snapshot
        let snapshot = conn.snapshot()?;
        let summary = DashboardSummary::from_snapshot(&snapshot);
        for card in summary.cards() {
            info!("  {}: {}", card.label(), card.value());
        }
        info!("");

        // Step 2: Leaderboards
        let scoring = &self.config.scoring;
        let singles = compute_singles_stats(&snapshot.players, &snapshot.matches, scoring);
        let doubles = compute_doubles_stats(&snapshot.players, &snapshot.matches, scoring);
        self.log_singles(&singles);
        self.log_doubles(&doubles);

        // Step 3: League games
        let scored = league_games::rescore_all(conn)?;
        for entry in &scored {
            info!(
                "  {} vs {}: {}-{} ({:?}, {}/{} singles, {}/{} doubles)",
                entry.game.scheduled_date,
                entry.game.opponent_team_name,
                entry.game.team_a_score,
                entry.game.team_b_score,
                entry.game.status,
                entry.progress.singles_recorded,
                entry.progress.expected_singles,
                entry.progress.doubles_recorded,
                entry.progress.expected_doubles
            );
            if entry.game.status == LeagueGameStatus::Completed && !entry.progress.is_fully_recorded() {
                warn!("  League game {} is completed with results still missing", entry.game.id);
            }
        }
        info!("  → Rescored {} league games\n", scored.len());

        // Step 4: Reconcile with upstream
        let discrepancies = self.reconcile_with_upstream(&singles, &doubles)?;
        for discrepancy in &discrepancies {
            warn!("  Upstream mismatch: {:?}", discrepancy);
        }
        info!("  → {} discrepancies with upstream stats\n", discrepancies.len());

        Ok(ProcessReport {
            summary,
            singles,
            doubles,
            league_games: scored,
            discrepancies,
        })
    }

    fn log_singles(&self, singles: &Standings<SinglesStats>) {
        info!("Top singles ({} ranked):", singles.len());
        for (i, entry) in singles.top(self.config.display.top_n).iter().enumerate() {
            info!(
                "  {:>2}. {} ({}W {}L, {} pts)",
                i + 1,
                entry.player.name,
                entry.wins,
                entry.losses,
                entry.points
            );
        }
        info!("  → {} singles issues\n", singles.issues.len());
    }

    fn log_doubles(&self, doubles: &Standings<DoublesStats>) {
        info!("Top doubles ({} ranked):", doubles.len());
        for (i, entry) in doubles.top(self.config.display.top_n).iter().enumerate() {
            info!(
                "  {:>2}. {} & {} ({}W {}L, {} pts)",
                i + 1,
                entry.player1.name,
                entry.player2.name,
                entry.wins,
                entry.losses,
                entry.points
            );
        }
        info!("  → {} doubles issues\n", doubles.issues.len());
    }

    fn reconcile_with_upstream(
        &self,
        singles: &Standings<SinglesStats>,
        doubles: &Standings<DoublesStats>,
    ) -> Result<Vec<Discrepancy>> {
        let mut discrepancies = Vec::new();

        match self.cache.load_parsed::<Vec<SinglesStats>>(Resource::SinglesStats.cache_key())? {
            Some(upstream) => discrepancies.extend(reconcile(&singles.entries, &upstream)),
            None => info!("  No upstream singles stats cached, skipping"),
        }
        match self.cache.load_parsed::<Vec<DoublesStats>>(Resource::DoublesStats.cache_key())? {
            Some(upstream) => discrepancies.extend(reconcile(&doubles.entries, &upstream)),
            None => info!("  No upstream doubles stats cached, skipping"),
        }

        Ok(discrepancies)
    }
}
