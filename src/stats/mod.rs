pub mod aggregation;
pub mod league_scoring;
pub mod memo;
pub mod ranking;
pub mod reconcile;
pub mod scope;
pub mod summary;
pub mod types;

pub use aggregation::{
    compute_doubles_stats, compute_doubles_stats_in_scope, compute_singles_stats,
    compute_singles_stats_in_scope,
};
pub use league_scoring::{compute_league_score, LeagueGameProgress, LeagueScore};
pub use memo::StandingsCache;
pub use reconcile::{reconcile, Discrepancy};
pub use scope::MatchScope;
pub use summary::{DashboardSummary, StatCard, StatCategory};
pub use types::{DoublesStats, PairKey, PlayerRef, Record, SinglesStats, Standings, ValidationIssue};
