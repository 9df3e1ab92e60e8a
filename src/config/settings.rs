use log::warn;
use std::str::FromStr;

/// Points awarded per recorded match outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringSettings {
    pub points_per_win: i32,
    pub points_per_loss: i32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            points_per_win: 1,
            points_per_loss: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            user_agent: "LeagueStats/1.0",
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
    pub cache_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: "league_stats.db".to_string(),
            cache_dir: "cache".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    /// How many leaderboard entries the CLI prints
    pub top_n: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { top_n: 3 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub scoring: ScoringSettings,
    pub upstream: UpstreamSettings,
    pub storage: StorageSettings,
    pub display: DisplaySettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `DATABASE_PATH`, `CACHE_DIR`, `UPSTREAM_BASE_URL`,
    /// `POINTS_PER_WIN` and `POINTS_PER_LOSS`
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.storage.database_path = path;
        }
        if let Ok(dir) = std::env::var("CACHE_DIR") {
            config.storage.cache_dir = dir;
        }
        if let Ok(url) = std::env::var("UPSTREAM_BASE_URL") {
            config.upstream.base_url = url;
        }

        config.scoring.points_per_win = parse_or(
            "POINTS_PER_WIN",
            std::env::var("POINTS_PER_WIN").ok(),
            config.scoring.points_per_win,
        );
        config.scoring.points_per_loss = parse_or(
            "POINTS_PER_LOSS",
            std::env::var("POINTS_PER_LOSS").ok(),
            config.scoring.points_per_loss,
        );

        config
    }
}

fn parse_or<T: FromStr + Copy>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, keeping default", name, value);
            default
        }),
    }
}
