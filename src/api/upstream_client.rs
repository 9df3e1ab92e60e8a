use anyhow::{Context, Result};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::settings::UpstreamSettings;
use crate::database::{NewLeagueGame, NewMatch, NewPlayer};
use crate::domain::Team;
use crate::errors::parse_context;
use crate::http::HttpClient;
use crate::stats::{DoublesStats, SinglesStats};

/// Collections served by the upstream stats service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Players,
    Matches,
    LeagueGames,
    SinglesStats,
    DoublesStats,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Players => "players",
            Resource::Matches => "matches",
            Resource::LeagueGames => "league-games",
            Resource::SinglesStats => "stats/singles",
            Resource::DoublesStats => "stats/doubles",
        }
    }

    pub fn cache_key(&self) -> &'static str {
        match self {
            Resource::Players => "players",
            Resource::Matches => "matches",
            Resource::LeagueGames => "league_games",
            Resource::SinglesStats => "singles_stats",
            Resource::DoublesStats => "doubles_stats",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub player_id: String,
    pub team: Team,
}

/// League game as served upstream, with its roster inline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamLeagueGame {
    #[serde(flatten)]
    pub game: NewLeagueGame,
    #[serde(default)]
    pub participants: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSnapshot {
    pub players: Vec<NewPlayer>,
    pub matches: Vec<NewMatch>,
    pub league_games: Vec<UpstreamLeagueGame>,
    /// Pre-aggregated leaderboards, when the service provides them
    pub singles_stats: Option<Vec<SinglesStats>>,
    pub doubles_stats: Option<Vec<DoublesStats>>,
}

/// Client for the upstream stats service
pub struct UpstreamClient {
    client: HttpClient,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        let client = HttpClient::new(settings.user_agent, settings.timeout_secs)?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    /// Fetch every collection. Players, matches and league games are
    /// required; the pre-aggregated stats are optional.
    pub async fn fetch_snapshot(&self, cache: &Cache) -> Result<UpstreamSnapshot> {
        let players = self.fetch(Resource::Players, cache).await?;
        let matches = self.fetch(Resource::Matches, cache).await?;
        let league_games = self.fetch(Resource::LeagueGames, cache).await?;
        let singles_stats = self.fetch_optional(Resource::SinglesStats, cache).await;
        let doubles_stats = self.fetch_optional(Resource::DoublesStats, cache).await;

        Ok(UpstreamSnapshot {
            players,
            matches,
            league_games,
            singles_stats,
            doubles_stats,
        })
    }

    /// Fetch one collection, keeping the raw body in the cache
    pub async fn fetch<T: DeserializeOwned>(&self, resource: Resource, cache: &Cache) -> Result<T> {
        let url = build_url(&self.base_url, resource.path());
        info!("Fetching {} from {}", resource.path(), url);

        let value = self.client.get_json(&url).await?;

        if let Err(e) = cache.save_raw(resource.cache_key(), &value) {
            warn!("Failed to save {} to cache: {:?}", resource.cache_key(), e);
        }

        parse_resource(resource, value)
    }

    async fn fetch_optional<T: DeserializeOwned>(&self, resource: Resource, cache: &Cache) -> Option<T> {
        match self.fetch(resource, cache).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Upstream {} unavailable, continuing without it: {:#}", resource.path(), e);
                None
            }
        }
    }
}

pub fn parse_resource<T: DeserializeOwned>(resource: Resource, value: Value) -> Result<T> {
    serde_json::from_value(value).with_context(|| parse_context(resource.cache_key()))
}

fn build_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}
