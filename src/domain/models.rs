use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LeagueError;

pub type PlayerId = String;

fn default_true() -> bool {
    true
}

/// League player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_regular: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Singles,
    Doubles,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Singles => "singles",
            MatchType::Doubles => "doubles",
        }
    }
}

impl FromStr for MatchType {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "singles" => Ok(MatchType::Singles),
            "doubles" => Ok(MatchType::Doubles),
            other => Err(invalid("match type", other)),
        }
    }
}

/// Recorded match result.
///
/// `is_win` is the outcome for `player1_id`'s side. In doubles `player2_id`
/// is player1's partner and shares the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    #[serde(rename = "type")]
    pub match_type: MatchType,
    pub player1_id: PlayerId,
    #[serde(default)]
    pub player2_id: Option<PlayerId>,
    pub is_win: bool,
    pub match_date: NaiveDate,
    #[serde(default)]
    pub league_game_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Match {
    pub fn is_singles(&self) -> bool {
        self.match_type == MatchType::Singles
    }

    pub fn is_doubles(&self) -> bool {
        self.match_type == MatchType::Doubles
    }

    pub fn belongs_to(&self, league_game_id: &str) -> bool {
        self.league_game_id.as_deref() == Some(league_game_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueGameStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl LeagueGameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueGameStatus::Scheduled => "scheduled",
            LeagueGameStatus::InProgress => "in_progress",
            LeagueGameStatus::Completed => "completed",
        }
    }
}

impl FromStr for LeagueGameStatus {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(LeagueGameStatus::Scheduled),
            "in_progress" => Ok(LeagueGameStatus::InProgress),
            "completed" => Ok(LeagueGameStatus::Completed),
            other => Err(invalid("league game status", other)),
        }
    }
}

/// A scheduled team fixture (6 singles + 3 doubles by convention)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueGame {
    pub id: String,
    pub scheduled_date: NaiveDate,
    /// HH:MM
    pub scheduled_time: Option<String>,
    pub opponent_team_name: String,
    pub is_home_game: bool,
    pub description: Option<String>,
    pub status: LeagueGameStatus,
    pub team_a_score: i32,
    pub team_b_score: i32,
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl LeagueGame {
    pub fn is_completed(&self) -> bool {
        self.status == LeagueGameStatus::Completed
    }

    /// Explicit completion. Scores alone never complete a game.
    pub fn complete(&mut self, at: NaiveDateTime) -> Result<(), LeagueError> {
        if self.is_completed() {
            return Err(LeagueError::AlreadyCompleted(self.id.clone()));
        }
        self.status = LeagueGameStatus::Completed;
        self.completed_at = Some(at);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }

    pub fn opponent(&self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl FromStr for Team {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Team::A),
            "B" => Ok(Team::B),
            other => Err(invalid("team", other)),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roster entry of a league game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub league_game_id: String,
    pub player_id: PlayerId,
    pub team: Team,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Viewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Viewer => "viewer",
        }
    }
}

impl FromStr for UserRole {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "viewer" => Ok(UserRole::Viewer),
            other => Err(invalid("user role", other)),
        }
    }
}

/// Application user, authenticated elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

fn invalid(kind: &'static str, value: &str) -> LeagueError {
    LeagueError::InvalidEnum {
        kind,
        value: value.to_string(),
    }
}
