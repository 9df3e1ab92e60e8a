//! Builders shared by unit tests

use chrono::NaiveDate;

use super::models::*;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn player(id: &str, name: &str) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        is_regular: true,
        created_at: None,
    }
}

pub fn singles(id: &str, player1: &str, is_win: bool) -> Match {
    Match {
        id: id.to_string(),
        match_type: MatchType::Singles,
        player1_id: player1.to_string(),
        player2_id: None,
        is_win,
        match_date: date(2026, 3, 1),
        league_game_id: None,
        created_at: None,
    }
}

pub fn doubles(id: &str, player1: &str, player2: Option<&str>, is_win: bool) -> Match {
    Match {
        match_type: MatchType::Doubles,
        player2_id: player2.map(str::to_string),
        ..singles(id, player1, is_win)
    }
}

pub fn in_game(mut m: Match, league_game_id: &str) -> Match {
    m.league_game_id = Some(league_game_id.to_string());
    m
}

pub fn on(mut m: Match, match_date: NaiveDate) -> Match {
    m.match_date = match_date;
    m
}

pub fn league_game(id: &str) -> LeagueGame {
    LeagueGame {
        id: id.to_string(),
        scheduled_date: date(2026, 3, 1),
        scheduled_time: Some("19:30".to_string()),
        opponent_team_name: "Riverside TC".to_string(),
        is_home_game: true,
        description: None,
        status: LeagueGameStatus::Scheduled,
        team_a_score: 0,
        team_b_score: 0,
        completed_at: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn participant(league_game_id: &str, player_id: &str, team: Team) -> Participant {
    Participant {
        id: format!("{}-{}", league_game_id, player_id),
        league_game_id: league_game_id.to_string(),
        player_id: player_id.to_string(),
        team,
        created_at: None,
    }
}
