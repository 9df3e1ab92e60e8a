pub mod ingestion;
pub mod league_games;
pub mod processing;
pub mod server;
