pub mod connection;
pub mod league_games;
pub mod matches;
pub mod models;
pub mod participants;
pub mod players;
pub mod setup;
mod snapshot;
pub mod users;

pub use connection::{create_pool, get_connection, with_transaction, DbConn, DbPool};
pub use models::*;
