pub mod handlers;
pub mod models;
pub mod routes;
mod upstream_client;

pub use upstream_client::{
    parse_resource, Resource, RosterEntry, UpstreamClient, UpstreamLeagueGame, UpstreamSnapshot,
};
