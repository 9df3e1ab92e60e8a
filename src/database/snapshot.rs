use anyhow::Result;

use super::connection::DbConn;
use super::{matches, players};
use crate::domain::{Match, Player, SnapshotSource};

impl SnapshotSource for DbConn {
    fn players(&mut self) -> Result<Vec<Player>> {
        players::list_all(self)
    }

    fn matches(&mut self) -> Result<Vec<Match>> {
        matches::list_all(self)
    }
}
