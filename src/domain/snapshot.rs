use anyhow::Result;

use super::models::{Match, Player};

/// Point-in-time copy of the data the aggregation engine reads
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
}

impl Snapshot {
    pub fn new(players: Vec<Player>, matches: Vec<Match>) -> Self {
        Self { players, matches }
    }

    pub fn singles_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_singles()).count()
    }

    pub fn doubles_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_doubles()).count()
    }
}

/// Read side of the match repository
pub trait SnapshotSource {
    fn players(&mut self) -> Result<Vec<Player>>;

    fn matches(&mut self) -> Result<Vec<Match>>;

    fn snapshot(&mut self) -> Result<Snapshot> {
        let players = self.players()?;
        let matches = self.matches()?;
        Ok(Snapshot::new(players, matches))
    }
}

impl SnapshotSource for Snapshot {
    fn players(&mut self) -> Result<Vec<Player>> {
        Ok(self.players.clone())
    }

    fn matches(&mut self) -> Result<Vec<Match>> {
        Ok(self.matches.clone())
    }
}
