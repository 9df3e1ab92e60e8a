use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::types::{DoublesStats, Record, SinglesStats};

/// Leaderboard entry that can be matched across two sources
pub trait Ranked {
    fn key(&self) -> String;
    fn tally(&self) -> Record;
}

impl Ranked for SinglesStats {
    fn key(&self) -> String {
        self.player.id.clone()
    }

    fn tally(&self) -> Record {
        self.record()
    }
}

impl Ranked for DoublesStats {
    fn key(&self) -> String {
        self.pair_key().to_string()
    }

    fn tally(&self) -> Record {
        self.record()
    }
}

/// Difference between the local leaderboard and the upstream one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Discrepancy {
    MissingUpstream { key: String },
    MissingLocally { key: String },
    #[serde(rename_all = "camelCase")]
    RecordMismatch { key: String, local: Record, upstream: Record },
    #[serde(rename_all = "camelCase")]
    RankMismatch { key: String, local_rank: usize, upstream_rank: usize },
}

/// Compares two ranked sequences entry by entry. Ranks are 1-based.
pub fn reconcile<T: Ranked>(local: &[T], upstream: &[T]) -> Vec<Discrepancy> {
    let upstream_index: HashMap<String, (usize, Record)> = upstream
        .iter()
        .enumerate()
        .map(|(idx, entry)| (entry.key(), (idx + 1, entry.tally())))
        .collect();

    let mut discrepancies = Vec::new();
    let mut seen = HashSet::with_capacity(local.len());

    for (idx, entry) in local.iter().enumerate() {
        let key = entry.key();
        let local_rank = idx + 1;

        match upstream_index.get(&key) {
            None => discrepancies.push(Discrepancy::MissingUpstream { key: key.clone() }),
            Some(&(upstream_rank, upstream_record)) => {
                let local_record = entry.tally();
                if local_record != upstream_record {
                    discrepancies.push(Discrepancy::RecordMismatch {
                        key: key.clone(),
                        local: local_record,
                        upstream: upstream_record,
                    });
                } else if local_rank != upstream_rank {
                    discrepancies.push(Discrepancy::RankMismatch {
                        key: key.clone(),
                        local_rank,
                        upstream_rank,
                    });
                }
            }
        }
        seen.insert(key);
    }

    for entry in upstream {
        let key = entry.key();
        if !seen.contains(&key) {
            discrepancies.push(Discrepancy::MissingLocally { key });
        }
    }

    discrepancies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::types::PlayerRef;

    fn player(id: &str) -> PlayerRef {
        PlayerRef { id: id.into(), name: id.into() }
    }

    fn single(id: &str, wins: i32, losses: i32) -> SinglesStats {
        SinglesStats::new(player(id), Record { wins, losses, points: wins })
    }

    #[test]
    fn identical_leaderboards_have_no_discrepancies() {
        let board = vec![single("p1", 3, 0), single("p2", 1, 2)];
        assert!(reconcile(&board, &board.clone()).is_empty());
    }

    #[test]
    fn reports_missing_and_mismatched_entries() {
        let local = vec![single("p1", 3, 0), single("p2", 1, 2)];
        let upstream = vec![single("p1", 2, 0), single("p3", 1, 0)];

        let found = reconcile(&local, &upstream);

        assert_eq!(
            found,
            vec![
                Discrepancy::RecordMismatch {
                    key: "p1".into(),
                    local: Record { wins: 3, losses: 0, points: 3 },
                    upstream: Record { wins: 2, losses: 0, points: 2 },
                },
                Discrepancy::MissingUpstream { key: "p2".into() },
                Discrepancy::MissingLocally { key: "p3".into() },
            ]
        );
    }

    #[test]
    fn reports_rank_differences_for_equal_records() {
        let local = vec![single("p1", 1, 0), single("p2", 1, 0)];
        let upstream = vec![single("p2", 1, 0), single("p1", 1, 0)];

        let found = reconcile(&local, &upstream);

        assert_eq!(found.len(), 2);
        assert!(matches!(found[0], Discrepancy::RankMismatch { local_rank: 1, upstream_rank: 2, .. }));
    }

    #[test]
    fn doubles_match_regardless_of_player_order() {
        let record = Record { wins: 2, losses: 1, points: 2 };
        let local = vec![DoublesStats::new(player("a"), player("b"), record)];
        let upstream = vec![DoublesStats::new(player("b"), player("a"), record)];

        assert!(reconcile(&local, &upstream).is_empty());
    }

    #[test]
    fn every_upstream_only_entry_is_reported_in_upstream_order() {
        let local = vec![single("p2", 1, 0)];
        let upstream = vec![single("p5", 4, 0), single("p2", 1, 0), single("p4", 2, 1), single("p3", 0, 1)];

        let missing: Vec<Discrepancy> = reconcile(&local, &upstream)
            .into_iter()
            .filter(|d| matches!(d, Discrepancy::MissingLocally { .. }))
            .collect();

        assert_eq!(
            missing,
            vec![
                Discrepancy::MissingLocally { key: "p5".into() },
                Discrepancy::MissingLocally { key: "p4".into() },
                Discrepancy::MissingLocally { key: "p3".into() },
            ]
        );
    }
}
