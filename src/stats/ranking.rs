// Leaderboard ordering: points desc, then wins desc, then identity asc.
// The identity key makes the order total, so equal tallies never swap.

use std::cmp::Ordering;

use super::types::{DoublesStats, SinglesStats};

pub fn compare_singles(a: &SinglesStats, b: &SinglesStats) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.player.id.cmp(&b.player.id))
}

pub fn compare_doubles(a: &DoublesStats, b: &DoublesStats) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.pair_key().cmp(&b.pair_key()))
}

pub fn rank_singles(entries: &mut [SinglesStats]) {
    entries.sort_by(compare_singles);
}

pub fn rank_doubles(entries: &mut [DoublesStats]) {
    entries.sort_by(compare_doubles);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::types::{PlayerRef, Record};

    fn singles(id: &str, wins: i32, losses: i32, points: i32) -> SinglesStats {
        SinglesStats::new(
            PlayerRef { id: id.into(), name: id.to_uppercase() },
            Record { wins, losses, points },
        )
    }

    #[test]
    fn points_dominate_wins() {
        let mut entries = vec![singles("a", 5, 0, 5), singles("b", 2, 0, 6)];
        rank_singles(&mut entries);
        assert_eq!(entries[0].player.id, "b");
    }

    #[test]
    fn wins_break_point_ties() {
        let mut entries = vec![singles("a", 1, 0, 4), singles("b", 2, 3, 4)];
        rank_singles(&mut entries);
        assert_eq!(entries[0].player.id, "b");
    }

    #[test]
    fn id_breaks_full_ties_regardless_of_input_order() {
        let mut forward = vec![singles("p1", 1, 1, 1), singles("p2", 1, 0, 1)];
        let mut reverse = vec![singles("p2", 1, 0, 1), singles("p1", 1, 1, 1)];
        rank_singles(&mut forward);
        rank_singles(&mut reverse);

        assert_eq!(forward, reverse);
        assert_eq!(forward[0].player.id, "p1");
        assert_ne!(compare_singles(&forward[0], &forward[1]), Ordering::Equal);
    }

    #[test]
    fn doubles_fall_back_to_pair_key() {
        let pair = |a: &str, b: &str| {
            DoublesStats::new(
                PlayerRef { id: a.into(), name: a.into() },
                PlayerRef { id: b.into(), name: b.into() },
                Record { wins: 1, losses: 0, points: 1 },
            )
        };
        let mut entries = vec![pair("c", "d"), pair("a", "z")];
        rank_doubles(&mut entries);
        assert_eq!(entries[0].player1.id, "a");
    }
}
