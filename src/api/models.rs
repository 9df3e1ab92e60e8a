use serde::Serialize;

use crate::domain::Match;
use crate::stats::{DashboardSummary, StatCard, StatCategory, Standings, ValidationIssue};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem<T> {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: T,
}

/// A leaderboard page. `total` counts every ranked entry, not just `items`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsResponse<T> {
    pub items: Vec<RankedItem<T>>,
    pub total: usize,
    pub issues: Vec<ValidationIssue>,
}

impl<T> StandingsResponse<T> {
    pub fn from_standings(standings: Standings<T>, limit: Option<usize>) -> Self {
        let total = standings.len();
        let shown = limit.unwrap_or(total);
        let items = standings
            .entries
            .into_iter()
            .take(shown)
            .enumerate()
            .map(|(i, entry)| RankedItem { rank: i + 1, entry })
            .collect();

        Self {
            items,
            total,
            issues: standings.issues,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCardItem {
    pub label: &'static str,
    pub value: usize,
    pub category: StatCategory,
    pub card: StatCard,
}

impl From<StatCard> for StatCardItem {
    fn from(card: StatCard) -> Self {
        Self {
            label: card.label(),
            value: card.value(),
            category: card.category(),
            card,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: DashboardSummary,
    pub cards: Vec<StatCardItem>,
}

impl From<DashboardSummary> for SummaryResponse {
    fn from(summary: DashboardSummary) -> Self {
        let cards = summary.cards().into_iter().map(StatCardItem::from).collect();
        Self { summary, cards }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedMatch {
    #[serde(rename = "match")]
    pub recorded: Match,
    /// Cached leaderboards dropped by this write
    pub invalidated: usize,
}
