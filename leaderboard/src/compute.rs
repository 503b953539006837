//! Standings and cumulative earnings.

use std::collections::{BTreeMap, BTreeSet};

use gauss_types::{Amount, MatchId, PollType, SettlementRecord};
use serde::Serialize;
use tracing::debug;

/// One row of the standings table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// 1-based position.
    pub rank: usize,
    pub user_name: String,
    pub total: Amount,
    /// Every category present in the input, zero where the user earned nothing.
    pub by_category: BTreeMap<PollType, Amount>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    /// Distinct poll types present, in poll-type order.
    pub categories: Vec<PollType>,
    /// Users by total descending, ties by name ascending.
    pub standings: Vec<Standing>,
    /// Distinct matches in numeric order; the x-axis of the cumulative series.
    pub matches: Vec<MatchId>,
    /// Per user: `matches.len() + 1` running totals, starting at zero.
    pub cumulative: BTreeMap<String, Vec<Amount>>,
}

impl Leaderboard {
    pub fn standing(&self, user_name: &str) -> Option<&Standing> {
        self.standings.iter().find(|s| s.user_name == user_name)
    }

    pub fn series(&self, user_name: &str) -> Option<&[Amount]> {
        self.cumulative.get(user_name).map(Vec::as_slice)
    }
}

pub fn compute(records: &[SettlementRecord]) -> Leaderboard {
    let categories: BTreeSet<PollType> = records.iter().map(|r| r.poll_type.clone()).collect();
    let matches: BTreeSet<MatchId> = records.iter().map(|r| r.match_id.clone()).collect();
    let matches: Vec<MatchId> = matches.into_iter().collect();
    let match_pos: BTreeMap<&MatchId, usize> =
        matches.iter().enumerate().map(|(i, m)| (m, i)).collect();

    let mut by_user: BTreeMap<&str, BTreeMap<PollType, Amount>> = BTreeMap::new();
    let mut per_match: BTreeMap<&str, Vec<Amount>> = BTreeMap::new();

    for record in records {
        let categories_for_user = by_user.entry(record.user_name.as_str()).or_insert_with(|| {
            categories.iter().map(|c| (c.clone(), Amount::ZERO)).collect()
        });
        if let Some(sum) = categories_for_user.get_mut(&record.poll_type) {
            *sum += record.amount;
        }

        let earned = per_match
            .entry(record.user_name.as_str())
            .or_insert_with(|| vec![Amount::ZERO; matches.len()]);
        if let Some(&pos) = match_pos.get(&record.match_id) {
            earned[pos] += record.amount;
        }
    }

    let mut standings: Vec<Standing> = by_user
        .into_iter()
        .map(|(user, by_category)| Standing {
            rank: 0,
            user_name: user.to_string(),
            total: by_category.values().sum(),
            by_category,
        })
        .collect();
    standings.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.user_name.cmp(&b.user_name))
    });
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = i + 1;
    }

    let cumulative = per_match
        .into_iter()
        .map(|(user, earned)| {
            let mut running = Amount::ZERO;
            let mut series = Vec::with_capacity(earned.len() + 1);
            series.push(running);
            for amount in earned {
                running += amount;
                series.push(running);
            }
            (user.to_string(), series)
        })
        .collect();

    debug!(
        users = standings.len(),
        matches = matches.len(),
        categories = categories.len(),
        "computed leaderboard"
    );

    Leaderboard {
        categories: categories.into_iter().collect(),
        standings,
        matches,
        cumulative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user: &str, match_id: &str, poll_type: PollType, amount: &str) -> SettlementRecord {
        SettlementRecord {
            user_name: user.into(),
            match_id: MatchId::from(match_id),
            poll_type,
            amount: amount.parse().unwrap(),
        }
    }

    fn units(n: i64) -> Amount {
        Amount::from_units(n)
    }

    #[test]
    fn totals_and_ranking() {
        let board = compute(&[
            record("u1", "1", PollType::Winner, "10"),
            record("u1", "1", PollType::VictoryMargin, "-3"),
            record("u2", "1", PollType::Winner, "-10"),
        ]);
        assert_eq!(board.standing("u1").unwrap().total, units(7));
        assert_eq!(board.standing("u2").unwrap().total, units(-10));
        let order: Vec<&str> = board.standings.iter().map(|s| s.user_name.as_str()).collect();
        assert_eq!(order, vec!["u1", "u2"]);
        assert_eq!(board.standings[0].rank, 1);
        assert_eq!(board.standings[1].rank, 2);
    }

    #[test]
    fn category_breakdown_fills_zeros() {
        let board = compute(&[
            record("u1", "1", PollType::Winner, "10"),
            record("u2", "1", PollType::VictoryMargin, "4"),
        ]);
        assert_eq!(board.categories, vec![PollType::Winner, PollType::VictoryMargin]);
        let u1 = board.standing("u1").unwrap();
        assert_eq!(u1.by_category[&PollType::VictoryMargin], Amount::ZERO);
        assert_eq!(u1.by_category[&PollType::Winner], units(10));
    }

    #[test]
    fn equal_totals_rank_by_name() {
        let board = compute(&[
            record("zed", "1", PollType::Winner, "5"),
            record("amy", "1", PollType::Winner, "5"),
        ]);
        assert_eq!(board.standings[0].user_name, "amy");
    }

    #[test]
    fn cumulative_series_follows_numeric_match_order() {
        let board = compute(&[
            record("u1", "10", PollType::Winner, "1"),
            record("u1", "2", PollType::Winner, "5"),
            record("u1", "9", PollType::Winner, "-2"),
            record("u2", "9", PollType::Winner, "3"),
        ]);
        let ids: Vec<&str> = board.matches.iter().map(MatchId::as_str).collect();
        assert_eq!(ids, vec!["2", "9", "10"]);
        assert_eq!(board.series("u1").unwrap(), &[units(0), units(5), units(3), units(4)]);
        // u2 sat out matches 2 and 10
        assert_eq!(board.series("u2").unwrap(), &[units(0), units(0), units(3), units(3)]);
    }

    #[test]
    fn keeps_full_precision() {
        let board = compute(&[
            record("u1", "1", PollType::Winner, "0.333333"),
            record("u1", "2", PollType::Winner, "0.333333"),
            record("u1", "3", PollType::Winner, "0.333334"),
        ]);
        assert_eq!(board.standing("u1").unwrap().total, units(1));
    }

    #[test]
    fn widest_accepted_amounts_sum_without_overflow() {
        let widest = format!("{}.999999", "9".repeat(gauss_types::MAX_WHOLE_DIGITS));
        let rows: Vec<SettlementRecord> = (1..=1000)
            .map(|m| record("u1", &m.to_string(), PollType::Winner, &widest))
            .collect();
        let board = compute(&rows);
        let one: Amount = widest.parse().unwrap();
        assert_eq!(board.standing("u1").unwrap().total.raw(), one.raw() * 1000);
    }

    #[test]
    fn serializes_amounts_as_exact_strings() {
        let board = compute(&[
            record("u1", "2", PollType::Winner, "10"),
            record("u1", "2", PollType::Adhoc("toss".into()), "-2.5"),
        ]);
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["categories"], serde_json::json!(["winner", "toss"]));
        assert_eq!(json["matches"], serde_json::json!(["2"]));
        assert_eq!(json["standings"][0]["rank"], 1);
        assert_eq!(json["standings"][0]["total"], "7.5");
        assert_eq!(json["standings"][0]["by_category"]["toss"], "-2.5");
        assert_eq!(json["cumulative"]["u1"], serde_json::json!(["0", "7.5"]));
    }

    #[test]
    fn empty_input_gives_empty_board() {
        let board = compute(&[]);
        assert!(board.standings.is_empty());
        assert!(board.matches.is_empty());
        assert!(board.cumulative.is_empty());
    }
}
