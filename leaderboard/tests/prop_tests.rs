use gauss_leaderboard::compute;
use gauss_types::{Amount, MatchId, PollType, SettlementRecord};
use proptest::prelude::*;

fn arb_record() -> impl Strategy<Value = SettlementRecord> {
    (
        prop::sample::select(vec!["alice", "bob", "carol", "dave"]),
        1u64..30,
        prop::sample::select(vec![
            PollType::Winner,
            PollType::VictoryMargin,
            PollType::Adhoc("toss".into()),
        ]),
        -50_000_000i128..50_000_000,
    )
        .prop_map(|(user, m, poll_type, raw)| SettlementRecord {
            user_name: user.to_string(),
            match_id: MatchId::from(m.to_string()),
            poll_type,
            amount: Amount::from_raw(raw),
        })
}

proptest! {
    #[test]
    fn total_is_sum_of_categories(records in prop::collection::vec(arb_record(), 0..60)) {
        let board = compute(&records);
        for standing in &board.standings {
            let by_category: Amount = standing.by_category.values().sum();
            prop_assert_eq!(standing.total, by_category);
            let direct: Amount = records
                .iter()
                .filter(|r| r.user_name == standing.user_name)
                .map(|r| r.amount)
                .sum();
            prop_assert_eq!(standing.total, direct);
        }
    }

    #[test]
    fn series_ends_at_total(records in prop::collection::vec(arb_record(), 0..60)) {
        let board = compute(&records);
        for standing in &board.standings {
            let series = board.series(&standing.user_name).unwrap();
            prop_assert_eq!(series.len(), board.matches.len() + 1);
            prop_assert_eq!(series[0], Amount::ZERO);
            prop_assert_eq!(*series.last().unwrap(), standing.total);
        }
    }

    #[test]
    fn series_steps_by_each_match(records in prop::collection::vec(arb_record(), 0..60)) {
        let board = compute(&records);
        for (user, series) in &board.cumulative {
            for (i, match_id) in board.matches.iter().enumerate() {
                let earned: Amount = records
                    .iter()
                    .filter(|r| &r.user_name == user && &r.match_id == match_id)
                    .map(|r| r.amount)
                    .sum();
                prop_assert_eq!(series[i + 1], series[i] + earned);
            }
        }
    }

    #[test]
    fn standings_are_ordered(records in prop::collection::vec(arb_record(), 0..60)) {
        let board = compute(&records);
        for (i, pair) in board.standings.windows(2).enumerate() {
            prop_assert!(
                pair[0].total > pair[1].total
                    || (pair[0].total == pair[1].total && pair[0].user_name < pair[1].user_name)
            );
            prop_assert_eq!(pair[0].rank, i + 1);
        }
    }

    #[test]
    fn matches_are_numerically_sorted(records in prop::collection::vec(arb_record(), 0..60)) {
        let board = compute(&records);
        let numbers: Vec<u64> = board.matches.iter().map(|m| m.numeric().unwrap()).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(numbers, sorted);
    }
}
