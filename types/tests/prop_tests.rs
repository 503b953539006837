use proptest::prelude::*;

use gauss_types::{Amount, MatchId, PollType, Timestamp};

proptest! {
    /// MatchId ordering agrees with integer ordering for numeric ids.
    #[test]
    fn match_id_orders_numerically(a in 0u64..100_000, b in 0u64..100_000) {
        let ma = MatchId::new(a.to_string());
        let mb = MatchId::new(b.to_string());
        prop_assert_eq!(ma.cmp(&mb), a.cmp(&b));
    }

    /// MatchId::numeric recovers the integer it was built from.
    #[test]
    fn match_id_numeric_recovers_value(n in 0u64..u64::MAX) {
        prop_assert_eq!(MatchId::new(n.to_string()).numeric(), Some(n));
    }

    /// Amount: the exact decimal string parses back to the same raw value.
    #[test]
    fn amount_decimal_string_roundtrip(raw in -1_000_000_000_000i128..1_000_000_000_000i128) {
        let amount = Amount::from_raw(raw);
        let parsed: Amount = amount.to_decimal_string().parse().unwrap();
        prop_assert_eq!(parsed, amount);
    }

    /// Amount: addition is exact, so summing then subtracting restores the start.
    #[test]
    fn amount_add_sub_inverse(a in -1_000_000_000i128..1_000_000_000, b in -1_000_000_000i128..1_000_000_000) {
        let x = Amount::from_raw(a);
        let y = Amount::from_raw(b);
        prop_assert_eq!((x + y) - y, x);
    }

    /// Timestamp ordering follows millisecond ordering.
    #[test]
    fn timestamp_ordering(a in 0i64..4_000_000_000_000, b in 0i64..4_000_000_000_000) {
        let ta = Timestamp::from_millis(a);
        let tb = Timestamp::from_millis(b);
        prop_assert_eq!(ta <= tb, a <= b);
    }

    /// Timestamp: RFC 3339 rendering parses back to the same instant.
    #[test]
    fn timestamp_rfc3339_roundtrip(micros in 0i64..4_000_000_000_000_000) {
        let t = Timestamp::from_micros(micros);
        let parsed: Timestamp = t.to_rfc3339().parse().unwrap();
        prop_assert_eq!(parsed, t);
    }

    /// Any non-empty name other than the regular two is an ad-hoc poll.
    #[test]
    fn poll_type_adhoc_names(name in "[a-z_]{1,16}") {
        let parsed: PollType = name.parse().unwrap();
        match name.as_str() {
            "winner" => prop_assert_eq!(parsed, PollType::Winner),
            "victory_margin" => prop_assert_eq!(parsed, PollType::VictoryMargin),
            _ => prop_assert_eq!(parsed, PollType::Adhoc(name.clone())),
        }
    }
}
