//! Victory-margin tiers.
//!
//! The tier wording widened partway through the season. Rather than branching at
//! every caller, the history is a small table of `(first match id, tiers)` rows:
//! the last row whose threshold is at or below the match id applies.

use gauss_types::MatchId;
use serde::Serialize;

/// One tier of the victory-margin poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MarginTier {
    /// Option key voters submit (`"A"`..`"D"`).
    pub key: &'static str,
    /// Run range when batting first / balls remaining when chasing.
    pub description: &'static str,
}

const fn tier(key: &'static str, description: &'static str) -> MarginTier {
    MarginTier { key, description }
}

/// First match id that uses the wide tiers.
pub const WIDE_TIER_THRESHOLD: u64 = 21;

const NARROW_TIERS: [MarginTier; 4] = [
    tier("A", "0-10 runs / 4 or less balls remaining"),
    tier("B", "11-20 runs / 5-9 balls remaining"),
    tier("C", "21-35 runs / 10-14 balls remaining"),
    tier("D", "36+ runs / 15+ balls remaining"),
];

const WIDE_TIERS: [MarginTier; 4] = [
    tier("A", "0-15 runs / 6 or less balls remaining"),
    tier("B", "16-30 runs / 7-12 balls remaining"),
    tier("C", "31-50 runs / 13-20 balls remaining"),
    tier("D", "51+ runs / 21+ balls remaining"),
];

/// `(threshold match id, tiers)`, ascending by threshold.
pub const MARGIN_TABLES: &[(u64, &[MarginTier])] =
    &[(0, &NARROW_TIERS), (WIDE_TIER_THRESHOLD, &WIDE_TIERS)];

/// Ordered tiers for a match. Non-numeric ids use the first table.
pub fn margin_options_for(match_id: &MatchId) -> &'static [MarginTier] {
    let first = MARGIN_TABLES[0].1;
    let Some(n) = match_id.numeric() else {
        return first;
    };
    MARGIN_TABLES
        .iter()
        .rev()
        .find(|(threshold, _)| *threshold <= n)
        .map(|(_, tiers)| *tiers)
        .unwrap_or(first)
}

/// Whether `key` is one of the tier keys for this match.
pub fn is_margin_key(match_id: &MatchId, key: &str) -> bool {
    margin_options_for(match_id).iter().any(|t| t.key == key)
}
