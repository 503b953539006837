//! Response shapes returned by [`PollService`](crate::PollService).

use std::collections::BTreeMap;

use gauss_registry::{AdhocOption, MarginTier};
use gauss_tally::{PollMap, Tally};
use gauss_types::{MatchId, PollType, Timestamp};
use serde::Serialize;

/// An upcoming match with both regular polls.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PollSummary {
    pub match_id: MatchId,
    pub team_1: String,
    pub team_2: String,
    pub date: Timestamp,
    pub poll_close_time: Timestamp,
    pub is_open: bool,
    /// Countdown such as `"3h 12m"`, absent once closed.
    pub closes_in: Option<String>,
    pub winner_options: Vec<String>,
    pub margin_options: &'static [MarginTier],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdhocPollView {
    pub match_id: MatchId,
    pub poll_type: PollType,
    pub question: Option<String>,
    pub options: Vec<AdhocOption>,
    /// Latest option close.
    pub closes_at: Timestamp,
    pub is_open: bool,
    pub closes_in: Option<String>,
}

/// The aggregated ledger as seen by one user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VotesView {
    #[serde(flatten)]
    pub tally: Tally,
    /// Share of each option in its poll, 0-100.
    pub percentages: PollMap<BTreeMap<String, f64>>,
    /// When the next poll closes; re-read the ledger then.
    pub next_refresh: Option<Timestamp>,
}

impl VotesView {
    pub fn new(tally: Tally, next_refresh: Option<Timestamp>) -> Self {
        let percentages = tally
            .counts
            .iter()
            .map(|(match_id, polls)| {
                let polls = polls
                    .iter()
                    .map(|(poll_type, options)| {
                        let shares = options
                            .keys()
                            .map(|option| {
                                (option.clone(), tally.percentage(match_id, poll_type, option))
                            })
                            .collect();
                        (poll_type.clone(), shares)
                    })
                    .collect();
                (match_id.clone(), polls)
            })
            .collect();
        Self {
            tally,
            percentages,
            next_refresh,
        }
    }
}
