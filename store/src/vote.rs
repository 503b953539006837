//! Vote ledger storage trait.

use crate::StoreError;
use gauss_types::{MatchId, PollType, Vote};
use serde::{Deserialize, Serialize};

/// Optional narrowing of a ledger read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteFilter {
    pub match_id: Option<MatchId>,
    pub poll_type: Option<PollType>,
}

impl VoteFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, vote: &Vote) -> bool {
        self.match_id.as_ref().map_or(true, |m| *m == vote.match_id)
            && self.poll_type.as_ref().map_or(true, |p| *p == vote.poll_type)
    }
}

/// Append-only vote ledger.
///
/// Rows are only ever inserted. Reads return rows in insertion order, which is the
/// tie-break the aggregator relies on for equal timestamps.
pub trait VoteLedger {
    /// Append one vote; returns its ledger sequence number.
    fn append_vote(&self, vote: &Vote) -> Result<u64, StoreError>;

    /// All votes matching `filter`, oldest insertion first.
    fn votes(&self, filter: &VoteFilter) -> Result<Vec<Vote>, StoreError>;

    /// Total number of ledger rows.
    fn vote_count(&self) -> Result<u64, StoreError>;
}
