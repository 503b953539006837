//! Registry and scoring records supplied by the storage collaborator.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::match_id::MatchId;
use crate::poll::PollType;
use crate::time::Timestamp;

/// A scheduled match. Its `poll_close_time` closes both regular polls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub team_1: String,
    pub team_2: String,
    /// Scheduled start of the match.
    pub date: Timestamp,
    pub poll_close_time: Timestamp,
}

/// One option row of an ad-hoc poll.
///
/// Rows sharing `(match_id, poll_type)` form one poll; each row may close at its
/// own instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdhocPollRow {
    pub match_id: MatchId,
    pub poll_type: PollType,
    pub option: String,
    pub poll_close_time: Timestamp,
    #[serde(default)]
    pub question: Option<String>,
}

/// Externally scored outcome of one poll for one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub user_name: String,
    pub match_id: MatchId,
    pub poll_type: PollType,
    pub amount: Amount,
}

/// Model-generated reasoning published for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPick {
    pub match_id: MatchId,
    pub reasoning: String,
}
