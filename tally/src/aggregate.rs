//! Latest-vote-wins aggregation.
//!
//! Votes are scanned newest first. A vote is dropped when its poll is not
//! registered or when it was cast after the poll closed; of the survivors, the first
//! one seen per `(match, poll_type, user)` is that user's effective vote. Equal
//! timestamps are ordered by ledger position, the later row winning.

use std::collections::{BTreeMap, HashSet};

use gauss_registry::PollRegistry;
use gauss_types::{MatchId, PollType, Vote, Voter};
use serde::Serialize;
use tracing::debug;

use crate::percent::percentage;

/// Values keyed by match, then poll type.
pub type PollMap<T> = BTreeMap<MatchId, BTreeMap<PollType, T>>;

/// Counters describing what the last aggregation discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    /// Ledger rows examined.
    pub considered: usize,
    /// Rows whose poll is not in the registry.
    pub unregistered: usize,
    /// Rows cast after their poll closed.
    pub late: usize,
    /// Rows superseded by a newer valid vote from the same user.
    pub superseded: usize,
    /// Rows that count.
    pub effective: usize,
}

/// Derived view of the ledger for one request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Tally {
    /// Effective votes per option.
    pub counts: PollMap<BTreeMap<String, u32>>,
    /// Effective voters per option, most recent vote first.
    pub voters: PollMap<BTreeMap<String, Vec<Voter>>>,
    /// The requesting user's effective choice per poll.
    pub user_choices: PollMap<String>,
    #[serde(skip)]
    pub stats: AggregateStats,
}

impl Tally {
    pub fn count(&self, match_id: &MatchId, poll_type: &PollType, option: &str) -> u32 {
        self.counts
            .get(match_id)
            .and_then(|polls| polls.get(poll_type))
            .and_then(|options| options.get(option))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct effective voters in a poll.
    pub fn total(&self, match_id: &MatchId, poll_type: &PollType) -> u32 {
        self.counts
            .get(match_id)
            .and_then(|polls| polls.get(poll_type))
            .map(|options| options.values().sum())
            .unwrap_or(0)
    }

    /// Share of a poll's effective votes cast for `option`; zero for an empty poll.
    pub fn percentage(&self, match_id: &MatchId, poll_type: &PollType, option: &str) -> f64 {
        percentage(
            self.count(match_id, poll_type, option),
            self.total(match_id, poll_type),
        )
    }

    pub fn roster(&self, match_id: &MatchId, poll_type: &PollType, option: &str) -> &[Voter] {
        self.voters
            .get(match_id)
            .and_then(|polls| polls.get(poll_type))
            .and_then(|options| options.get(option))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn choice_of(&self, match_id: &MatchId, poll_type: &PollType) -> Option<&str> {
        self.user_choices
            .get(match_id)
            .and_then(|polls| polls.get(poll_type))
            .map(String::as_str)
    }
}

/// Indices of `votes` newest first; ties broken by later ledger position.
fn newest_first(votes: &[Vote]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..votes.len()).collect();
    order.sort_by(|&a, &b| {
        votes[b]
            .created_timestamp
            .cmp(&votes[a].created_timestamp)
            .then_with(|| b.cmp(&a))
    });
    order
}

/// The effective vote of every user in every poll, newest first.
pub fn effective_votes<'a>(
    votes: &'a [Vote],
    registry: &PollRegistry,
) -> (Vec<&'a Vote>, AggregateStats) {
    let mut stats = AggregateStats {
        considered: votes.len(),
        ..AggregateStats::default()
    };
    let mut seen: HashSet<(&MatchId, &PollType, &str)> = HashSet::new();
    let mut effective = Vec::new();

    for idx in newest_first(votes) {
        let vote = &votes[idx];
        let close = match registry.closing_time_of(
            &vote.match_id,
            &vote.poll_type,
            Some(&vote.option_voted),
        ) {
            Ok(close) => close,
            Err(_) => {
                stats.unregistered += 1;
                continue;
            }
        };
        if vote.created_timestamp > close {
            stats.late += 1;
            continue;
        }
        if !seen.insert((&vote.match_id, &vote.poll_type, vote.user_email.as_str())) {
            stats.superseded += 1;
            continue;
        }
        effective.push(vote);
    }

    stats.effective = effective.len();
    (effective, stats)
}

/// Aggregate the full ledger against the registry.
///
/// `viewer_email` fills [`Tally::user_choices`] with that user's effective votes.
pub fn aggregate(votes: &[Vote], registry: &PollRegistry, viewer_email: Option<&str>) -> Tally {
    let (effective, stats) = effective_votes(votes, registry);
    let mut tally = Tally {
        stats,
        ..Tally::default()
    };

    for vote in effective {
        *tally
            .counts
            .entry(vote.match_id.clone())
            .or_default()
            .entry(vote.poll_type.clone())
            .or_default()
            .entry(vote.option_voted.clone())
            .or_default() += 1;

        tally
            .voters
            .entry(vote.match_id.clone())
            .or_default()
            .entry(vote.poll_type.clone())
            .or_default()
            .entry(vote.option_voted.clone())
            .or_default()
            .push(vote.voter());

        if viewer_email == Some(vote.user_email.as_str()) {
            tally
                .user_choices
                .entry(vote.match_id.clone())
                .or_default()
                .insert(vote.poll_type.clone(), vote.option_voted.clone());
        }
    }

    debug!(
        considered = stats.considered,
        effective = stats.effective,
        late = stats.late,
        unregistered = stats.unregistered,
        superseded = stats.superseded,
        "aggregated vote ledger"
    );
    tally
}
