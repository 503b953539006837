//! Per-request orchestration.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use gauss_gate::{admit, Ballot};
use gauss_leaderboard::{compute, Leaderboard};
use gauss_registry::{margin_options_for, MarginTier, PollRegistry};
use gauss_store::{
    AdhocPollStore, MatchStore, PickStore, PollStore, SettlementStore, VoteFilter, VoteLedger,
};
use gauss_tally::aggregate;
use gauss_types::{Clock, MatchId, PollType, Principal, Vote};
use gauss_utils::format_countdown;
use tracing::{debug, info};

use crate::import::{ImportSummary, SeasonData};
use crate::metrics::ServiceMetrics;
use crate::views::{AdhocPollView, PollSummary, VotesView};
use crate::ServiceError;

/// Handles to every collaborator the service reads from or writes to.
#[derive(Clone)]
pub struct Stores {
    pub votes: Arc<dyn VoteLedger + Send + Sync>,
    pub matches: Arc<dyn MatchStore + Send + Sync>,
    pub adhoc: Arc<dyn AdhocPollStore + Send + Sync>,
    pub settlements: Arc<dyn SettlementStore + Send + Sync>,
    pub picks: Arc<dyn PickStore + Send + Sync>,
}

impl Stores {
    /// Use one backend for everything.
    pub fn from_shared<T: PollStore + 'static>(store: Arc<T>) -> Self {
        Self {
            votes: store.clone(),
            matches: store.clone(),
            adhoc: store.clone(),
            settlements: store.clone(),
            picks: store,
        }
    }
}

pub struct PollService {
    stores: Stores,
    clock: Arc<dyn Clock>,
    metrics: Option<Arc<ServiceMetrics>>,
}

impl PollService {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>) -> Self {
        Self {
            stores,
            clock,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<ServiceMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn metrics(&self) -> Option<&Arc<ServiceMetrics>> {
        self.metrics.as_ref()
    }

    /// Fresh registry snapshot from the match and ad-hoc stores.
    pub fn registry(&self) -> Result<PollRegistry, ServiceError> {
        let matches = self.stores.matches.iter_matches()?;
        let adhoc = self.stores.adhoc.iter_adhoc_options()?;
        Ok(PollRegistry::new(matches, adhoc))
    }

    /// Matches that have not started yet, soonest first, with their regular polls.
    pub fn upcoming_matches(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Vec<PollSummary>, ServiceError> {
        principal.ok_or(ServiceError::Unauthorized)?;
        let registry = self.registry()?;
        let now = self.clock.now();

        registry
            .upcoming_matches(now)
            .into_iter()
            .map(|m| {
                Ok(PollSummary {
                    match_id: m.match_id.clone(),
                    team_1: m.team_1.clone(),
                    team_2: m.team_2.clone(),
                    date: m.date,
                    poll_close_time: m.poll_close_time,
                    is_open: registry.is_open(&m.match_id, &PollType::Winner, now)?,
                    closes_in: format_countdown(now, m.poll_close_time),
                    winner_options: vec![m.team_1.clone(), m.team_2.clone()],
                    margin_options: margin_options_for(&m.match_id),
                })
            })
            .collect()
    }

    /// Aggregate the whole ledger, filling in the caller's own choices.
    pub fn all_votes(&self, principal: Option<&Principal>) -> Result<VotesView, ServiceError> {
        let principal = principal.ok_or(ServiceError::Unauthorized)?;
        let started = Instant::now();

        let registry = self.registry()?;
        let votes = self.stores.votes.votes(&VoteFilter::all())?;
        let tally = aggregate(&votes, &registry, Some(principal.email.as_str()));
        let next_refresh = registry.next_closing_after(self.clock.now());

        if let Some(metrics) = &self.metrics {
            metrics
                .aggregation_duration_ms
                .observe(started.elapsed().as_secs_f64() * 1000.0);
        }
        debug!(
            effective = tally.stats.effective,
            next_refresh = ?next_refresh,
            "served vote tally"
        );
        Ok(VotesView::new(tally, next_refresh))
    }

    /// Check a ballot against the registry and append it to the ledger.
    ///
    /// The check and the append are separate store calls; two racing ballots from
    /// one user may both land, and aggregation keeps the later one.
    pub fn submit_vote(
        &self,
        principal: Option<&Principal>,
        ballot: &Ballot,
    ) -> Result<Vote, ServiceError> {
        let result = self.try_submit(principal, ballot);
        if let Some(metrics) = &self.metrics {
            match &result {
                Ok(_) => metrics.votes_accepted.inc(),
                Err(e) => metrics.votes_rejected.with_label_values(&[e.reason()]).inc(),
            }
        }
        result
    }

    fn try_submit(
        &self,
        principal: Option<&Principal>,
        ballot: &Ballot,
    ) -> Result<Vote, ServiceError> {
        principal.ok_or(ServiceError::Unauthorized)?;
        let registry = self.registry()?;
        let vote = admit(&registry, ballot, principal, self.clock.now())?;
        let seq = self.stores.votes.append_vote(&vote)?;
        debug!(seq, match_id = %vote.match_id, poll_type = %vote.poll_type, "vote appended");
        Ok(vote)
    }

    /// Standings over every settlement. Readable without signing in.
    pub fn leaderboard(&self) -> Result<Leaderboard, ServiceError> {
        let settlements = self.stores.settlements.iter_settlements()?;
        Ok(compute(&settlements))
    }

    pub fn margin_options(&self, match_id: &MatchId) -> &'static [MarginTier] {
        margin_options_for(match_id)
    }

    pub fn adhoc_polls(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Vec<AdhocPollView>, ServiceError> {
        principal.ok_or(ServiceError::Unauthorized)?;
        let registry = self.registry()?;
        let now = self.clock.now();

        registry
            .adhoc_polls()
            .map(|poll| {
                let closes_at = poll.display_close_time();
                Ok(AdhocPollView {
                    match_id: poll.match_id.clone(),
                    poll_type: poll.poll_type.clone(),
                    question: poll.question.clone(),
                    options: poll.options.clone(),
                    closes_at,
                    is_open: registry.is_open(&poll.match_id, &poll.poll_type, now)?,
                    closes_in: format_countdown(now, closes_at),
                })
            })
            .collect()
    }

    /// Published pick reasoning keyed by match.
    pub fn ai_picks(&self) -> Result<BTreeMap<MatchId, String>, ServiceError> {
        Ok(self
            .stores
            .picks
            .iter_picks()?
            .into_iter()
            .map(|p| (p.match_id, p.reasoning))
            .collect())
    }

    /// Write a season file into the stores. Existing rows with the same key are
    /// replaced; settlements are appended.
    pub fn import(&self, season: &SeasonData) -> Result<ImportSummary, ServiceError> {
        if let Some(row) = season.adhoc_polls.iter().find(|r| r.poll_type.is_regular()) {
            return Err(ServiceError::Config(format!(
                "ad-hoc poll row for match {} uses reserved poll type {}",
                row.match_id, row.poll_type
            )));
        }

        for record in &season.matches {
            self.stores.matches.put_match(record)?;
        }
        for row in &season.adhoc_polls {
            self.stores.adhoc.put_adhoc_option(row)?;
        }
        for record in &season.settlements {
            self.stores.settlements.put_settlement(record)?;
        }
        for pick in &season.picks {
            self.stores.picks.put_pick(pick)?;
        }

        let summary = ImportSummary {
            matches: season.matches.len(),
            adhoc_options: season.adhoc_polls.len(),
            settlements: season.settlements.len(),
            picks: season.picks.len(),
        };
        info!(
            matches = summary.matches,
            adhoc_options = summary.adhoc_options,
            settlements = summary.settlements,
            picks = summary.picks,
            "imported season data"
        );
        Ok(summary)
    }
}
