//! Nullable store — thread-safe in-memory storage for testing.

use gauss_store::{
    AdhocPollStore, MatchStore, PickStore, SettlementStore, StoreError, VoteFilter, VoteLedger,
};
use gauss_types::{AdhocPollRow, MatchId, MatchPick, MatchRecord, SettlementRecord, Vote};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// An in-memory implementation of every poll store.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullStore {
    votes: Mutex<Vec<Vote>>,
    matches: Mutex<HashMap<MatchId, MatchRecord>>,
    adhoc: Mutex<Vec<AdhocPollRow>>,
    settlements: Mutex<Vec<SettlementRecord>>,
    picks: Mutex<HashMap<MatchId, MatchPick>>,
    failing: AtomicBool,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            votes: Mutex::new(Vec::new()),
            matches: Mutex::new(HashMap::new()),
            adhoc: Mutex::new(Vec::new()),
            settlements: Mutex::new(Vec::new()),
            picks: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a backend error.
    pub fn fail_all(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("null store set to fail".into()));
        }
        Ok(())
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteLedger for NullStore {
    fn append_vote(&self, vote: &Vote) -> Result<u64, StoreError> {
        self.check()?;
        let mut votes = self.votes.lock().unwrap();
        votes.push(vote.clone());
        Ok(votes.len() as u64 - 1)
    }

    fn votes(&self, filter: &VoteFilter) -> Result<Vec<Vote>, StoreError> {
        self.check()?;
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect())
    }

    fn vote_count(&self) -> Result<u64, StoreError> {
        self.check()?;
        Ok(self.votes.lock().unwrap().len() as u64)
    }
}

impl MatchStore for NullStore {
    fn put_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        self.check()?;
        self.matches
            .lock()
            .unwrap()
            .insert(record.match_id.clone(), record.clone());
        Ok(())
    }

    fn get_match(&self, match_id: &MatchId) -> Result<MatchRecord, StoreError> {
        self.check()?;
        self.matches
            .lock()
            .unwrap()
            .get(match_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("match {match_id}")))
    }

    fn iter_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        self.check()?;
        Ok(self.matches.lock().unwrap().values().cloned().collect())
    }
}

impl AdhocPollStore for NullStore {
    fn put_adhoc_option(&self, row: &AdhocPollRow) -> Result<(), StoreError> {
        self.check()?;
        let mut rows = self.adhoc.lock().unwrap();
        let existing = rows.iter_mut().find(|r| {
            r.match_id == row.match_id && r.poll_type == row.poll_type && r.option == row.option
        });
        match existing {
            Some(slot) => *slot = row.clone(),
            None => rows.push(row.clone()),
        }
        Ok(())
    }

    fn iter_adhoc_options(&self) -> Result<Vec<AdhocPollRow>, StoreError> {
        self.check()?;
        Ok(self.adhoc.lock().unwrap().clone())
    }
}

impl SettlementStore for NullStore {
    fn put_settlement(&self, record: &SettlementRecord) -> Result<(), StoreError> {
        self.check()?;
        self.settlements.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn iter_settlements(&self) -> Result<Vec<SettlementRecord>, StoreError> {
        self.check()?;
        Ok(self.settlements.lock().unwrap().clone())
    }
}

impl PickStore for NullStore {
    fn put_pick(&self, pick: &MatchPick) -> Result<(), StoreError> {
        self.check()?;
        self.picks
            .lock()
            .unwrap()
            .insert(pick.match_id.clone(), pick.clone());
        Ok(())
    }

    fn iter_picks(&self) -> Result<Vec<MatchPick>, StoreError> {
        self.check()?;
        Ok(self.picks.lock().unwrap().values().cloned().collect())
    }
}
