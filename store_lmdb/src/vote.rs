//! LMDB implementation of VoteLedger.
//!
//! Key format: big-endian `u64` sequence number, so cursor order is insertion order.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};
use tracing::debug;

use gauss_store::{StoreError, VoteFilter, VoteLedger};
use gauss_types::Vote;

use crate::environment::next_sequence;
use crate::LmdbError;

pub struct LmdbVoteLedger {
    pub(crate) env: Arc<Env>,
    pub(crate) votes_db: Database<Bytes, Bytes>,
}

impl VoteLedger for LmdbVoteLedger {
    fn append_vote(&self, vote: &Vote) -> Result<u64, StoreError> {
        let bytes = bincode::serialize(vote).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let seq = next_sequence(&self.votes_db, &wtxn)?;
        self.votes_db
            .put(&mut wtxn, seq.to_be_bytes().as_slice(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        debug!(seq, match_id = %vote.match_id, poll_type = %vote.poll_type, "vote appended");
        Ok(seq)
    }

    fn votes(&self, filter: &VoteFilter) -> Result<Vec<Vote>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.votes_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for result in iter {
            let (_key, val) = result.map_err(LmdbError::from)?;
            let vote: Vote = bincode::deserialize(val).map_err(LmdbError::from)?;
            if filter.matches(&vote) {
                results.push(vote);
            }
        }
        Ok(results)
    }

    fn vote_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.votes_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }
}
