//! LMDB implementation of MatchStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use gauss_store::{MatchStore, StoreError};
use gauss_types::{MatchId, MatchRecord};

use crate::LmdbError;

pub struct LmdbMatchStore {
    pub(crate) env: Arc<Env>,
    pub(crate) matches_db: Database<Bytes, Bytes>,
}

impl MatchStore for LmdbMatchStore {
    fn put_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.matches_db
            .put(&mut wtxn, record.match_id.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_match(&self, match_id: &MatchId) -> Result<MatchRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .matches_db
            .get(&rtxn, match_id.as_str().as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("match {match_id}")))?;
        let record: MatchRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
        Ok(record)
    }

    fn iter_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.matches_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for result in iter {
            let (_key, val) = result.map_err(LmdbError::from)?;
            results.push(bincode::deserialize(val).map_err(LmdbError::from)?);
        }
        Ok(results)
    }
}
