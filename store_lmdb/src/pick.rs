//! LMDB implementation of PickStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use gauss_store::{PickStore, StoreError};
use gauss_types::MatchPick;

use crate::LmdbError;

pub struct LmdbPickStore {
    pub(crate) env: Arc<Env>,
    pub(crate) picks_db: Database<Bytes, Bytes>,
}

impl PickStore for LmdbPickStore {
    fn put_pick(&self, pick: &MatchPick) -> Result<(), StoreError> {
        let bytes = bincode::serialize(pick).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.picks_db
            .put(&mut wtxn, pick.match_id.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_picks(&self) -> Result<Vec<MatchPick>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.picks_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for result in iter {
            let (_key, val) = result.map_err(LmdbError::from)?;
            results.push(bincode::deserialize(val).map_err(LmdbError::from)?);
        }
        Ok(results)
    }
}
