//! LMDB implementation of SettlementStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use gauss_store::{SettlementStore, StoreError};
use gauss_types::SettlementRecord;

use crate::environment::next_sequence;
use crate::LmdbError;

pub struct LmdbSettlementStore {
    pub(crate) env: Arc<Env>,
    pub(crate) settlements_db: Database<Bytes, Bytes>,
}

impl SettlementStore for LmdbSettlementStore {
    fn put_settlement(&self, record: &SettlementRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let seq = next_sequence(&self.settlements_db, &wtxn)?;
        self.settlements_db
            .put(&mut wtxn, seq.to_be_bytes().as_slice(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_settlements(&self) -> Result<Vec<SettlementRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.settlements_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for result in iter {
            let (_key, val) = result.map_err(LmdbError::from)?;
            results.push(bincode::deserialize(val).map_err(LmdbError::from)?);
        }
        Ok(results)
    }
}
