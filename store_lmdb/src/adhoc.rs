//! LMDB implementation of AdhocPollStore.
//!
//! Key format: `match_id \0 poll_type \0 option`. Values carry the row's first
//! registration sequence so reads can return registration order.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};
use serde::{Deserialize, Serialize};

use gauss_store::{AdhocPollStore, StoreError};
use gauss_types::AdhocPollRow;

use crate::environment::composite_key;
use crate::LmdbError;

pub struct LmdbAdhocPollStore {
    pub(crate) env: Arc<Env>,
    pub(crate) adhoc_db: Database<Bytes, Bytes>,
}

#[derive(Serialize, Deserialize)]
struct StoredRow {
    seq: u64,
    row: AdhocPollRow,
}

fn adhoc_key(row: &AdhocPollRow) -> Vec<u8> {
    composite_key(&[row.match_id.as_str(), row.poll_type.as_str(), &row.option])
}

impl AdhocPollStore for LmdbAdhocPollStore {
    fn put_adhoc_option(&self, row: &AdhocPollRow) -> Result<(), StoreError> {
        let key = adhoc_key(row);
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let existing_seq = match self.adhoc_db.get(&wtxn, &key).map_err(LmdbError::from)? {
            Some(bytes) => {
                let stored: StoredRow = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Some(stored.seq)
            }
            None => None,
        };
        let seq = match existing_seq {
            Some(seq) => seq,
            None => self.adhoc_db.len(&wtxn).map_err(LmdbError::from)?,
        };
        let stored = StoredRow {
            seq,
            row: row.clone(),
        };
        let bytes = bincode::serialize(&stored).map_err(LmdbError::from)?;
        self.adhoc_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_adhoc_options(&self) -> Result<Vec<AdhocPollRow>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.adhoc_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut stored = Vec::new();
        for result in iter {
            let (_key, val) = result.map_err(LmdbError::from)?;
            let row: StoredRow = bincode::deserialize(val).map_err(LmdbError::from)?;
            stored.push(row);
        }
        stored.sort_by_key(|s| s.seq);
        Ok(stored.into_iter().map(|s| s.row).collect())
    }
}
