//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions, RoTxn};
use tracing::info;

use crate::{
    LmdbAdhocPollStore, LmdbError, LmdbMatchStore, LmdbPickStore, LmdbSettlementStore,
    LmdbVoteLedger,
};

/// Number of named databases the environment creates.
pub const MAX_DBS: u32 = 8;

/// Default map size: 1 GiB is far beyond a season of votes.
pub const DEFAULT_MAP_SIZE: usize = 1024 * 1024 * 1024;

const VOTES_DB: &str = "votes";
const MATCHES_DB: &str = "matches";
const ADHOC_DB: &str = "adhoc_polls";
const SETTLEMENTS_DB: &str = "settlements";
const PICKS_DB: &str = "picks";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    votes_db: Database<Bytes, Bytes>,
    matches_db: Database<Bytes, Bytes>,
    adhoc_db: Database<Bytes, Bytes>,
    settlements_db: Database<Bytes, Bytes>,
    picks_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened once per process and never through a
        // second handle to the same path.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let votes_db = env.create_database(&mut wtxn, Some(VOTES_DB))?;
        let matches_db = env.create_database(&mut wtxn, Some(MATCHES_DB))?;
        let adhoc_db = env.create_database(&mut wtxn, Some(ADHOC_DB))?;
        let settlements_db = env.create_database(&mut wtxn, Some(SETTLEMENTS_DB))?;
        let picks_db = env.create_database(&mut wtxn, Some(PICKS_DB))?;
        wtxn.commit()?;

        info!("opened LMDB environment at {}", path.display());

        Ok(Self {
            env: Arc::new(env),
            votes_db,
            matches_db,
            adhoc_db,
            settlements_db,
            picks_db,
        })
    }

    /// Open with the default database count and map size.
    pub fn open_default(path: &Path) -> Result<Self, LmdbError> {
        Self::open(path, MAX_DBS, DEFAULT_MAP_SIZE)
    }

    pub fn vote_ledger(&self) -> LmdbVoteLedger {
        LmdbVoteLedger {
            env: self.env.clone(),
            votes_db: self.votes_db,
        }
    }

    pub fn match_store(&self) -> LmdbMatchStore {
        LmdbMatchStore {
            env: self.env.clone(),
            matches_db: self.matches_db,
        }
    }

    pub fn adhoc_store(&self) -> LmdbAdhocPollStore {
        LmdbAdhocPollStore {
            env: self.env.clone(),
            adhoc_db: self.adhoc_db,
        }
    }

    pub fn settlement_store(&self) -> LmdbSettlementStore {
        LmdbSettlementStore {
            env: self.env.clone(),
            settlements_db: self.settlements_db,
        }
    }

    pub fn pick_store(&self) -> LmdbPickStore {
        LmdbPickStore {
            env: self.env.clone(),
            picks_db: self.picks_db,
        }
    }
}

/// Next sequence key for an append-only database keyed by big-endian `u64`.
pub(crate) fn next_sequence(
    db: &Database<Bytes, Bytes>,
    txn: &RoTxn,
) -> Result<u64, LmdbError> {
    match db.last(txn)? {
        Some((key, _)) => {
            let arr: [u8; 8] = key
                .try_into()
                .map_err(|_| LmdbError::Serialization("sequence key is not 8 bytes".into()))?;
            Ok(u64::from_be_bytes(arr) + 1)
        }
        None => Ok(0),
    }
}

/// Composite key of NUL-separated parts. Parts never contain NUL in practice.
pub(crate) fn composite_key(parts: &[&str]) -> Vec<u8> {
    let mut key = Vec::with_capacity(parts.iter().map(|p| p.len() + 1).sum());
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            key.push(0);
        }
        key.extend_from_slice(part.as_bytes());
    }
    key
}
