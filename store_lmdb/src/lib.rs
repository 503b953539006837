//! LMDB storage backend for the Gauss polls.
//!
//! Implements all storage traits from `gauss-store` using the `heed` LMDB bindings.
//! Each logical store maps to one LMDB database within a single environment.

pub mod adhoc;
pub mod environment;
pub mod error;
pub mod matches;
pub mod pick;
pub mod settlement;
pub mod vote;

pub use adhoc::LmdbAdhocPollStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use matches::LmdbMatchStore;
pub use pick::LmdbPickStore;
pub use settlement::LmdbSettlementStore;
pub use vote::LmdbVoteLedger;
