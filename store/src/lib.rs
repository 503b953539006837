//! Abstract storage traits for the Gauss polls.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these traits.
//! The rest of the codebase depends only on the traits.

pub mod adhoc;
pub mod error;
pub mod matches;
pub mod pick;
pub mod settlement;
pub mod vote;

pub use adhoc::AdhocPollStore;
pub use error::StoreError;
pub use matches::MatchStore;
pub use pick::PickStore;
pub use settlement::SettlementStore;
pub use vote::{VoteFilter, VoteLedger};

/// Everything the poll service reads from or writes to.
pub trait PollStore:
    VoteLedger + MatchStore + AdhocPollStore + SettlementStore + PickStore + Send + Sync
{
}

impl<T> PollStore for T where
    T: VoteLedger + MatchStore + AdhocPollStore + SettlementStore + PickStore + Send + Sync
{
}
