//! Fundamental types for the Gauss tournament polls.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! match identifiers, poll types, timestamps, amounts, votes, and the registry records
//! supplied by the storage collaborator.

pub mod amount;
pub mod error;
pub mod match_id;
pub mod poll;
pub mod records;
pub mod time;
pub mod vote;

pub use amount::{Amount, MAX_WHOLE_DIGITS};
pub use error::GaussError;
pub use match_id::MatchId;
pub use poll::PollType;
pub use records::{AdhocPollRow, MatchPick, MatchRecord, SettlementRecord};
pub use time::{Clock, SystemClock, Timestamp};
pub use vote::{Principal, Vote, Voter, ANONYMOUS_NAME};
