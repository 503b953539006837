//! Vote aggregation for the Gauss polls.
//!
//! Turns the flat vote ledger into per-poll counts, voter rosters, and the
//! requesting user's current choices. Only each user's most recent vote at or
//! before the poll's closing instant counts; every other row stays in the ledger
//! but is invisible here.

pub mod aggregate;
pub mod percent;

pub use aggregate::{aggregate, effective_votes, AggregateStats, PollMap, Tally};
pub use percent::percentage;
