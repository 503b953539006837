//! Leaderboard computation over externally scored settlement records.
//!
//! Settlements arrive one signed amount per `(user, match, poll_type)`. From them
//! we derive a ranked standings table with a per-category breakdown and, for the
//! earnings chart, each user's running total across matches in numeric match order.

pub mod compute;

pub use compute::{compute, Leaderboard, Standing};
