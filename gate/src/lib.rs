//! Eligibility gate for vote submission.
//!
//! A ballot becomes a ledger row only when:
//! 1. a principal with a stable email is present,
//! 2. the addressed poll is registered and the option belongs to it,
//! 3. the option's closing instant is strictly after the submission instant.
//!
//! The gate never looks at earlier votes by the same user; superseding is resolved
//! when the ledger is aggregated.

pub mod ballot;
pub mod error;

pub use ballot::{admit, Ballot};
pub use error::GateError;
